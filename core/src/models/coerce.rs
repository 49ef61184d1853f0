//! Decoding helpers for `executionMetaData`.
//!
//! The service is inconsistent about nested JSON: the same key may hold an
//! already-structured object/array on one call and a string containing JSON
//! text on the next. Every result parser goes through these helpers so the
//! string-or-value check lives in exactly one place.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ParseError;

pub type Metadata = Map<String, Value>;

/// Decodes the value stored under `key`.
///
/// A string is parsed as JSON text first; any other value is decoded as is.
/// Absent keys, `null` and blank strings yield `None`.
pub fn coerce_json<T: DeserializeOwned>(
    metadata: &Metadata,
    key: &str,
) -> Result<Option<T>, ParseError> {
    let parsed;
    let value = match metadata.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                return Ok(None);
            }
            parsed = serde_json::from_str::<Value>(text).map_err(|source| {
                ParseError::InvalidJson {
                    key: key.to_string(),
                    source,
                }
            })?;
            &parsed
        }
        Some(value) => value,
    };
    T::deserialize(value)
        .map(Some)
        .map_err(|source| ParseError::Shape {
            key: key.to_string(),
            source,
        })
}

/// Like [`coerce_json`], falling back to `T::default()` when nothing is there.
pub fn coerce_json_or_default<T: DeserializeOwned + Default>(
    metadata: &Metadata,
    key: &str,
) -> Result<T, ParseError> {
    Ok(coerce_json(metadata, key)?.unwrap_or_default())
}

/// Reads a scalar as text. Numbers and booleans are rendered with their JSON form.
pub fn coerce_text(metadata: &Metadata, key: &str) -> Option<String> {
    match metadata.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads an integer that may arrive as a JSON number or a numeric string.
pub fn coerce_int(metadata: &Metadata, key: &str) -> Result<Option<i64>, ParseError> {
    let invalid = |value: &Value| ParseError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    };
    match metadata.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| Some(f as i64))
                .ok_or_else(|| invalid(&Value::Number(n.clone()))),
        },
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| invalid(&Value::String(s.clone())))
        }
        Some(other) => Err(invalid(other)),
    }
}

/// Turns the raw `executionMetaData` value into an object, decoding it first
/// when the service sent the whole blob as a JSON string.
pub fn metadata_from_value(value: &Value) -> Result<Metadata, ParseError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ParseError::MetadataNotObject),
            Err(source) => Err(ParseError::InvalidJson {
                key: "executionMetaData".to_string(),
                source,
            }),
        },
        _ => Err(ParseError::MetadataNotObject),
    }
}

/// Scalar that the service reports as either text or a number.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for LooseScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn md(v: Value) -> Metadata {
        match v {
            Value::Object(m) => m,
            _ => unreachable!("test metadata must be an object"),
        }
    }

    #[test]
    fn string_and_native_forms_decode_identically() {
        let native = md(json!({"k": [{"id": "e1", "displayName": "Demo"}]}));
        let encoded = md(json!({"k": "[{\"id\":\"e1\",\"displayName\":\"Demo\"}]"}));

        let a: Vec<Map<String, Value>> = coerce_json_or_default(&native, "k").unwrap();
        let b: Vec<Map<String, Value>> = coerce_json_or_default(&encoded, "k").unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0]["id"], json!("e1"));
    }

    #[test]
    fn absent_null_and_blank_fall_back_to_default() {
        let m = md(json!({"null": null, "blank": "  "}));
        for key in ["missing", "null", "blank"] {
            let v: Vec<String> = coerce_json_or_default(&m, key).unwrap();
            assert!(v.is_empty(), "{key} should default");
        }
    }

    #[test]
    fn malformed_embedded_json_is_an_error() {
        let m = md(json!({"k": "[{not json"}));
        let err = coerce_json::<Vec<Value>>(&m, "k").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { ref key, .. } if key == "k"));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        let m = md(json!({"k": {"a": 1}}));
        let err = coerce_json::<Vec<Value>>(&m, "k").unwrap_err();
        assert!(matches!(err, ParseError::Shape { .. }));
    }

    #[test]
    fn int_accepts_numbers_and_numeric_strings() {
        let m = md(json!({"n": 14322, "s": "14322", "f": 12.0, "bad": "many", "blank": ""}));
        assert_eq!(coerce_int(&m, "n").unwrap(), Some(14322));
        assert_eq!(coerce_int(&m, "s").unwrap(), Some(14322));
        assert_eq!(coerce_int(&m, "f").unwrap(), Some(12));
        assert_eq!(coerce_int(&m, "blank").unwrap(), None);
        assert_eq!(coerce_int(&m, "missing").unwrap(), None);
        assert!(matches!(
            coerce_int(&m, "bad").unwrap_err(),
            ParseError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn text_renders_scalars() {
        let m = md(json!({"s": "25.5", "n": 25.5, "b": true, "z": null}));
        assert_eq!(coerce_text(&m, "s").as_deref(), Some("25.5"));
        assert_eq!(coerce_text(&m, "n").as_deref(), Some("25.5"));
        assert_eq!(coerce_text(&m, "b").as_deref(), Some("true"));
        assert_eq!(coerce_text(&m, "z"), None);
    }

    #[test]
    fn metadata_may_itself_be_a_json_string() {
        let v = json!("{\"adp_hostname\":\"h1\"}");
        let m = metadata_from_value(&v).unwrap();
        assert_eq!(m["adp_hostname"], json!("h1"));
        assert!(matches!(
            metadata_from_value(&json!([1, 2])).unwrap_err(),
            ParseError::MetadataNotObject
        ));
    }

    #[test]
    fn loose_scalar_keeps_the_wire_form() {
        let text: LooseScalar = serde_json::from_value(json!("524983291")).unwrap();
        let int: LooseScalar = serde_json::from_value(json!(524983291)).unwrap();
        let float: LooseScalar = serde_json::from_value(json!(1.5)).unwrap();
        assert_eq!(text, LooseScalar::Text("524983291".into()));
        assert_eq!(int, LooseScalar::Int(524983291));
        assert_eq!(float, LooseScalar::Float(1.5));
        assert_eq!(text.to_string(), int.to_string());
    }
}
