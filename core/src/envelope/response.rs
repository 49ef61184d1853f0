use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ParseError;

/// The service's success marker, compared case-insensitively.
pub const SUCCESS_STATUS: &str = "success";

/// `true` only for a present status equal to "success" in any letter case.
pub fn is_success_status(status: Option<&str>) -> bool {
    status.is_some_and(|s| s.eq_ignore_ascii_case(SUCCESS_STATUS))
}

/// Flag the service sends either as a JSON bool or as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseBool {
    Bool(bool),
    Text(String),
}

impl LooseBool {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Self::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            Self::Text(_) => None,
        }
    }
}

/// Response envelope returned by all three endpoints.
///
/// Only `executionId` is strict. The side fields are decoded leniently: a
/// value of an unexpected JSON type becomes `None` instead of failing the
/// whole envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub execution_id: Uuid,
    #[serde(default, deserialize_with = "lenient_text")]
    pub task_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub execution_status: Option<String>,
    #[serde(default, rename = "executionMetaData")]
    pub execution_metadata: Option<Value>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub progress_current: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub progress_max: Option<i64>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub progress_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub execution_root_dir: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub context_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub logging_enabled: Option<LooseBool>,
    #[serde(default, deserialize_with = "lenient")]
    pub execution_persistent: Option<LooseBool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub task_display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub error_message: Option<String>,
}

/// Integer sent as a number, an integral float or numeric text.
fn int_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(int_of))
}

fn lenient_float<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

fn lenient<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| T::deserialize(v).ok()))
}

impl TaskResponse {
    /// Decodes an envelope.
    ///
    /// Fails with [`ParseError::MissingExecutionId`] when `executionId` is
    /// absent or not a UUID, and with [`ParseError::InvalidEnvelope`] for any
    /// other decoding problem.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        match value.get("executionId") {
            None | Some(Value::Null) => {
                return Err(ParseError::MissingExecutionId(
                    "executionId is absent".to_string(),
                ))
            }
            Some(Value::String(raw)) if Uuid::parse_str(raw).is_ok() => {}
            Some(other) => {
                return Err(ParseError::MissingExecutionId(format!(
                    "{other} is not a UUID"
                )))
            }
        }
        Self::deserialize(value).map_err(|e| ParseError::InvalidEnvelope(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        is_success_status(self.execution_status.as_deref())
    }

    /// Progress in percent, derived from current/max when the service omits it.
    pub fn progress(&self) -> Option<f64> {
        self.progress_percentage.or_else(|| {
            match (self.progress_current, self.progress_max) {
                (Some(cur), Some(max)) if max > 0 => Some(cur as f64 * 100.0 / max as f64),
                _ => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn status_is_case_insensitive() {
        for ok in ["SUCCESS", "Success", "success"] {
            assert!(is_success_status(Some(ok)), "{ok}");
        }
        for bad in ["FAILED", "", "RUNNING", " success"] {
            assert!(!is_success_status(Some(bad)), "{bad:?}");
        }
        assert!(!is_success_status(None));
    }

    #[test]
    fn decodes_full_envelope() {
        let resp = TaskResponse::from_value(&json!({
            "executionId": ID,
            "taskType": "List Entities",
            "executionStatus": "SUCCESS",
            "executionMetaData": {"k": "v"},
            "progressCurrent": 5,
            "progressMax": 10,
            "loggingEnabled": "true",
            "executionPersistent": false,
            "contextId": "ctx",
            "errorMessage": null
        }))
        .unwrap();
        assert_eq!(resp.execution_id.to_string(), ID);
        assert!(resp.is_success());
        assert_eq!(resp.progress(), Some(50.0));
        assert_eq!(resp.logging_enabled.and_then(|b| b.as_bool()), Some(true));
        assert_eq!(resp.execution_persistent, Some(LooseBool::Bool(false)));
        assert_eq!(resp.execution_metadata, Some(json!({"k": "v"})));
    }

    #[test]
    fn minimal_envelope_needs_only_the_id() {
        let resp = TaskResponse::from_value(&json!({"executionId": ID})).unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.progress(), None);
    }

    #[test]
    fn missing_or_invalid_id_is_rejected() {
        assert!(matches!(
            TaskResponse::from_value(&json!({"executionStatus": "SUCCESS"})).unwrap_err(),
            ParseError::MissingExecutionId(_)
        ));
        for bad in [json!("not-a-uuid"), json!(42), json!(null)] {
            assert!(matches!(
                TaskResponse::from_value(&json!({"executionId": bad})).unwrap_err(),
                ParseError::MissingExecutionId(_)
            ));
        }
        assert!(matches!(
            TaskResponse::from_value(&json!("SUCCESS")).unwrap_err(),
            ParseError::MissingExecutionId(_)
        ));
    }

    #[test]
    fn numeric_side_fields_accept_text_and_integral_floats() {
        let resp = TaskResponse::from_value(&json!({
            "executionId": ID,
            "executionStatus": "SUCCESS",
            "progressCurrent": "0",
            "progressMax": 100.0
        }))
        .unwrap();
        assert_eq!(resp.progress_current, Some(0));
        assert_eq!(resp.progress_max, Some(100));
        assert_eq!(resp.progress(), Some(0.0));

        let resp = TaskResponse::from_value(&json!({
            "executionId": ID,
            "progressCurrent": " 3 ",
            "progressMax": "4.0",
            "progressPercentage": "75.5"
        }))
        .unwrap();
        assert_eq!(resp.progress_current, Some(3));
        assert_eq!(resp.progress_max, Some(4));
        assert_eq!(resp.progress(), Some(75.5));
    }

    #[test]
    fn mistyped_side_fields_do_not_fail_the_envelope() {
        let resp = TaskResponse::from_value(&json!({
            "executionId": ID,
            "executionStatus": "SUCCESS",
            "progressCurrent": 2.5,
            "progressMax": {"of": 10},
            "progressPercentage": [1],
            "errorMessage": {"code": 7},
            "taskDisplayName": 12,
            "contextId": true,
            "loggingEnabled": 1
        }))
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.progress_current, None);
        assert_eq!(resp.progress_max, None);
        assert_eq!(resp.progress(), None);
        assert_eq!(resp.error_message, None);
        assert_eq!(resp.task_display_name.as_deref(), Some("12"));
        assert_eq!(resp.context_id.as_deref(), Some("true"));
        assert_eq!(resp.logging_enabled, None);
    }
}
