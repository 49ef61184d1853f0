use serde_json::Value;

use crate::error::ValidationError;
use crate::models::TaskConfig;
use crate::registry::TaskSpec;

/// Applies the registry's default overrides to `config` in place.
///
/// A field is overwritten only while it still deep-equals the declared default
/// of its configuration type; values the caller changed are left alone and
/// fields the configuration does not have are skipped. Returns the fields
/// that were changed.
pub fn apply_overrides<C: TaskConfig>(
    spec: &TaskSpec,
    config: &mut C,
) -> Result<Vec<&'static str>, ValidationError> {
    if spec.defaults.is_empty() {
        return Ok(Vec::new());
    }

    let declared = config
        .declared_defaults()
        .map_err(|e| ValidationError::Override {
            field: spec.key().to_string(),
            reason: format!("declared defaults are not serializable: {e}"),
        })?;
    let mut current = config.to_wire().map_err(|e| ValidationError::Override {
        field: spec.key().to_string(),
        reason: e.to_string(),
    })?;
    let Value::Object(fields) = &mut current else {
        return Err(ValidationError::Override {
            field: spec.key().to_string(),
            reason: "configuration is not a JSON object".to_string(),
        });
    };

    let mut applied = Vec::new();
    for &(field, value) in spec.defaults {
        let value = value.to_value();
        let declared_default = declared.get(field).unwrap_or(&Value::Null);
        let unset = match fields.get(field) {
            None => continue,
            Some(now) => now == declared_default && *now != value,
        };
        if unset {
            fields.insert(field.to_string(), value);
            applied.push(field);
        }
    }

    if applied.is_empty() {
        return Ok(applied);
    }

    config
        .update_from_value(current)
        .map_err(|e| ValidationError::Override {
            field: applied.join(","),
            reason: e.to_string(),
        })?;
    tracing::debug!(
        target: "adp.registry",
        stage = "overrides.applied",
        task = spec.task_type,
        fields = ?applied
    );
    Ok(applied)
}
