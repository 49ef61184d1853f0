use adp_core::api::{all_specs, CliError, ListEntitiesResult, TaskResponse, TaskResult};
use serde::Serialize;
use serde_json::{json, Value};

use crate::commands::cli::OutputFormat;

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Command(e.to_string()))
}

pub fn task_table(format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => {
            let tasks: Vec<Value> = all_specs()
                .map(|s| {
                    json!({
                        "key": s.key(),
                        "taskType": s.task_type,
                        "displayName": s.display_name,
                        "description": s.description,
                    })
                })
                .collect();
            to_json(&tasks)
        }
        OutputFormat::Text => {
            let width = all_specs().map(|s| s.key().len()).max().unwrap_or(0);
            Ok(all_specs()
                .map(|s| format!("{:width$}  {}", s.key(), s.description))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

pub fn entities(result: &ListEntitiesResult, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Text => {
            let mut lines: Vec<String> = result
                .adp_entities_json_output
                .iter()
                .map(|e| {
                    let id = e.get("id").and_then(Value::as_str).unwrap_or("-");
                    match e.get("displayName").and_then(Value::as_str) {
                        Some(name) => format!("{id}  {name}"),
                        None => id.to_string(),
                    }
                })
                .collect();
            lines.push(format!("{} entities", result.adp_entities_json_output.len()));
            Ok(lines.join("\n"))
        }
    }
}

pub fn result(result: &TaskResult, format: OutputFormat) -> Result<String, CliError> {
    let value = result
        .to_json()
        .map_err(|e| CliError::Command(e.to_string()))?;
    match format {
        OutputFormat::Json => to_json(&value),
        OutputFormat::Text => Ok(text_fields(&value)),
    }
}

/// One `field: value` line per top-level field; nested values stay compact JSON.
fn text_fields(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                Value::Null => format!("{k}: -"),
                other => format!("{k}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

pub fn status(body: Option<&Value>, format: OutputFormat) -> Result<String, CliError> {
    let Some(body) = body else {
        return Ok(match format {
            OutputFormat::Json => "null".to_string(),
            OutputFormat::Text => "no status returned".to_string(),
        });
    };
    match format {
        OutputFormat::Json => to_json(body),
        OutputFormat::Text => {
            let response = TaskResponse::from_value(body)
                .map_err(|e| CliError::Command(e.to_string()))?;
            let mut out = format!(
                "{}: {}",
                response.execution_id,
                response.execution_status.as_deref().unwrap_or("UNKNOWN")
            );
            if let Some(pct) = response.progress() {
                out.push_str(&format!(" ({pct:.0}%)"));
            }
            Ok(out)
        }
    }
}
