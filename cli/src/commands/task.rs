//! Task commands: listing, synchronous runs, submission and status polling.
use std::path::Path;
use std::time::Duration;

use adp_core::api as core_api;
use core_api::{AnyTaskConfig, CallOptions, CliError, Session, TaskConfig, TaskKind, TaskRequest};
use serde_json::{json, Map, Value};

use crate::commands::cli::{ListEntitiesArgs, OutputFormat, StatusArgs, TaskArgs};
use crate::render;

pub fn handle_tasks(format: OutputFormat) -> Result<String, CliError> {
    render::task_table(format)
}

pub async fn handle_list_entities(
    args: ListEntitiesArgs,
    session: &Session,
    format: OutputFormat,
) -> Result<String, CliError> {
    let mut config = core_api::ListEntitiesTaskConfig::for_type(args.entity_type);
    if let Some(id) = args.id {
        config = config.with_id(id);
    }
    let result = session
        .list_entities(config, &CallOptions::default())
        .await?;
    render::entities(&result, format)
}

pub async fn handle_run(
    args: TaskArgs,
    session: &Session,
    format: OutputFormat,
) -> Result<String, CliError> {
    let opts = call_options(&args)?;
    let mut config = build_config(&args.key, args.config.as_deref(), &args.set)?;
    let result = session.run_task(&args.key, &mut config, &opts).await?;
    render::result(&result, format)
}

pub async fn handle_submit(
    args: TaskArgs,
    session: &Session,
    format: OutputFormat,
) -> Result<String, CliError> {
    let opts = call_options(&args)?;
    let mut config = build_config(&args.key, args.config.as_deref(), &args.set)?;
    let id = session
        .run_task_async(&args.key, &mut config, &opts)
        .await?;
    Ok(match format {
        OutputFormat::Json => json!({ "executionId": id }).to_string(),
        OutputFormat::Text => id.to_string(),
    })
}

pub async fn handle_status(
    args: StatusArgs,
    session: &Session,
    format: OutputFormat,
) -> Result<String, CliError> {
    let kind: TaskKind = args.key.parse()?;
    let request = TaskRequest::new(
        kind.spec().task_type,
        json!({ "executionId": args.execution_id }),
    );
    let body = session
        .status_and_progress(&request, &CallOptions::default())
        .await?;
    render::status(body.as_ref(), format)
}

fn call_options(args: &TaskArgs) -> Result<CallOptions, CliError> {
    let mut opts = CallOptions::new();
    for raw in &args.headers {
        let (name, value) = split_pair(raw, "--header")?;
        opts = opts.header(name, value);
    }
    if let Some(ms) = args.call_timeout_ms {
        opts = opts.timeout(Duration::from_millis(ms));
    }
    Ok(opts)
}

fn split_pair<'a>(raw: &'a str, flag: &str) -> Result<(&'a str, &'a str), CliError> {
    let (k, v) = raw
        .split_once('=')
        .ok_or_else(|| CliError::Command(format!("{flag} expects NAME=VALUE, got {raw:?}")))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(CliError::Command(format!("{flag} has an empty name: {raw:?}")));
    }
    Ok((k, v))
}

/// Builds the configuration for `key` from an optional file and `--set` pairs.
///
/// `--set` values for text and optional fields are taken verbatim; other
/// fields parse the value as JSON and fall back to text.
pub fn build_config(
    key: &str,
    file: Option<&Path>,
    sets: &[String],
) -> Result<AnyTaskConfig, CliError> {
    let kind: TaskKind = key.parse()?;
    let mut fields = match file {
        Some(path) => read_config_file(path)?,
        None => Map::new(),
    };

    let defaults = AnyTaskConfig::default_for(kind)
        .to_wire()
        .map_err(|e| CliError::Command(e.to_string()))?;
    for raw in sets {
        let (field, value) = split_pair(raw, "--set")?;
        let current = defaults.get(field).ok_or_else(|| {
            CliError::Command(format!("task {key} has no configuration field {field:?}"))
        })?;
        fields.insert(field.to_string(), set_value(current, value));
    }

    AnyTaskConfig::from_value(kind, Value::Object(fields)).map_err(|e| CliError::Adp(e.into()))
}

fn set_value(current: &Value, raw: &str) -> Value {
    if current.is_string() || current.is_null() {
        return Value::String(raw.to_string());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn read_config_file(path: &Path) -> Result<Map<String, Value>, CliError> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = if path.extension().is_some_and(|ext| ext == "toml") {
        let table: toml::Table =
            toml::from_str(&text).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        serde_json::to_value(table).map_err(|e| CliError::Config(e.to_string()))?
    } else {
        serde_json::from_str(&text)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?
    };
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Config(format!(
            "{}: expected an object of configuration fields, got {other}",
            path.display()
        ))),
    }
}
