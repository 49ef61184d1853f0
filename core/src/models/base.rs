use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::registry::TaskKind;

/// Execution flags shared by every task configuration.
///
/// Flattened into each task's `taskConfiguration` object, so the keys sit next
/// to the task-specific ones on the wire.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseTaskConfig {
    pub adp_loggingEnabled: bool,
    pub adp_executionPersistent: bool,
    pub adp_progressTaskTimeout: i64,
    pub adp_taskActive: bool,
    pub adp_taskTimeout: i64,
    pub adp_cleanUpHistory: bool,
}

impl Default for BaseTaskConfig {
    fn default() -> Self {
        Self {
            adp_loggingEnabled: true,
            adp_executionPersistent: true,
            adp_progressTaskTimeout: 0,
            adp_taskActive: true,
            adp_taskTimeout: 0,
            adp_cleanUpHistory: false,
        }
    }
}

/// A task configuration that can be submitted through a [`crate::session::Session`].
pub trait TaskConfig: Serialize + Send + Sync {
    /// Task this configuration belongs to.
    fn kind(&self) -> TaskKind;

    /// Wire object holding the configuration type's declared defaults.
    fn declared_defaults(&self) -> Result<Value, serde_json::Error>;

    /// Replace this configuration with the decoded wire object.
    fn update_from_value(&mut self, value: Value) -> Result<(), serde_json::Error>;

    /// Field-level checks that must hold before the task is submitted.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// The flat `taskConfiguration` object, every field included.
    fn to_wire(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

pub(crate) fn always_valid<T>(_config: &T) -> Result<(), ValidationError> {
    Ok(())
}

pub(crate) fn declared_defaults_of<T: Default + Serialize>(
) -> Result<Value, serde_json::Error> {
    serde_json::to_value(T::default())
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn is_blank_opt(value: Option<&str>) -> bool {
    value.map(is_blank).unwrap_or(true)
}
