use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::TaskConfig;
use crate::registry::TaskSpec;

/// Body of every PUT sent to the service.
///
/// `taskConfiguration` carries every configuration field, unset optionals as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub task_type: String,
    pub task_configuration: Value,
    #[serde(default)]
    pub task_description: String,
    #[serde(default)]
    pub task_display_name: String,
}

impl TaskRequest {
    pub fn new(task_type: impl Into<String>, task_configuration: Value) -> Self {
        Self {
            task_type: task_type.into(),
            task_configuration,
            task_description: String::new(),
            task_display_name: String::new(),
        }
    }

    /// Envelope for a registered task, using the registry's display metadata.
    pub fn for_task<C: TaskConfig>(spec: &TaskSpec, config: &C) -> serde_json::Result<Self> {
        Ok(Self {
            task_type: spec.task_type.to_string(),
            task_configuration: config.to_wire()?,
            task_description: spec.description.to_string(),
            task_display_name: spec.display_name.to_string(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = description.into();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.task_display_name = display_name.into();
        self
    }
}
