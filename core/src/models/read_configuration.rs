use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::models::coerce::{coerce_json_or_default, coerce_text, Metadata};
use crate::registry::FromMetadata;

/// One configuration to read. Serialised with the service's spaced keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigToRead {
    #[serde(rename = "Configuration ID")]
    pub configuration_id: String,
    #[serde(rename = "Dynamic Component Names")]
    pub dynamic_component_names: String,
    #[serde(rename = "Field list")]
    pub field_list: String,
    #[serde(rename = "Name value list")]
    pub name_value_list: String,
    #[serde(rename = "Application type")]
    pub application_type: String,
    #[serde(rename = "Entity type")]
    pub entity_type: String,
}

impl ConfigToRead {
    pub fn new(configuration_id: impl Into<String>) -> Self {
        Self {
            configuration_id: configuration_id.into(),
            ..Self::default()
        }
    }
}

task_config! {
    /// Configuration for the Read Configuration task.
    pub struct ReadConfigurationTaskConfig for ReadConfiguration {
        adp_readConfiguration_outputJson: String = "adp_entities_json_output".into(),
        adp_readConfiguration_configsToRead: Vec<ConfigToRead> = Vec::new(),
        adp_readConfiguration_outputFilename: String = "adp_entities_output_file_name".into(),
        adp_readConfiguration_entityIdToRead: String = String::new(),
        adp_readConfiguration_file: String = "output.json".into(),
        adp_readConfiguration_fileFormat: String = "JSON".into(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellInfo {
    pub value: Value,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterInfo {
    pub cells: Vec<Vec<CellInfo>>,
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticInfo {
    #[serde(rename = "Parameters")]
    pub parameters: Vec<ParameterInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalInfo {
    #[serde(rename = "Static")]
    pub static_info: StaticInfo,
}

/// A single configuration tree as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationInfo {
    #[serde(rename = "DynamicComponents")]
    pub dynamic_components: Map<String, Value>,
    #[serde(rename = "Global")]
    pub global: GlobalInfo,
}

impl ConfigurationInfo {
    pub fn parameter(&self, name: &str) -> Option<&ParameterInfo> {
        self.global
            .static_info
            .parameters
            .iter()
            .find(|p| p.name == name)
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadConfigurationResult {
    pub adp_readConfiguration_output_file_name: Option<String>,
    pub adp_readConfiguration_json_output: BTreeMap<String, ConfigurationInfo>,
}

impl FromMetadata for ReadConfigurationResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_readConfiguration_output_file_name: coerce_text(
                metadata,
                "adp_readConfiguration_output_file_name",
            ),
            adp_readConfiguration_json_output: coerce_json_or_default(
                metadata,
                "adp_readConfiguration_json_output",
            )?,
        })
    }
}
