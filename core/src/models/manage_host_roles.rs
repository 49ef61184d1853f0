use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::models::coerce::{coerce_json_or_default, coerce_text, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Manage Host Roles task.
    pub struct ManageHostRolesTaskConfig for ManageHostRoles {
        adp_manageHostRoles_outputFilename: String = "adp_manageHostRoles_output_file_name".into(),
        adp_manageHostRoles_hostRoles: Vec<Map<String, Value>> = Vec::new(),
        adp_manageHostRoles_filterForAutomatedCreation: String = "false".into(),
        adp_manageHostRoles_extJson: String = "false".into(),
        adp_manageHostRoles_file: String = "output.json".into(),
        adp_manageHostRoles_outputJson: String = "adp_manageHostRoles_json_output".into(),
        adp_manageHostRoles_hostIdsToFilterFor: String = String::new(),
        adp_manageHostRoles_inputJson: String = String::new(),
    }
}

/// Roles per host name.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManageHostRolesResult {
    pub adp_manageHostRoles_output_file_name: Option<String>,
    pub adp_manageHostRoles_json_output: BTreeMap<String, Vec<String>>,
}

impl ManageHostRolesResult {
    pub fn roles_of(&self, host: &str) -> &[String] {
        self.adp_manageHostRoles_json_output
            .get(host)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl FromMetadata for ManageHostRolesResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_manageHostRoles_output_file_name: coerce_text(
                metadata,
                "adp_manageHostRoles_output_file_name",
            ),
            adp_manageHostRoles_json_output: coerce_json_or_default(
                metadata,
                "adp_manageHostRoles_json_output",
            )?,
        })
    }
}
