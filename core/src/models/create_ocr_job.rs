use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::models::coerce::{coerce_json, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Create OCR Job task. Normally submitted asynchronously.
    pub struct CreateOcrJobTaskConfig for CreateOcrJob {
        adp_createOcrJob_engineUserPassword: String = String::new(),
        adp_createOcrJob_query: String = "*".into(),
        adp_createOcrJob_listOfJobProperties: String = String::new(),
        adp_createOcrJob_engineType: String = "true".into(),
        adp_createOcrJob_AdvancedRestrictions: Vec<Value> = Vec::new(),
        adp_createOcrJob_globalSearchJson: String = String::new(),
        adp_createOcrJob_wait: String = "false".into(),
        adp_createOcrJob_engineName: Option<String> = None,
        adp_createOcrJob_jobDescription: String = String::new(),
        adp_createOcrJob_applicationIdentifier: String = String::new(),
        adp_createOcrJob_jobPriority: String = "10".into(),
        adp_createOcrJob_jobName: String = String::new(),
        adp_createOcrJob_restrictions: Vec<Value> = Vec::new(),
        adp_createOcrJob_engineUserName: Option<String> = None,
        adp_createOcrJob_mainQueryType: Option<String> = None,
        adp_createOcrJob_applicationType: String = String::new(),
        adp_createOcrJob_globalSearchId: String = String::new(),
        adp_createOcrJob_jsonOutputVariable: String = "adp_createOcrJob_json_output".into(),
    }
}

/// Output of a synchronously executed OCR job, if the service produced one.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOcrJobResult {
    pub adp_createOcrJob_json_output: Option<Value>,
}

impl FromMetadata for CreateOcrJobResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_createOcrJob_json_output: coerce_json(metadata, "adp_createOcrJob_json_output")?,
        })
    }
}
