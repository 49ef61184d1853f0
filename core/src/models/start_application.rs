use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::coerce::{coerce_text, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Start Application task.
    pub struct StartApplicationTaskConfig for StartApplication {
        adp_startApplication_applicationIdentifier: String = "{adp_create_application_application_identifier}".into(),
        adp_startApplication_useHttps: bool = false,
        adp_startApplication_applicationUrl: String = "adp_started_application_url".into(),
        adp_abortWfOnFailure: bool = true,
    }
}

impl StartApplicationTaskConfig {
    pub fn for_application(application_id: impl Into<String>) -> Self {
        Self {
            adp_startApplication_applicationIdentifier: application_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartApplicationResult {
    pub adp_started_application_url: Option<String>,
}

impl FromMetadata for StartApplicationResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_started_application_url: coerce_text(metadata, "adp_started_application_url"),
        })
    }
}
