use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::models::coerce::{coerce_int, coerce_json, LooseScalar, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Query Engine task.
    pub struct QueryEngineTaskConfig for QueryEngine {
        adp_queryEngine_fieldName: String = "virtual_filesize".into(),
        adp_queryEngine_enableSiblingExpansion: String = "false".into(),
        adp_queryEngine_engineName: Option<String> = None,
        adp_queryEngine_engineUserPassword: String = String::new(),
        adp_queryEngine_engineTaxonomies: Vec<Value> = Vec::new(),
        adp_queryEngine_engineUserName: Option<String> = None,
        adp_queryEngine_engineType: String = "true".into(),
        adp_queryEngine_saveVariable: Option<String> = None,
        adp_queryEngine_categoryToDelete: String = String::new(),
        adp_queryEngine_activateCategoryDeletion: bool = false,
        adp_queryEngine_applicationIdentifier: String = String::new(),
        adp_queryEngine_taxonomyToDelete: String = String::new(),
        adp_queryEngine_successIfCountIs: Option<String> = None,
        adp_queryEngine_category: String = String::new(),
        adp_queryEngine_activateTagging: bool = false,
        adp_queryEngine_globalSearchId: String = String::new(),
        adp_queryEngine_aggregatedValue: String = "adp_query_engine_aggregated_value".into(),
        adp_queryEngine_AdvancedRestrictions: Vec<Value> = Vec::new(),
        adp_queryEngine_taxonomy: String = String::new(),
        adp_queryEngine_globalSearchJson: String = String::new(),
        adp_queryEngine_saveCompareString: String = "true".into(),
        adp_queryEngine_numberOfDocuments: String = "adp_query_engine_documents_count".into(),
        adp_queryEngine_siblingFields: String = "rm_attachmentroot".into(),
        adp_queryEngine_engineQuery: String = "*".into(),
        adp_queryEngine_mainQueryType: Option<String> = None,
        adp_queryEngine_waitForResult: bool = false,
        adp_queryEngine_categoryDisplayName: String = String::new(),
        adp_queryEngine_waitWhileCountIs: Option<String> = None,
        adp_queryEngine_applicationType: String = String::new(),
        adp_queryEngine_exitOnValueChanged: bool = true,
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEngineResult {
    pub adp_query_engine_aggregated_value: Option<LooseScalar>,
    pub adp_query_engine_documents_count: Option<i64>,
}

impl FromMetadata for QueryEngineResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        // Aggregated values are kept in the form the service sent them.
        let aggregated = match metadata.get("adp_query_engine_aggregated_value") {
            Some(Value::String(s)) => Some(LooseScalar::Text(s.clone())),
            _ => coerce_json(metadata, "adp_query_engine_aggregated_value")?,
        };
        Ok(Self {
            adp_query_engine_aggregated_value: aggregated,
            adp_query_engine_documents_count: coerce_int(
                metadata,
                "adp_query_engine_documents_count",
            )?,
        })
    }
}
