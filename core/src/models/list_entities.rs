use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::models::coerce::{coerce_json_or_default, coerce_text, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the List Entities task.
    pub struct ListEntitiesTaskConfig for ListEntities {
        adp_listEntities_file: String = "output.json".into(),
        adp_listEntities_numberOfEntities: String = "-1".into(),
        adp_listEntities_axcRequestTimeoutSeconds: i64 = 900,
        adp_listEntities_userHasAccess: String = String::new(),
        adp_listEntities_whiteList: String = "id,displayName".into(),
        adp_listEntities_relatedEntity: String = String::new(),
        adp_listEntities_workspace: String = String::new(),
        adp_listEntities_status: String = String::new(),
        adp_listEntities_axcServiceCoreAddress: String = String::new(),
        adp_listEntities_relatedEntityType: String = String::new(),
        adp_listEntities_type: String = String::new(),
        adp_listEntities_httpsKeystoreFile: Option<String> = None,
        adp_listEntities_httpsPassword: String = String::new(),
        adp_listEntities_axcConnectTimeoutSeconds: i64 = 300,
        adp_listEntities_axcServicePassword: String = String::new(),
        adp_listEntities_startingEntity: String = "1".into(),
        adp_listEntities_outputJson: String = "adp_entities_json_output".into(),
        adp_listEntities_descriptionSettingFilterValueDateFormat: String = "yyyy-MM-dd".into(),
        adp_listEntities_descriptionFilters: Vec<String> = Vec::new(),
        adp_listEntities_axcServiceUser: String = String::new(),
        adp_listEntities_axcFields: String = String::new(),
        adp_listEntities_httpsTrustCertificate: String = String::new(),
        adp_listEntities_host: String = String::new(),
        adp_listEntities_outputFilename: String = "adp_entities_output_file_name".into(),
        adp_listEntities_id: String = String::new(),
        adp_listEntities_httpsAllowUntrustedHosts: String = "true".into(),
    }
}

impl ListEntitiesTaskConfig {
    /// Configuration listing the entities of one type, optionally narrowed to one id.
    pub fn for_type(entity_type: impl Into<String>) -> Self {
        Self {
            adp_listEntities_type: entity_type.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.adp_listEntities_id = id.into();
        self
    }
}

/// Entities returned by List Entities. Entity objects are kept verbatim.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListEntitiesResult {
    pub adp_entities_output_file_name: Option<String>,
    pub adp_entities_json_output: Vec<Map<String, Value>>,
}

impl ListEntitiesResult {
    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.adp_entities_json_output
            .iter()
            .filter_map(|e| e.get("id").and_then(Value::as_str))
    }
}

impl FromMetadata for ListEntitiesResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_entities_output_file_name: coerce_text(metadata, "adp_entities_output_file_name"),
            adp_entities_json_output: coerce_json_or_default(metadata, "adp_entities_json_output")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn md(v: Value) -> Metadata {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn defaults_match_the_service_schema() {
        let cfg = ListEntitiesTaskConfig::default();
        assert_eq!(cfg.adp_listEntities_whiteList, "id,displayName");
        assert_eq!(cfg.adp_listEntities_axcRequestTimeoutSeconds, 900);
        assert_eq!(cfg.adp_listEntities_httpsKeystoreFile, None);

        let wire = cfg.to_wire().unwrap();
        assert_eq!(wire["adp_listEntities_httpsKeystoreFile"], Value::Null);
        assert_eq!(wire["adp_loggingEnabled"], json!(true));
        assert_eq!(wire["adp_listEntities_descriptionFilters"], json!([]));
    }

    #[test]
    fn builder_sets_type_and_id() {
        let cfg = ListEntitiesTaskConfig::for_type("singleMindServer").with_id("demo01");
        assert_eq!(cfg.adp_listEntities_type, "singleMindServer");
        assert_eq!(cfg.adp_listEntities_id, "demo01");
    }

    #[test]
    fn parses_native_and_encoded_entities_the_same() {
        let entities = json!([
            {"id": "singleMindServer.demo01", "displayName": "Demo 01"},
            {"id": "singleMindServer.demo02", "displayName": "Demo 02", "hostId": "h1"}
        ]);
        let native = md(json!({
            "adp_entities_output_file_name": "/tmp/output.json",
            "adp_entities_json_output": entities.clone(),
        }));
        let encoded = md(json!({
            "adp_entities_output_file_name": "/tmp/output.json",
            "adp_entities_json_output": entities.to_string(),
        }));

        let a = ListEntitiesResult::from_metadata(&native).unwrap();
        let b = ListEntitiesResult::from_metadata(&encoded).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.entity_ids().collect::<Vec<_>>(),
            vec!["singleMindServer.demo01", "singleMindServer.demo02"]
        );
        assert_eq!(a.adp_entities_json_output[1]["hostId"], json!("h1"));
    }

    #[test]
    fn missing_keys_give_empty_result() {
        let r = ListEntitiesResult::from_metadata(&md(json!({"other": 1}))).unwrap();
        assert_eq!(r, ListEntitiesResult::default());
    }
}
