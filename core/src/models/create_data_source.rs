use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::coerce::{coerce_text, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Create Data Source task.
    pub struct CreateDataSourceTaskConfig for CreateDataSource {
        adp_createDataSource_abortOnExistingDataSource: bool = false,
        adp_createDataSource_applicationIdentifier: Option<String> = None,
        adp_createDataSource_choosenHostNameParameter: String = "adp_hostname".into(),
        adp_createDataSource_choosenHostMemoryRatio: String = "adp_chosen_host_memory_ratio".into(),
        adp_createDataSource_chosenHostCpuLoad: String = "adp_chosen_host_cpu_load".into(),
        adp_createDataSource_dataSourceSystemTemplateDisplayName: String = "Server - file share".into(),
        adp_createDataSource_usedTemplate: String = "adp_used_data_source_template".into(),
        adp_createDataSource_hostCpuLoadThreshold: String = "50".into(),
        adp_createDataSource_createdDataSourceNameParameter: String = "adp_created_data_source_name".into(),
        adp_createDataSource_retryMaxNumberRunningCrawlers: String = "30".into(),
        adp_createDataSource_choosenHostMemory: String = "adp_chosen_host_memory".into(),
        adp_createDataSource_workspaceIdentifier: Option<String> = None,
        adp_createDataSource_hostIdentifier: Option<String> = None,
        adp_createDataSource_hostMemoryLimit: String = "0".into(),
        adp_createDataSource_maxNumberRunningCrawlers: String = "0".into(),
        adp_createDataSource_engineIdentifier: Option<String> = None,
        adp_createDataSource_engineBoxDocThreshold: String = "1000000".into(),
        adp_createDataSource_hostMemoryLimitRatio: String = "0".into(),
        adp_createDataSource_choosenEngineNameParameter: String = "adp_chosen_engine".into(),
        adp_createDataSource_hostRolesBlackList: Option<String> = None,
        adp_createDataSource_dataSourceIdentifier: String = "{datasource_id}".into(),
        adp_createDataSource_createdDataSourceDisplaynameParameter: String = "adp_created_data_source_displayname".into(),
        adp_createDataSource_dataSourceTemplate: String = String::new(),
        adp_createDataSource_dataSourceName: String = "{datasource_name}".into(),
    }
}

/// Placement decisions reported by Create Data Source. Numbers are rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDataSourceResult {
    pub adp_hostname: Option<String>,
    pub adp_chosen_host_cpu_load: Option<String>,
    pub adp_chosen_host_memory_ratio: Option<String>,
    pub adp_chosen_host_memory: Option<String>,
    pub adp_used_data_source_template: Option<String>,
    pub adp_created_data_source_name: Option<String>,
    pub adp_created_data_source_displayname: Option<String>,
    pub adp_chosen_engine: Option<String>,
}

impl FromMetadata for CreateDataSourceResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        let text = |key| coerce_text(metadata, key);
        Ok(Self {
            adp_hostname: text("adp_hostname"),
            adp_chosen_host_cpu_load: text("adp_chosen_host_cpu_load"),
            adp_chosen_host_memory_ratio: text("adp_chosen_host_memory_ratio"),
            adp_chosen_host_memory: text("adp_chosen_host_memory"),
            adp_used_data_source_template: text("adp_used_data_source_template"),
            adp_created_data_source_name: text("adp_created_data_source_name"),
            adp_created_data_source_displayname: text("adp_created_data_source_displayname"),
            adp_chosen_engine: text("adp_chosen_engine"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn numeric_values_become_text() {
        let md: Metadata = json!({
            "adp_hostname": "host-crawler-01",
            "adp_chosen_host_cpu_load": 25.5,
            "adp_chosen_host_memory_ratio": "0.45",
            "adp_chosen_host_memory": 16384,
            "adp_created_data_source_name": "DS_FileShare_001",
            "adp_chosen_engine": null
        })
        .as_object()
        .cloned()
        .unwrap();

        let r = CreateDataSourceResult::from_metadata(&md).unwrap();
        assert_eq!(r.adp_hostname.as_deref(), Some("host-crawler-01"));
        assert_eq!(r.adp_chosen_host_cpu_load.as_deref(), Some("25.5"));
        assert_eq!(r.adp_chosen_host_memory.as_deref(), Some("16384"));
        assert_eq!(r.adp_used_data_source_template, None);
        assert_eq!(r.adp_chosen_engine, None);
    }
}
