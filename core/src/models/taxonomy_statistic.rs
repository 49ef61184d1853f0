use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ParseError, ValidationError};
use crate::models::base::is_blank_opt;
use crate::models::coerce::{coerce_json, Metadata};
use crate::registry::FromMetadata;

/// Taxonomy to report on, with the counting mode and category cap.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTaxonomy {
    pub Taxonomy: String,
    #[serde(default = "default_mode")]
    pub Mode: String,
    #[serde(default = "default_max_categories")]
    pub MaximumNumberOfCategories: i64,
}

fn default_mode() -> String {
    "Category counts".to_string()
}

fn default_max_categories() -> i64 {
    100
}

impl OutputTaxonomy {
    pub fn new(taxonomy: impl Into<String>) -> Self {
        Self {
            Taxonomy: taxonomy.into(),
            Mode: default_mode(),
            MaximumNumberOfCategories: default_max_categories(),
        }
    }
}

task_config! {
    /// Configuration for the Taxonomy Statistic task.
    ///
    /// Exactly one of `adp_taxonomyStatistic_applicationIdentifier` and
    /// `adp_taxonomyStatistic_engineName` must be set before submission.
    pub struct TaxonomyStatisticTaskConfig for TaxonomyStatistic validated_by validate_target {
        adp_taxonomyStatistic_outputJsonAbsFilePath: String = "adp_taxonomy_statistics_json_file_path".into(),
        adp_taxonomyStatistic_applicationIdentifier: Option<String> = None,
        adp_taxonomyStatistic_mainQueryType: Option<String> = None,
        adp_taxonomyStatistic_engineUserName: String = "{adp_user}".into(),
        adp_taxonomyStatistic_applicationType: String = String::new(),
        adp_taxonomyStatistic_computeCounts: String = "true".into(),
        adp_taxonomyStatistic_outputJsonFilePath: Option<String> = None,
        adp_taxonomyStatistic_engineTaxonomies: Vec<Value> = Vec::new(),
        adp_taxonomyStatistic_engineUserPassword: String = String::new(),
        adp_taxonomyStatistic_outputXmlAbsFilePath: String = "adp_taxonomy_statistics_xml_file_path".into(),
        adp_taxonomyStatistic_engineQuery: String = "*".into(),
        adp_taxonomyStatistic_listCategoryProperties: String = "false".into(),
        adp_taxonomyStatistic_outputTaxonomies: Vec<OutputTaxonomy> = Vec::new(),
        adp_taxonomyStatistic_outputJson: String = "adp_taxonomy_statistics_json_output".into(),
        adp_taxonomyStatistic_engineType: String = "true".into(),
        adp_taxonomyStatistic_outputXmlFilePath: Option<String> = None,
        adp_taxonomyStatistic_outputFields: Vec<Value> = Vec::new(),
        adp_taxonomyStatistic_engineGlobalSearch: String = String::new(),
        adp_taxonomyStatistic_listDocuments: String = "false".into(),
        adp_taxonomyStatistic_engineName: Option<String> = None,
    }
}

impl TaxonomyStatisticTaskConfig {
    pub fn for_application(application_id: impl Into<String>) -> Self {
        Self {
            adp_taxonomyStatistic_applicationIdentifier: Some(application_id.into()),
            ..Self::default()
        }
    }

    pub fn for_engine(engine_name: impl Into<String>) -> Self {
        Self {
            adp_taxonomyStatistic_engineName: Some(engine_name.into()),
            ..Self::default()
        }
    }

    pub fn with_taxonomy(mut self, taxonomy: OutputTaxonomy) -> Self {
        self.adp_taxonomyStatistic_outputTaxonomies.push(taxonomy);
        self
    }
}

fn validate_target(cfg: &TaxonomyStatisticTaskConfig) -> Result<(), ValidationError> {
    const APP: &str = "adp_taxonomyStatistic_applicationIdentifier";
    const ENGINE: &str = "adp_taxonomyStatistic_engineName";

    let has_app = !is_blank_opt(cfg.adp_taxonomyStatistic_applicationIdentifier.as_deref());
    let has_engine = !is_blank_opt(cfg.adp_taxonomyStatistic_engineName.as_deref());
    match (has_app, has_engine) {
        (true, true) => Err(ValidationError::MutuallyExclusive {
            first: APP,
            second: ENGINE,
        }),
        (false, false) => Err(ValidationError::MissingEither {
            first: APP,
            second: ENGINE,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameter {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: String,
    #[serde(default)]
    pub category: Vec<Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyStatistics {
    #[serde(default)]
    pub taxonomy: Vec<Taxonomy>,
}

/// Category counts per taxonomy, plus the search that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyStatisticsOutput {
    pub date: String,
    #[serde(rename = "searchParameter", default)]
    pub search_parameter: Vec<SearchParameter>,
    pub statistics: TaxonomyStatistics,
}

impl TaxonomyStatisticsOutput {
    pub fn taxonomy(&self, id: &str) -> Option<&Taxonomy> {
        self.statistics.taxonomy.iter().find(|t| t.id == id)
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyStatisticResult {
    pub adp_taxonomy_statistics_json_output: Option<TaxonomyStatisticsOutput>,
}

impl FromMetadata for TaxonomyStatisticResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_taxonomy_statistics_json_output: coerce_json(
                metadata,
                "adp_taxonomy_statistics_json_output",
            )?,
        })
    }
}
