use serde::Serialize;

use crate::error::ParseError;
use crate::models::{
    CreateDataSourceResult, CreateOcrJobResult, ExportDocumentsResult, ListEntitiesResult,
    ManageHostRolesResult, ManageUsersAndGroupsResult, QueryEngineResult, ReadConfigurationResult,
    ReadServiceAlertsResult, StartApplicationResult, TaxonomyStatisticResult,
};
use crate::registry::TaskKind;

macro_rules! task_results {
    ($( $variant:ident($ty:ty) ),* $(,)?) => {
        /// Parsed result of any registered task.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum TaskResult {
            $( $variant($ty), )*
        }

        impl TaskResult {
            pub fn kind(&self) -> TaskKind {
                match self {
                    $( Self::$variant(_) => TaskKind::$variant, )*
                }
            }

            pub fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )*
                }
            }
        }

        $(
            impl From<$ty> for TaskResult {
                fn from(result: $ty) -> Self {
                    Self::$variant(result)
                }
            }

            impl TryFrom<TaskResult> for $ty {
                type Error = ParseError;

                fn try_from(result: TaskResult) -> Result<Self, Self::Error> {
                    match result {
                        TaskResult::$variant(inner) => Ok(inner),
                        other => Err(ParseError::UnexpectedResult {
                            expected: stringify!($variant),
                            actual: other.variant_name(),
                        }),
                    }
                }
            }
        )*
    };
}

task_results! {
    ListEntities(ListEntitiesResult),
    ManageHostRoles(ManageHostRolesResult),
    ReadConfiguration(ReadConfigurationResult),
    QueryEngine(QueryEngineResult),
    TaxonomyStatistic(TaxonomyStatisticResult),
    ExportDocuments(ExportDocumentsResult),
    CreateDataSource(CreateDataSourceResult),
    ManageUsersAndGroups(ManageUsersAndGroupsResult),
    ReadServiceAlerts(ReadServiceAlertsResult),
    StartApplication(StartApplicationResult),
    CreateOcrJob(CreateOcrJobResult),
}

impl TaskResult {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn try_from_rejects_other_variants() {
        let result = TaskResult::from(StartApplicationResult::default());
        let err = ListEntitiesResult::try_from(result.clone()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedResult {
                expected: "ListEntities",
                actual: "StartApplication"
            }
        ));
        assert_eq!(
            StartApplicationResult::try_from(result).unwrap(),
            StartApplicationResult::default()
        );
    }

    #[test]
    fn serialises_without_a_tag() {
        let result = TaskResult::from(StartApplicationResult {
            adp_started_application_url: Some("http://h".into()),
        });
        assert_eq!(
            result.to_json().unwrap(),
            serde_json::json!({"adp_started_application_url": "http://h"})
        );
    }
}
