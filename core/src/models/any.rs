use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::{
    CreateDataSourceTaskConfig, CreateOcrJobTaskConfig, ExportDocumentsTaskConfig,
    ListEntitiesTaskConfig, ManageHostRolesTaskConfig, ManageUsersAndGroupsTaskConfig,
    QueryEngineTaskConfig, ReadConfigurationTaskConfig, ReadServiceAlertsTaskConfig,
    StartApplicationTaskConfig, TaskConfig, TaxonomyStatisticTaskConfig,
};
use crate::registry::TaskKind;

/// A configuration whose task is only known at runtime (e.g. read from a file).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyTaskConfig {
    ListEntities(ListEntitiesTaskConfig),
    ManageHostRoles(ManageHostRolesTaskConfig),
    ReadConfiguration(ReadConfigurationTaskConfig),
    QueryEngine(QueryEngineTaskConfig),
    TaxonomyStatistic(TaxonomyStatisticTaskConfig),
    ExportDocuments(ExportDocumentsTaskConfig),
    CreateDataSource(CreateDataSourceTaskConfig),
    ManageUsersAndGroups(ManageUsersAndGroupsTaskConfig),
    ReadServiceAlerts(ReadServiceAlertsTaskConfig),
    StartApplication(StartApplicationTaskConfig),
    CreateOcrJob(CreateOcrJobTaskConfig),
}

macro_rules! dispatch {
    ($self:expr, $cfg:ident => $body:expr) => {
        match $self {
            AnyTaskConfig::ListEntities($cfg) => $body,
            AnyTaskConfig::ManageHostRoles($cfg) => $body,
            AnyTaskConfig::ReadConfiguration($cfg) => $body,
            AnyTaskConfig::QueryEngine($cfg) => $body,
            AnyTaskConfig::TaxonomyStatistic($cfg) => $body,
            AnyTaskConfig::ExportDocuments($cfg) => $body,
            AnyTaskConfig::CreateDataSource($cfg) => $body,
            AnyTaskConfig::ManageUsersAndGroups($cfg) => $body,
            AnyTaskConfig::ReadServiceAlerts($cfg) => $body,
            AnyTaskConfig::StartApplication($cfg) => $body,
            AnyTaskConfig::CreateOcrJob($cfg) => $body,
        }
    };
}

impl AnyTaskConfig {
    /// Zero-argument configuration for `kind`.
    pub fn default_for(kind: TaskKind) -> Self {
        match kind {
            TaskKind::ListEntities => Self::ListEntities(Default::default()),
            TaskKind::ManageHostRoles => Self::ManageHostRoles(Default::default()),
            TaskKind::ReadConfiguration => Self::ReadConfiguration(Default::default()),
            TaskKind::QueryEngine => Self::QueryEngine(Default::default()),
            TaskKind::TaxonomyStatistic => Self::TaxonomyStatistic(Default::default()),
            TaskKind::ExportDocuments => Self::ExportDocuments(Default::default()),
            TaskKind::CreateDataSource => Self::CreateDataSource(Default::default()),
            TaskKind::ManageUsersAndGroups => Self::ManageUsersAndGroups(Default::default()),
            TaskKind::ReadServiceAlerts => Self::ReadServiceAlerts(Default::default()),
            TaskKind::StartApplication => Self::StartApplication(Default::default()),
            TaskKind::CreateOcrJob => Self::CreateOcrJob(Default::default()),
        }
    }

    /// Decodes a (possibly partial) wire object as the configuration for `kind`.
    /// Missing keys keep their defaults.
    pub fn from_value(kind: TaskKind, value: Value) -> Result<Self, ValidationError> {
        let mut cfg = Self::default_for(kind);
        let shape = |e: serde_json::Error| ValidationError::Shape {
            task: kind.key().to_string(),
            reason: e.to_string(),
        };
        let value = match value {
            Value::Null => return Ok(cfg),
            Value::Object(_) => value,
            other => {
                return Err(ValidationError::Shape {
                    task: kind.key().to_string(),
                    reason: format!("expected a JSON object, got {other}"),
                })
            }
        };
        dispatch!(&mut cfg, c => c.update_from_value(value).map_err(shape))?;
        Ok(cfg)
    }
}

impl TaskConfig for AnyTaskConfig {
    fn kind(&self) -> TaskKind {
        dispatch!(self, c => c.kind())
    }

    fn declared_defaults(&self) -> Result<Value, serde_json::Error> {
        dispatch!(self, c => c.declared_defaults())
    }

    fn update_from_value(&mut self, value: Value) -> Result<(), serde_json::Error> {
        dispatch!(self, c => c.update_from_value(value))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        dispatch!(self, c => c.validate())
    }

    fn to_wire(&self) -> Result<Value, serde_json::Error> {
        dispatch!(self, c => c.to_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn every_kind_has_a_default_configuration() {
        for kind in TaskKind::ALL {
            let cfg = AnyTaskConfig::default_for(kind);
            assert_eq!(cfg.kind(), kind);
            assert!(cfg.to_wire().unwrap().is_object());
        }
    }

    #[test]
    fn partial_objects_keep_defaults() {
        let cfg = AnyTaskConfig::from_value(
            TaskKind::ListEntities,
            json!({"adp_listEntities_type": "singleMindServer"}),
        )
        .unwrap();
        let AnyTaskConfig::ListEntities(inner) = cfg else {
            panic!("wrong variant");
        };
        assert_eq!(inner.adp_listEntities_type, "singleMindServer");
        assert_eq!(inner.adp_listEntities_file, "output.json");
    }

    #[test]
    fn wrong_types_are_reported_with_the_task_key() {
        let err = AnyTaskConfig::from_value(
            TaskKind::QueryEngine,
            json!({"adp_queryEngine_waitForResult": "soon"}),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::Shape { ref task, .. } if task == "query_engine"));

        let err = AnyTaskConfig::from_value(TaskKind::QueryEngine, json!([1])).unwrap_err();
        assert!(matches!(err, ValidationError::Shape { .. }));
    }

    #[test]
    fn serialises_as_the_inner_configuration() {
        let any = AnyTaskConfig::default_for(TaskKind::StartApplication);
        let direct = StartApplicationTaskConfig::default();
        assert_eq!(any.to_wire().unwrap(), direct.to_wire().unwrap());
        assert_eq!(
            any.declared_defaults().unwrap(),
            direct.declared_defaults().unwrap()
        );
    }
}
