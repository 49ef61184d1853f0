//! Static table of every task the service knows how to run.
//!
//! Each [`TaskKind`] owns one [`TaskSpec`]: the wire task-type string, the
//! display metadata placed in the request envelope, the default overrides
//! applied before submission and the parser for `executionMetaData`.
//! Registering a new task means adding a variant, a spec row and its
//! configuration/result pair.

mod overrides;
mod result;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{AdpError, ParseError};
use crate::models::{
    CreateDataSourceResult, CreateOcrJobResult, ExportDocumentsResult, ListEntitiesResult,
    ManageHostRolesResult, ManageUsersAndGroupsResult, Metadata, QueryEngineResult,
    ReadConfigurationResult, ReadServiceAlertsResult, StartApplicationResult,
    TaxonomyStatisticResult,
};

pub use overrides::apply_overrides;
pub use result::TaskResult;

/// Builds a typed result from raw execution metadata.
pub trait FromMetadata: Sized {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    ListEntities,
    ManageHostRoles,
    ReadConfiguration,
    QueryEngine,
    TaxonomyStatistic,
    ExportDocuments,
    CreateDataSource,
    ManageUsersAndGroups,
    ReadServiceAlerts,
    StartApplication,
    CreateOcrJob,
}

impl TaskKind {
    pub const ALL: [TaskKind; 11] = [
        TaskKind::ListEntities,
        TaskKind::ManageHostRoles,
        TaskKind::ReadConfiguration,
        TaskKind::QueryEngine,
        TaskKind::TaxonomyStatistic,
        TaskKind::ExportDocuments,
        TaskKind::CreateDataSource,
        TaskKind::ManageUsersAndGroups,
        TaskKind::ReadServiceAlerts,
        TaskKind::StartApplication,
        TaskKind::CreateOcrJob,
    ];

    /// Stable registry key, e.g. `list_entities`.
    pub fn key(self) -> &'static str {
        match self {
            Self::ListEntities => "list_entities",
            Self::ManageHostRoles => "manage_host_roles",
            Self::ReadConfiguration => "read_configuration",
            Self::QueryEngine => "query_engine",
            Self::TaxonomyStatistic => "taxonomy_statistic",
            Self::ExportDocuments => "export_documents",
            Self::CreateDataSource => "create_data_source",
            Self::ManageUsersAndGroups => "manage_users_and_groups",
            Self::ReadServiceAlerts => "read_service_alerts",
            Self::StartApplication => "start_application",
            Self::CreateOcrJob => "create_ocr_job",
        }
    }

    pub fn spec(self) -> &'static TaskSpec {
        &TASK_SPECS[self as usize]
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TaskKind {
    type Err = AdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| AdpError::UnknownTask(s.to_string()))
    }
}

/// Value a registry entry forces onto a configuration field left at its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideValue {
    Str(&'static str),
    Bool(bool),
    Int(i64),
}

impl OverrideValue {
    pub fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.to_string()),
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::from(i),
        }
    }
}

pub type ParseFn = fn(&Metadata) -> Result<TaskResult, ParseError>;

#[derive(Debug)]
pub struct TaskSpec {
    pub kind: TaskKind,
    /// `taskType` on the wire.
    pub task_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub defaults: &'static [(&'static str, OverrideValue)],
    pub parser: ParseFn,
}

impl TaskSpec {
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }

    pub fn parse(&self, metadata: &Metadata) -> Result<TaskResult, ParseError> {
        (self.parser)(metadata)
    }
}

fn parse_with<R>(metadata: &Metadata) -> Result<TaskResult, ParseError>
where
    R: FromMetadata + Into<TaskResult>,
{
    R::from_metadata(metadata).map(Into::into)
}

/// Indexed by `TaskKind as usize`; the order must follow [`TaskKind::ALL`].
static TASK_SPECS: [TaskSpec; 11] = [
    TaskSpec {
        kind: TaskKind::ListEntities,
        task_type: "List Entities",
        display_name: "List Entities",
        description: "List entities from ADP service",
        defaults: &[(
            "adp_listEntities_whiteList",
            OverrideValue::Str(
                "id,displayName,processStatus,hostId,hostName,sourceForCreateFromExisting",
            ),
        )],
        parser: parse_with::<ListEntitiesResult>,
    },
    TaskSpec {
        kind: TaskKind::ManageHostRoles,
        task_type: "Manage Host Roles",
        display_name: "Manage Host Roles",
        description: "Manage roles for hosts",
        defaults: &[],
        parser: parse_with::<ManageHostRolesResult>,
    },
    TaskSpec {
        kind: TaskKind::ReadConfiguration,
        task_type: "Read Configuration",
        display_name: "Read Configuration",
        description: "A Task to read configurations into JSON or XML.",
        defaults: &[
            (
                "adp_readConfiguration_outputJson",
                OverrideValue::Str("adp_readConfiguration_json_output"),
            ),
            (
                "adp_readConfiguration_outputFilename",
                OverrideValue::Str("adp_readConfiguration_output_file_name"),
            ),
        ],
        parser: parse_with::<ReadConfigurationResult>,
    },
    TaskSpec {
        kind: TaskKind::QueryEngine,
        task_type: "Query Engine",
        display_name: "Query engine",
        description: "Queries an engine",
        defaults: &[],
        parser: parse_with::<QueryEngineResult>,
    },
    TaskSpec {
        kind: TaskKind::TaxonomyStatistic,
        task_type: "Taxonomy Statistic",
        display_name: "Taxonomy statistic",
        description: "Retrieves category counts for a taxonomy",
        defaults: &[(
            "adp_taxonomyStatistic_outputJson",
            OverrideValue::Str("adp_taxonomy_statistics_json_output"),
        )],
        parser: parse_with::<TaxonomyStatisticResult>,
    },
    TaskSpec {
        kind: TaskKind::ExportDocuments,
        task_type: "Export Documents",
        display_name: "Export documents task",
        description: "Export documents in CSV format.",
        defaults: &[],
        parser: parse_with::<ExportDocumentsResult>,
    },
    TaskSpec {
        kind: TaskKind::CreateDataSource,
        task_type: "Create Data Source",
        display_name: "Create data source",
        description: "Creates a new data source",
        defaults: &[],
        parser: parse_with::<CreateDataSourceResult>,
    },
    TaskSpec {
        kind: TaskKind::ManageUsersAndGroups,
        task_type: "Manage Users and Groups",
        display_name: "Manage users and groups",
        description: "Manages users, groups, and their roles",
        defaults: &[],
        parser: parse_with::<ManageUsersAndGroupsResult>,
    },
    TaskSpec {
        kind: TaskKind::ReadServiceAlerts,
        task_type: "Read Service Alerts",
        display_name: "Read service alerts",
        description: "Reads service alerts from the system",
        defaults: &[],
        parser: parse_with::<ReadServiceAlertsResult>,
    },
    TaskSpec {
        kind: TaskKind::StartApplication,
        task_type: "Start Application",
        display_name: "Start application",
        description: "Starts an application",
        defaults: &[],
        parser: parse_with::<StartApplicationResult>,
    },
    TaskSpec {
        kind: TaskKind::CreateOcrJob,
        task_type: "Create OCR Job",
        display_name: "Create OCR Job",
        description: "Creates an OCR job to process documents in an engine",
        defaults: &[],
        parser: parse_with::<CreateOcrJobResult>,
    },
];

/// Resolves a task key. Unknown keys fail here, before anything is sent.
pub fn lookup(key: &str) -> Result<&'static TaskSpec, AdpError> {
    key.parse::<TaskKind>().map(TaskKind::spec)
}

/// Every registered task, in registry order.
pub fn all_specs() -> impl Iterator<Item = &'static TaskSpec> {
    TASK_SPECS.iter()
}
