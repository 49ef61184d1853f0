#[macro_use]
mod macros;

mod any;
pub(crate) mod base;
pub mod coerce;
mod create_data_source;
mod create_ocr_job;
mod export_documents;
mod list_entities;
mod manage_host_roles;
mod manage_users_and_groups;
mod query_engine;
mod read_configuration;
mod read_service_alerts;
mod start_application;
mod taxonomy_statistic;

pub use any::AnyTaskConfig;
pub use base::{BaseTaskConfig, TaskConfig};
pub use coerce::{LooseScalar, Metadata};
pub use create_data_source::{CreateDataSourceResult, CreateDataSourceTaskConfig};
pub use create_ocr_job::{CreateOcrJobResult, CreateOcrJobTaskConfig};
pub use export_documents::{ExportDocumentsResult, ExportDocumentsTaskConfig};
pub use list_entities::{ListEntitiesResult, ListEntitiesTaskConfig};
pub use manage_host_roles::{ManageHostRolesResult, ManageHostRolesTaskConfig};
pub use manage_users_and_groups::{
    ApplicationRoles, Group, GroupDefinition, ManageUsersAndGroupsResult,
    ManageUsersAndGroupsTaskConfig, User, UserDefinition, UserToGroup, UsersAndGroups,
};
pub use query_engine::{QueryEngineResult, QueryEngineTaskConfig};
pub use read_configuration::{
    CellInfo, ConfigToRead, ConfigurationInfo, GlobalInfo, ParameterInfo,
    ReadConfigurationResult, ReadConfigurationTaskConfig, StaticInfo,
};
pub use read_service_alerts::{ReadServiceAlertsResult, ReadServiceAlertsTaskConfig, ServiceAlert};
pub use start_application::{StartApplicationResult, StartApplicationTaskConfig};
pub use taxonomy_statistic::{
    Category, OutputTaxonomy, SearchParameter, Taxonomy, TaxonomyStatisticResult,
    TaxonomyStatisticTaskConfig, TaxonomyStatistics, TaxonomyStatisticsOutput,
};
