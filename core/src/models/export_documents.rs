use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::models::coerce::{coerce_int, coerce_text, Metadata};
use crate::registry::FromMetadata;

task_config! {
    /// Configuration for the Export Documents task (CSV export).
    pub struct ExportDocumentsTaskConfig for ExportDocuments {
        adp_exportDocuments_field_separator: String = ";".into(),
        adp_exportDocuments_waitForExport: bool = false,
        adp_exportDocuments_image_field: Option<String> = None,
        adp_exportDocuments_searchResultSize: String = "adp_exportDocuments_searchResultSize".into(),
        adp_exportDocuments_File_Ending: String = "csv".into(),
        adp_exportDocuments_applicationType: String = String::new(),
        adp_exportDocuments_query: String = "*".into(),
        adp_exportDocuments_exportName: Option<String> = None,
        adp_exportDocuments_text_indicator: String = "\"".into(),
        adp_exportDocuments_natives_field: Option<String> = None,
        adp_exportDocuments_multivalue_separator: String = "|".into(),
        adp_exportDocuments_line_break: String = String::new(),
        adp_exportDocuments_applicationIdentifier: String = String::new(),
        adp_exportDocuments_engineIdentifier: Option<String> = None,
        adp_exportDocuments_exportFileName: String = "adp_exportDocuments_exportFileName".into(),
        adp_exportDocuments_engineUser: Option<String> = None,
        adp_exportDocuments_image_volume: String = "Volume".into(),
        adp_exportDocuments_exportFields: Option<String> = None,
        adp_exportDocuments_fullExportPath: String = "adp_exportDocuments_exportPath".into(),
        adp_exportDocuments_text_field: Option<String> = None,
        adp_exportDocuments_exportDirectory: Option<String> = None,
        adp_exportDocuments_enginePassword: Option<String> = None,
        // The service really does repeat the prefix on this key.
        adp_exportDocuments_adp_exportDocuments_mainQueryType: Option<String> = None,
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocumentsResult {
    pub adp_exportDocuments_searchResultSize: Option<i64>,
    pub adp_exportDocuments_exportFileName: Option<String>,
    pub adp_exportDocuments_exportPath: Option<String>,
}

impl FromMetadata for ExportDocumentsResult {
    fn from_metadata(metadata: &Metadata) -> Result<Self, ParseError> {
        Ok(Self {
            adp_exportDocuments_searchResultSize: coerce_int(
                metadata,
                "adp_exportDocuments_searchResultSize",
            )?,
            adp_exportDocuments_exportFileName: coerce_text(
                metadata,
                "adp_exportDocuments_exportFileName",
            ),
            adp_exportDocuments_exportPath: coerce_text(metadata, "adp_exportDocuments_exportPath"),
        })
    }
}
