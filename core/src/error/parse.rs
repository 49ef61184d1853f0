use thiserror::Error;

/// Reasons a metadata blob could not be turned into a typed result.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("executionMetaData is not a JSON object")]
    MetadataNotObject,

    #[error("value of '{key}' is a string but not valid JSON: {source}")]
    InvalidJson {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value of '{key}' has an unexpected shape: {source}")]
    Shape {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value of '{key}' is not an integer: {value}")]
    InvalidNumber { key: String, value: String },

    #[error("expected a {expected} result but the registry produced {actual}")]
    UnexpectedResult {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("response has no valid executionId: {0}")]
    MissingExecutionId(String),

    #[error("response envelope could not be decoded: {0}")]
    InvalidEnvelope(String),
}
