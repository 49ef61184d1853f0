use thiserror::Error;

/// Field-level configuration problems, raised before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be provided and cannot be empty when {condition}")]
    MissingField {
        field: &'static str,
        condition: &'static str,
    },

    #[error("cannot specify both {first} and {second} at the same time; provide only one")]
    MutuallyExclusive {
        first: &'static str,
        second: &'static str,
    },

    #[error("must specify either {first} or {second}")]
    MissingEither {
        first: &'static str,
        second: &'static str,
    },

    #[error("{config} cannot be submitted as task '{task}'")]
    KindMismatch { config: String, task: String },

    #[error("failed to apply default override for {field}: {reason}")]
    Override { field: String, reason: String },

    #[error("configuration for '{task}' is not valid: {reason}")]
    Shape { task: String, reason: String },
}
