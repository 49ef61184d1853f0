use thiserror::Error;

use super::parse::ParseError;
use super::transport::TransportError;
use super::validation::ValidationError;

/// Errors surfaced by task dispatch. None of them is retried.
#[derive(Error, Debug)]
pub enum AdpError {
    #[error("unknown task key: {0}")]
    UnknownTask(String),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("{task_type} task failed: no response received")]
    NoResponse { task_type: String },

    #[error(
        "{task_type} task failed with status: {}",
        describe_failure(.status.as_deref(), .message.as_deref())
    )]
    TaskFailed {
        task_type: String,
        status: Option<String>,
        message: Option<String>,
    },

    #[error("{task_type} task completed but returned no metadata")]
    EmptyMetadata { task_type: String },

    #[error("failed to parse metadata for {task_type}: {source}")]
    ResultParse {
        task_type: String,
        #[source]
        source: ParseError,
    },

    #[error("invalid task configuration: {0}")]
    ConfigValidation(#[from] ValidationError),
}

fn describe_failure(status: Option<&str>, message: Option<&str>) -> String {
    let status = match status {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        Some(_) => "<empty>".to_string(),
        None => "<missing>".to_string(),
    };
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => format!("{status} - {m}"),
        None => status,
    }
}

impl AdpError {
    /// Wire task type the error relates to, when known.
    pub fn task_type(&self) -> Option<&str> {
        match self {
            Self::NoResponse { task_type }
            | Self::TaskFailed { task_type, .. }
            | Self::EmptyMetadata { task_type }
            | Self::ResultParse { task_type, .. } => Some(task_type),
            Self::UnknownTask(_) | Self::Transport(_) | Self::ConfigValidation(_) => None,
        }
    }

    pub(crate) fn parse(task_type: &str, source: ParseError) -> Self {
        Self::ResultParse {
            task_type: task_type.to_string(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Adp(#[from] AdpError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// 11 config, 20 transport/IO, 30 task failure, 40 result parse, 50 other.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 11,
            Self::Adp(e) => match e {
                AdpError::ConfigValidation(_) | AdpError::UnknownTask(_) => 11,
                AdpError::Transport(_) | AdpError::NoResponse { .. } => 20,
                AdpError::TaskFailed { .. } | AdpError::EmptyMetadata { .. } => 30,
                AdpError::ResultParse { .. } => 40,
            },
            Self::Io(_) | Self::Command(_) => 20,
            Self::Anyhow(_) => 50,
        }
    }
}
