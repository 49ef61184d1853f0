//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `adp_core::api` instead of reaching into internal modules.

pub use crate::config::{
    apply_env_overrides, load_default, load_from_path, load_from_str, AdpServiceConfig,
    AppConfig, LoggingConfig,
};
pub use crate::envelope::{is_success_status, LooseBool, TaskRequest, TaskResponse};
pub use crate::error::{
    AdpError, CliError, ParseError, TransportError, TransportErrorKind, ValidationError,
};
pub use crate::models::*;
pub use crate::registry::{
    all_specs, apply_overrides, lookup, FromMetadata, OverrideValue, TaskKind, TaskResult,
    TaskSpec,
};
pub use crate::session::{
    BlockingSession, CallOptions, Session, AUTH_PASSWORD_HEADER, AUTH_USERNAME_HEADER,
};
pub use crate::transport::{AdpTransport, Endpoint, Headers};
