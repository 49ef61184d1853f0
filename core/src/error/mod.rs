#[allow(clippy::module_inception)]
pub mod error;
pub mod parse;
pub mod transport;
pub mod validation;

pub use error::{AdpError, CliError};
pub use parse::ParseError;
pub use transport::{TransportError, TransportErrorKind};
pub use validation::ValidationError;
