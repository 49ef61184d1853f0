pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod models;
pub mod registry;
pub mod session;
pub mod transport;
