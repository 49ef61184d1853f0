//! adp-cli library: command handlers, rendering and logging setup, exposed for tests.

pub mod commands;
pub mod logging;
pub mod render;
