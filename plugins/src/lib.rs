pub mod transport;
pub mod factory;
