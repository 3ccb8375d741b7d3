//! Command implementations for the surfsup CLI

pub mod routes;
pub mod serve;

pub use routes::run_routes;
pub use serve::run_serve;
