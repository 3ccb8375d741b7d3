//! surfsup-server: read-only HTTP API over the Hawaii climate dataset
//!
//! Serves precipitation, station, and temperature summaries straight out of
//! a SQLite file holding the `measurement` and `station` tables. Every
//! request opens its own read-only connection and closes it before the
//! response is sent.

pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, SurfsupConfig};
pub use error::{ApiError, ServerError};
pub use server::{build_router, run_server, ServerConfig};
pub use state::AppState;
