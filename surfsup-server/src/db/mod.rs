//! Data access layer - per-request SQLite connections and queries
//!
//! # Design Principles
//!
//! - One read-only connection per request, closed before the handler returns
//! - One named row type per query shape, no tuple unpacking
//! - Schema is fixed; nothing is reflected at startup

pub mod queries;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use queries::{
    PrecipitationRow, StationActivity, StationRow, TemperatureRow, TemperatureSummary,
};
pub use store::{DbError, Store};
