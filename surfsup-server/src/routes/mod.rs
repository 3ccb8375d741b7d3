//! Route handlers organized by resource
//!
//! - home: plain-text route listing
//! - health: health check endpoint
//! - observations: precipitation, stations, most-active-station temperatures
//! - summaries: min/avg/max temperature over date ranges

pub mod health;
pub mod home;
pub mod observations;
pub mod summaries;
