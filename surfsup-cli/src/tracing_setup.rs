//! Tracing setup for the surfsup CLI
//!
//! Usage:
//!   surfsup --debug serve                 # Debug logging to console
//!   RUST_LOG=surfsup_server=debug surfsup serve   # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the default level to debug if RUST_LOG is unset)
    pub debug: bool,
}

/// Initialize console tracing.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn env_filter(config: &TracingConfig) -> EnvFilter {
    let default_level = if config.debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
