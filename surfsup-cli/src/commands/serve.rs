//! HTTP server command for the climate API
//!
//! Resolves configuration (file, environment, flags) and runs the server
//! until Ctrl+C or SIGTERM.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use surfsup_server::config::{parse_anchor_date, parse_bind_addr};
use surfsup_server::{run_server, ServerConfig, SurfsupConfig};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// Path to the SQLite database (default: Resources/hawaii.sqlite)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Config file (default: ~/.surfsup/config.toml when present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Last date of the dataset, YYYY-MM-DD (default: 2017-08-23)
    #[arg(long)]
    pub anchor_date: Option<String>,
}

/// Layer command-line flags over file and environment configuration.
pub fn resolve_config(args: ServeArgs) -> Result<ServerConfig> {
    resolve_config_with(args, |key| std::env::var(key).ok())
}

/// Same as [`resolve_config`], reading `SURFSUP_*` variables through `lookup`.
fn resolve_config_with(
    args: ServeArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig> {
    let mut config = SurfsupConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides_from(lookup)
        .into_server_config()
        .context("Invalid configuration")?;

    if let Some(bind) = args.bind {
        config.bind_addr = parse_bind_addr(&bind)?;
    }
    if let Some(path) = args.db_path {
        config.db_path = path;
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if args.cors_permissive {
        config.cors_permissive = true;
    }
    if let Some(anchor) = args.anchor_date {
        config.anchor_date = parse_anchor_date(&anchor)?;
    }

    Ok(config)
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = resolve_config(args)?;

    tracing::info!("Starting surfsup server on {}", config.bind_addr);
    tracing::info!("Database: {}", config.db_path.display());

    // Blocks until shutdown
    run_server(config).await.context("Server error")?;

    Ok(())
}
