//! surfsup CLI - serve the Hawaii climate dataset over HTTP
//!
//! - `serve`: run the read-only JSON API
//! - `routes`: print the available routes

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "surfsup",
    author,
    version,
    about = "Read-only JSON API over the Hawaii climate observation dataset",
    long_about = "Serve precipitation, station, and temperature summaries from a SQLite \
                  file holding the measurement and station tables."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Print the routes served by the API
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Routes => commands::run_routes(),
    }
    Ok(())
}
