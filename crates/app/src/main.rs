//! Courier - Main Entry Point
//!
//! Opens the persisted workbench stores and runs one command against them.

mod cli;
mod session;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use courier_application::SharedStorage;
use courier_infrastructure::AppConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.storage_dir)?
        .with_request_timeout(Duration::from_millis(cli.timeout_ms));
    tracing::debug!(dir = %config.storage_dir.display(), "opening stores");

    let storage: SharedStorage = Arc::new(config.storage());
    let mut session = Session::open(storage, config.request_timeout);

    let output = session.run(cli.command).await?;
    print!("{output}");

    Ok(())
}
