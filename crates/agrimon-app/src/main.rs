//! Agrimon - Main Entry Point

use agrimon_app::{App, Cli};
use agrimon_client::{AnalyticsClient, ApiConfig};
use agrimon_common::init_logging;
use agrimon_config::{Config, ConfigLoader};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load configuration")?,
    };
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let _guard = init_logging(&config.logging)?;
    debug!(command = ?cli.command, "Starting agrimon");

    let client = AnalyticsClient::new(ApiConfig::from_settings(&config.api)?)?;
    let app = App::new(config, &client);

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = app.run(cli.command, &mut stdout).await {
        error!(error = %e, "Command failed");
        return Err(e.into());
    }
    Ok(())
}
