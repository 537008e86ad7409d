pub mod cli;
pub mod core;
pub mod providers;

use crate::core::OlympicService;
use crate::core::config::{AppConfig, SourceConfig};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Overview,
    Detail { country: String },
}

/// Loads configuration, wires the data provider and renders the requested view.
///
/// `source` overrides the configured data location when given.
pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    source: Option<&str>,
) -> Result<()> {
    info!("Olympic stats starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(location) = source {
        config.source = SourceConfig::from_location(location);
    }
    debug!("Loaded config: {config:#?}");

    let service = OlympicService::new(providers::from_config(&config.source)?);

    match command {
        AppCommand::Overview => cli::overview::run(&service).await,
        AppCommand::Detail { country } => cli::detail::run(&service, &country).await,
    }
}
