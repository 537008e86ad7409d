use crate::core::config::{AppConfig, SourceConfig};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

// Include the example config as a string literal in the binary
const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to the default config location.
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    let config = setup_at_path(&path)?;
    println!(
        "Created {} (data source: {})",
        path.display(),
        describe_source(&config.source)
    );
    Ok(())
}

/// Writes the example configuration to `path` and returns the configuration
/// it describes. An existing file is never overwritten.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    let config: AppConfig =
        serde_yaml::from_str(EXAMPLE_CONFIG).context("Bundled example configuration is invalid")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    debug!(source = ?config.source, "Wrote configuration to {}", path.display());
    Ok(config)
}

fn describe_source(source: &SourceConfig) -> &str {
    match source {
        SourceConfig::Http { url, .. } => url,
        SourceConfig::File { path } => path,
    }
}
