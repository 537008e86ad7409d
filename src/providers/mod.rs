pub mod file;
pub mod http;

use crate::core::config::SourceConfig;
use crate::core::source::{DataSource, LoadError};
use std::sync::Arc;
use std::time::Duration;

/// Builds the data source described by the configuration.
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn DataSource>, LoadError> {
    let source: Arc<dyn DataSource> = match config {
        SourceConfig::Http { url, timeout_secs } => Arc::new(http::HttpSource::new(
            url,
            timeout_secs.map(Duration::from_secs),
        )?),
        SourceConfig::File { path } => Arc::new(file::FileSource::new(path)),
    };
    Ok(source)
}
