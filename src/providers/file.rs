use crate::core::model::Country;
use crate::core::source::{DataSource, LoadError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the dataset from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Country>, LoadError> {
        debug!("Reading Olympic data from {}", self.path.display());

        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LoadError::client(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            LoadError::client(format!(
                "Malformed Olympic data in {}: {e}",
                self.path.display()
            ))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
