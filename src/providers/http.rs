use crate::core::model::Country;
use crate::core::source::{DataSource, LoadError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

/// Fetches the dataset with a single `GET` against a fixed URL.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder().user_agent("olympic-stats/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoadError::client(format!("Failed to build HTTP client: {e}")))?;

        Ok(HttpSource {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Country>, LoadError> {
        debug!("Requesting Olympic data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::client(format!("Request to {} failed: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::server(
                status.as_u16(),
                format!(
                    "Http failure response for {}: {}",
                    self.url,
                    status.canonical_reason().unwrap_or("Unknown Status")
                ),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LoadError::client(format!("Failed to read response body: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse Olympic data");
            LoadError::client(format!("Malformed Olympic data from {}: {e}", self.url))
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
