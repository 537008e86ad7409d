//! Dataset source abstractions

use crate::core::model::Country;
use async_trait::async_trait;
use thiserror::Error;

/// Why a dataset load failed. Both kinds are recoverable by loading again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a usable response (no network, unreadable file, bad JSON).
    #[error("Client-side error: {message}")]
    ClientSide { message: String },
    /// The server answered with a non-2xx status.
    #[error("Server-side error: {status} - {message}")]
    ServerSide { status: u16, message: String },
}

impl LoadError {
    pub fn client(message: impl Into<String>) -> Self {
        LoadError::ClientSide {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        LoadError::ServerSide {
            status,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Country>, LoadError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}
