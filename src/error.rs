//! Error types for fetching backend resources.

use thiserror::Error;

use crate::source::Resource;

/// Why a single request failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Reading a local fixture failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// A failed fetch of one resource. This is the only error the dashboard
/// surfaces to the user.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{resource}: {source}")]
pub struct FetchFailure {
    pub resource: Resource,
    #[source]
    pub source: FetchError,
}

impl FetchFailure {
    pub fn new(resource: Resource, source: FetchError) -> Self {
        Self { resource, source }
    }
}
