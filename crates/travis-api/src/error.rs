//! Error types for travis-api

use thiserror::Error;

/// Errors that can occur while talking to the CI provider
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Client could not be constructed
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err.to_string())
    }
}
