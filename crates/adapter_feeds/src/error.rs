//! Feed error types.

use pricer_core::types::DateError;
use thiserror::Error;

/// Errors raised while fetching or decoding market data.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body is not the expected JSON.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent from an otherwise valid payload.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Upstream reported an error in the payload itself.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Unparsable date in the payload.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// File access failure for saved snapshots.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Creates a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}
