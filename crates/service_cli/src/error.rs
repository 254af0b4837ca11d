//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// bscompare error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Market data fetch or decode failure
    #[error("Market data error: {0}")]
    Feed(#[from] adapter_feeds::FeedError),

    /// Comparison CSV read or write failure
    #[error("Results file error: {0}")]
    Loader(#[from] adapter_loader::LoaderError),

    /// Pricing or metrics failure
    #[error("Comparison error: {0}")]
    Comparison(#[from] pricer_risk::comparison::ComparisonError),

    /// Chart rendering failure
    #[error("Chart rendering error: {0}")]
    Chart(#[from] anyhow::Error),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument or unusable input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
