//! Loader error types.

use thiserror::Error;

/// Errors raised while reading or writing comparison files.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File system failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV or a field that does not deserialize.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Row parsed but carries inconsistent values.
    #[error("Invalid row {line}: {message}")]
    InvalidRow {
        /// 1-based data line (header excluded)
        line: usize,
        /// What is wrong
        message: String,
    },
}
