//! Source traits for option chains and spot prices.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::chain::ChainSnapshot;
use crate::error::FeedError;

/// Provider of full option-chain snapshots.
#[async_trait]
pub trait OptionChainSource: Send + Sync {
    /// Fetches the current chain for an index symbol (e.g. "NIFTY").
    async fn fetch_chain(&self, symbol: &str) -> Result<ChainSnapshot, FeedError>;
}

/// Provider of the underlying spot level.
#[async_trait]
pub trait SpotSource: Send + Sync {
    /// Fetches the latest spot for a ticker (e.g. "^NSEI").
    async fn fetch_spot(&self, ticker: &str) -> Result<f64, FeedError>;
}

/// Chain source backed by a saved JSON snapshot.
#[derive(Debug, Clone)]
pub struct FileChainSource {
    path: PathBuf,
}

impl FileChainSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OptionChainSource for FileChainSource {
    async fn fetch_chain(&self, symbol: &str) -> Result<ChainSnapshot, FeedError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = ChainSnapshot::from_json_str(symbol, &body)?;
        info!(
            path = %self.path.display(),
            rows = snapshot.rows.len(),
            "Loaded option chain from file"
        );
        Ok(snapshot)
    }
}
