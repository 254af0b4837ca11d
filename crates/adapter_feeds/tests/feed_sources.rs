//! Source-trait behaviour against recorded payloads (no network).

use std::path::PathBuf;
use std::sync::Arc;

use adapter_feeds::{
    ChainSnapshot, FeedError, FileChainSource, NseUnderlying, OptionChainSource, SpotSource,
};
use async_trait::async_trait;
use pricer_core::types::{Date, OptionType};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/nifty_option_chain.json")
}

/// In-memory chain source serving a fixed payload.
struct StaticChain {
    body: String,
}

#[async_trait]
impl OptionChainSource for StaticChain {
    async fn fetch_chain(&self, symbol: &str) -> Result<ChainSnapshot, FeedError> {
        ChainSnapshot::from_json_str(symbol, &self.body)
    }
}

/// Spot source with a fixed level.
struct FixedSpot(f64);

#[async_trait]
impl SpotSource for FixedSpot {
    async fn fetch_spot(&self, _ticker: &str) -> Result<f64, FeedError> {
        Ok(self.0)
    }
}

#[tokio::test]
async fn test_file_source_matches_in_memory_source() {
    let body = std::fs::read_to_string(fixture()).unwrap();
    let sources: Vec<Arc<dyn OptionChainSource>> = vec![
        Arc::new(FileChainSource::new(fixture())),
        Arc::new(StaticChain { body }),
    ];

    let mut snapshots = Vec::new();
    for source in &sources {
        snapshots.push(source.fetch_chain("NIFTY").await.unwrap());
    }
    assert_eq!(snapshots[0], snapshots[1]);
}

#[tokio::test]
async fn test_fixture_flattens_selected_expiry() {
    let snapshot = FileChainSource::new(fixture())
        .fetch_chain("NIFTY")
        .await
        .unwrap();

    let expiry = Date::parse_exchange("28-Aug-2025").unwrap();
    let quotes = snapshot.quotes_for_expiry(expiry);

    // 4 strikes with both legs, one call-only strike
    assert_eq!(quotes.len(), 9);
    assert!(quotes.iter().all(|q| q.expiry == expiry));
    assert_eq!(quotes[0].option_type, OptionType::Call);
    assert_eq!(quotes[1].option_type, OptionType::Put);
    assert!((quotes[2].iv - 0.1087).abs() < 1e-12);

    let illiquid = quotes.iter().filter(|q| !q.is_liquid()).count();
    assert_eq!(illiquid, 2);
}

#[tokio::test]
async fn test_default_expiry_selection() {
    let snapshot = ChainSnapshot::from_json_file("NIFTY", fixture()).unwrap();
    let today = Date::from_ymd(2025, 8, 22).unwrap();
    assert_eq!(
        snapshot.nearest_expiry(today),
        Some(Date::from_ymd(2025, 8, 28).unwrap())
    );
}

#[tokio::test]
async fn test_spot_sources_are_interchangeable() {
    let snapshot = ChainSnapshot::from_json_file("NIFTY", fixture()).unwrap();
    let sources: Vec<Box<dyn SpotSource>> = vec![
        Box::new(NseUnderlying::from_snapshot(&snapshot)),
        Box::new(FixedSpot(24_631.3)),
    ];
    for source in sources {
        assert_eq!(source.fetch_spot("^NSEI").await.unwrap(), 24_631.3);
    }
}

#[tokio::test]
async fn test_missing_file() {
    let err = FileChainSource::new("does/not/exist.json")
        .fetch_chain("NIFTY")
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::Io(_)));
}
