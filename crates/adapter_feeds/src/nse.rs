//! NSE option-chain client.
//!
//! The API refuses requests without the session cookies set by the
//! public site, so every fetch first primes the cookie store with a GET of
//! the base URL using browser-like headers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::{debug, info, warn};

use crate::chain::ChainSnapshot;
use crate::error::FeedError;
use crate::source::{OptionChainSource, SpotSource};

/// Public NSE site.
pub const DEFAULT_NSE_BASE_URL: &str = "https://www.nseindia.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Builds the shared header set for exchange and quote endpoints.
pub(crate) fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

/// HTTP client for `/api/option-chain-indices`.
pub struct NseClient {
    base_url: String,
    client: reqwest::Client,
}

impl NseClient {
    /// Creates a client with a cookie store and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers())
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Option-chain endpoint URL.
    pub fn chain_url(&self) -> String {
        format!("{}/api/option-chain-indices", self.base_url)
    }

    async fn prime_session(&self) -> Result<(), FeedError> {
        let response = self.client.get(&self.base_url).send().await?;
        if !response.status().is_success() {
            // The API call may still succeed with partial cookies
            warn!(status = %response.status(), "NSE session priming returned non-success");
        } else {
            debug!("NSE session cookies primed");
        }
        Ok(())
    }
}

#[async_trait]
impl OptionChainSource for NseClient {
    async fn fetch_chain(&self, symbol: &str) -> Result<ChainSnapshot, FeedError> {
        self.prime_session().await?;

        let url = self.chain_url();
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let snapshot = ChainSnapshot::from_json_str(symbol, &body)?;
        info!(
            symbol,
            rows = snapshot.rows.len(),
            timestamp = snapshot.timestamp.as_deref().unwrap_or("-"),
            "Fetched option chain"
        );
        Ok(snapshot)
    }
}

/// Spot source that reads the chain's own `underlyingValue`.
#[derive(Debug, Clone)]
pub struct NseUnderlying {
    symbol: String,
    value: Option<f64>,
}

impl NseUnderlying {
    /// Captures the underlying level of a fetched snapshot.
    pub fn from_snapshot(snapshot: &ChainSnapshot) -> Self {
        Self {
            symbol: snapshot.symbol.clone(),
            value: snapshot.underlying_value,
        }
    }
}

#[async_trait]
impl SpotSource for NseUnderlying {
    async fn fetch_spot(&self, _ticker: &str) -> Result<f64, FeedError> {
        match self.value {
            Some(v) if v > 0.0 => Ok(v),
            _ => Err(FeedError::missing(format!(
                "records.underlyingValue for {}",
                self.symbol
            ))),
        }
    }
}
