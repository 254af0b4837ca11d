//! Yahoo Finance chart client for index spot levels.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::FeedError;
use crate::nse::browser_headers;
use crate::source::SpotSource;

/// Public Yahoo Finance query host.
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// HTTP client for `/v8/finance/chart/{ticker}`.
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    /// Creates a client with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Chart endpoint URL for a ticker; `^` is percent-encoded.
    pub fn chart_url(&self, ticker: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            ticker.replace('^', "%5E")
        )
    }
}

/// Extracts the spot level from a chart response.
///
/// Takes the last non-null `close` of `indicators.quote[0]` (the last daily
/// close), falling back to `meta.regularMarketPrice`.
///
/// # Examples
/// ```
/// use adapter_feeds::yahoo::spot_from_chart;
///
/// let body = serde_json::json!({"chart": {"result": [{
///     "meta": {"regularMarketPrice": 24_640.0},
///     "indicators": {"quote": [{"close": [24_580.5, null]}]}
/// }], "error": null}});
/// assert_eq!(spot_from_chart(&body).unwrap(), 24_580.5);
/// ```
pub fn spot_from_chart(body: &Value) -> Result<f64, FeedError> {
    let chart = body
        .get("chart")
        .ok_or_else(|| FeedError::missing("chart"))?;

    if let Some(err) = chart.get("error").filter(|e| !e.is_null()) {
        let description = err
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(FeedError::Upstream(description));
    }

    let result = chart
        .get("result")
        .and_then(|r| r.get(0))
        .ok_or_else(|| FeedError::missing("chart.result[0]"))?;

    let last_close = result
        .pointer("/indicators/quote/0/close")
        .and_then(Value::as_array)
        .and_then(|closes| closes.iter().rev().find_map(Value::as_f64));

    last_close
        .or_else(|| {
            result
                .pointer("/meta/regularMarketPrice")
                .and_then(Value::as_f64)
        })
        .filter(|spot| *spot > 0.0)
        .ok_or_else(|| FeedError::missing("indicators.quote[0].close"))
}

#[async_trait]
impl SpotSource for YahooClient {
    async fn fetch_spot(&self, ticker: &str) -> Result<f64, FeedError> {
        let url = self.chart_url(ticker);
        debug!(url = %url, "Requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let spot = spot_from_chart(&body)?;
        info!(ticker, spot, "Fetched spot price");
        Ok(spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_url_encodes_caret() {
        let client = YahooClient::new(DEFAULT_YAHOO_BASE_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.chart_url("^NSEI"),
            "https://query1.finance.yahoo.com/v8/finance/chart/%5ENSEI"
        );
    }

    #[test]
    fn test_last_close_skips_nulls() {
        let body = json!({"chart": {"result": [{
            "meta": {"regularMarketPrice": 1.0},
            "indicators": {"quote": [{"close": [24_500.0, 24_631.3, null]}]}
        }], "error": null}});
        assert_eq!(spot_from_chart(&body).unwrap(), 24_631.3);
    }

    #[test]
    fn test_falls_back_to_market_price() {
        let body = json!({"chart": {"result": [{
            "meta": {"regularMarketPrice": 24_612.0},
            "indicators": {"quote": [{"close": [null]}]}
        }], "error": null}});
        assert_eq!(spot_from_chart(&body).unwrap(), 24_612.0);

        let body = json!({"chart": {"result": [{
            "meta": {"regularMarketPrice": 24_612.0},
            "indicators": {"quote": [{}]}
        }]}});
        assert_eq!(spot_from_chart(&body).unwrap(), 24_612.0);
    }

    #[test]
    fn test_upstream_error() {
        let body = json!({"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}});
        match spot_from_chart(&body) {
            Err(FeedError::Upstream(msg)) => assert!(msg.contains("delisted")),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data() {
        assert!(matches!(
            spot_from_chart(&json!({})),
            Err(FeedError::MissingField(_))
        ));
        let body = json!({"chart": {"result": [{"meta": {}}], "error": null}});
        assert!(matches!(
            spot_from_chart(&body),
            Err(FeedError::MissingField(_))
        ));
    }
}
