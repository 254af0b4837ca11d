//! Option-chain snapshot as published by the NSE option-chain API.
//!
//! The payload nests everything under `records`:
//!
//! ```text
//! records.expiryDates      ["28-Aug-2025", ...]
//! records.underlyingValue  24631.3
//! records.timestamp        "14-Aug-2025 15:30:00"
//! records.data[]           { strikePrice, expiryDate, CE?, PE? }
//!   CE / PE                { lastPrice, impliedVolatility (percent), expiryDate }
//! ```

use std::path::Path;

use pricer_core::types::{Date, OptionType};
use pricer_risk::comparison::ContractQuote;
use serde::Deserialize;
use tracing::debug;

use crate::error::FeedError;

#[derive(Debug, Deserialize)]
struct RawChain {
    records: Option<RawRecords>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecords {
    #[serde(default)]
    expiry_dates: Vec<String>,
    #[serde(default)]
    data: Vec<RawRow>,
    underlying_value: Option<f64>,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRow {
    strike_price: f64,
    expiry_date: String,
    #[serde(rename = "CE")]
    ce: Option<RawLeg>,
    #[serde(rename = "PE")]
    pe: Option<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    #[serde(default)]
    last_price: f64,
    #[serde(default)]
    implied_volatility: f64,
    expiry_date: Option<String>,
}

/// One side (CE or PE) of a chain row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLeg {
    /// Last traded price
    pub last_price: f64,
    /// Implied volatility in percent, as published
    pub implied_volatility: f64,
    /// Expiry carried on the leg itself
    pub expiry: Date,
}

/// One strike of the chain for a single expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainRow {
    /// Strike price
    pub strike: f64,
    /// Row expiry
    pub expiry: Date,
    /// Call leg, when listed
    pub call: Option<ChainLeg>,
    /// Put leg, when listed
    pub put: Option<ChainLeg>,
}

/// Parsed option chain for one underlying.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSnapshot {
    /// Underlying symbol (e.g. "NIFTY")
    pub symbol: String,
    /// Listed expiries in publication order
    pub expiry_dates: Vec<Date>,
    /// Underlying index level at snapshot time
    pub underlying_value: Option<f64>,
    /// Exchange timestamp string
    pub timestamp: Option<String>,
    /// All rows across expiries
    pub rows: Vec<ChainRow>,
}

impl ChainSnapshot {
    /// Parses an option-chain JSON payload.
    ///
    /// # Errors
    /// - `FeedError::Json` if the body is not valid JSON of the expected shape
    /// - `FeedError::MissingField` if `records` is absent (NSE returns `{}`
    ///   to sessions without cookies)
    /// - `FeedError::Date` for unparsable expiry strings
    ///
    /// # Examples
    /// ```
    /// use adapter_feeds::ChainSnapshot;
    ///
    /// let body = r#"{"records": {
    ///     "expiryDates": ["28-Aug-2025"],
    ///     "underlyingValue": 24631.3,
    ///     "data": [{
    ///         "strikePrice": 24600, "expiryDate": "28-Aug-2025",
    ///         "CE": {"lastPrice": 215.5, "impliedVolatility": 10.8, "expiryDate": "28-Aug-2025"}
    ///     }]
    /// }}"#;
    /// let snapshot = ChainSnapshot::from_json_str("NIFTY", body).unwrap();
    /// assert_eq!(snapshot.rows.len(), 1);
    /// assert!(snapshot.rows[0].put.is_none());
    /// ```
    pub fn from_json_str(symbol: &str, body: &str) -> Result<Self, FeedError> {
        let raw: RawChain = serde_json::from_str(body)?;
        let records = raw.records.ok_or_else(|| FeedError::missing("records"))?;

        let expiry_dates = records
            .expiry_dates
            .iter()
            .map(|s| Date::parse_exchange(s))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = records
            .data
            .into_iter()
            .map(|row| -> Result<ChainRow, FeedError> {
                let expiry = Date::parse_exchange(&row.expiry_date)?;
                let leg = |raw: Option<RawLeg>| -> Result<Option<ChainLeg>, FeedError> {
                    raw.map(|leg| -> Result<ChainLeg, FeedError> {
                        let leg_expiry = match leg.expiry_date.as_deref() {
                            Some(s) => Date::parse_exchange(s)?,
                            None => expiry,
                        };
                        Ok(ChainLeg {
                            last_price: leg.last_price,
                            implied_volatility: leg.implied_volatility,
                            expiry: leg_expiry,
                        })
                    })
                    .transpose()
                };
                Ok(ChainRow {
                    strike: row.strike_price,
                    expiry,
                    call: leg(row.ce)?,
                    put: leg(row.pe)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            symbol,
            rows = rows.len(),
            expiries = expiry_dates.len(),
            "Parsed option chain"
        );

        Ok(Self {
            symbol: symbol.to_string(),
            expiry_dates,
            underlying_value: records.underlying_value,
            timestamp: records.timestamp,
            rows,
        })
    }

    /// Loads a snapshot previously saved to disk.
    pub fn from_json_file(symbol: &str, path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let body = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(symbol, &body)
    }

    /// Flattens the rows of one expiry into contract quotes.
    ///
    /// Each strike yields its call leg first, then its put leg; absent legs
    /// are skipped. Implied volatility is converted from percent to decimal.
    pub fn quotes_for_expiry(&self, expiry: Date) -> Vec<ContractQuote> {
        self.rows
            .iter()
            .filter(|row| row.expiry == expiry)
            .flat_map(|row| {
                let call = row.call.as_ref().map(|leg| (OptionType::Call, leg));
                let put = row.put.as_ref().map(|leg| (OptionType::Put, leg));
                call.into_iter().chain(put).map(move |(side, leg)| {
                    ContractQuote::new(
                        row.strike,
                        side,
                        leg.last_price,
                        leg.implied_volatility / 100.0,
                        leg.expiry,
                    )
                })
            })
            .collect()
    }

    /// First listed expiry on or after `today`.
    ///
    /// Falls back to the expiries seen on the rows when the payload carries
    /// no `expiryDates` list.
    pub fn nearest_expiry(&self, today: Date) -> Option<Date> {
        let listed: Vec<Date> = if self.expiry_dates.is_empty() {
            self.rows.iter().map(|row| row.expiry).collect()
        } else {
            self.expiry_dates.clone()
        };

        listed.into_iter().filter(|d| *d >= today).min()
    }
}
