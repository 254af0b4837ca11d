//! CSV row schema.

use pricer_core::types::{Date, OptionType};
use pricer_risk::comparison::PricedContract;
use serde::{Deserialize, Serialize};

/// One priced contract as written to disk.
///
/// `expiry` keeps the exchange spelling ("28-Aug-2025"); `expiry_dt` is the
/// same date in ISO form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Strike price
    pub strike: f64,
    /// "call" or "put"
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Last traded price
    pub last_price: f64,
    /// Exchange implied volatility (decimal)
    pub iv: f64,
    /// Expiry in exchange format
    pub expiry: String,
    /// Expiry as ISO date
    pub expiry_dt: Date,
    /// Year fraction to expiry
    pub time_to_expiry: f64,
    /// Black-Scholes price
    pub bs_price: f64,
    /// `bs_price - last_price`
    pub error: f64,
    /// Volatility implied by `last_price`; empty when not solved
    pub solved_iv: Option<f64>,
}

impl ComparisonRow {
    /// Returns true when the exchange reported a positive implied volatility.
    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.iv > 0.0
    }
}

impl From<&PricedContract> for ComparisonRow {
    fn from(priced: &PricedContract) -> Self {
        let quote = &priced.quote;
        Self {
            strike: quote.strike,
            option_type: quote.option_type,
            last_price: quote.last_price,
            iv: quote.iv,
            expiry: quote.expiry.to_exchange_string(),
            expiry_dt: quote.expiry,
            time_to_expiry: priced.time_to_expiry,
            bs_price: priced.bs_price,
            error: priced.error,
            solved_iv: priced.solved_iv,
        }
    }
}
