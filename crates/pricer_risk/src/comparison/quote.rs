//! Quotes, pricing inputs and priced rows.

use chrono::NaiveDateTime;
use pricer_core::types::{Date, DayCountConvention, OptionType};
use pricer_models::analytical::ImpliedVolConfig;

use super::error::ComparisonError;

/// One listed contract as observed on the exchange.
///
/// `iv` is a decimal (0.12 for 12%); exchange feeds quoting percent must be
/// converted before constructing a quote.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractQuote {
    /// Strike price
    pub strike: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Last traded price
    pub last_price: f64,
    /// Exchange-reported implied volatility (decimal)
    pub iv: f64,
    /// Expiry date
    pub expiry: Date,
}

impl ContractQuote {
    /// Creates a quote.
    pub fn new(
        strike: f64,
        option_type: OptionType,
        last_price: f64,
        iv: f64,
        expiry: Date,
    ) -> Self {
        Self {
            strike,
            option_type,
            last_price,
            iv,
            expiry,
        }
    }

    /// Returns true when the exchange reported a positive implied volatility.
    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.iv > 0.0
    }
}

/// Market state shared by every row of a chain.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::DayCountConvention;
/// use pricer_risk::comparison::PricingInputs;
///
/// let now = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let inputs = PricingInputs::new(24_631.3, 0.055, now).unwrap();
/// assert_eq!(inputs.day_count, DayCountConvention::Trading252);
/// assert!(inputs.implied_vol.is_none());
///
/// assert!(PricingInputs::new(0.0, 0.055, now).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInputs {
    /// Underlying spot price
    pub spot: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
    /// Convention turning calendar days into year fractions
    pub day_count: DayCountConvention,
    /// Instant the chain is valued at
    pub valuation_time: NaiveDateTime,
    /// When set, each row's own implied volatility is also solved
    pub implied_vol: Option<ImpliedVolConfig>,
}

impl PricingInputs {
    /// Creates inputs with the trading-day convention and no IV solving.
    ///
    /// # Errors
    /// `ComparisonError::InvalidInputs` for a non-positive spot or a
    /// non-finite rate.
    pub fn new(
        spot: f64,
        risk_free_rate: f64,
        valuation_time: NaiveDateTime,
    ) -> Result<Self, ComparisonError> {
        if !(spot > 0.0) || !spot.is_finite() {
            return Err(ComparisonError::InvalidInputs(format!(
                "spot must be positive, got {}",
                spot
            )));
        }
        if !risk_free_rate.is_finite() {
            return Err(ComparisonError::InvalidInputs(format!(
                "risk-free rate must be finite, got {}",
                risk_free_rate
            )));
        }

        Ok(Self {
            spot,
            risk_free_rate,
            day_count: DayCountConvention::default(),
            valuation_time,
            implied_vol: None,
        })
    }

    /// Sets the day count convention.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Enables per-row implied volatility solving.
    pub fn with_implied_vol(mut self, config: ImpliedVolConfig) -> Self {
        self.implied_vol = Some(config);
        self
    }
}

/// A quote together with its model price.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricedContract {
    /// The observed contract
    pub quote: ContractQuote,
    /// Year fraction from valuation to expiry
    pub time_to_expiry: f64,
    /// Black-Scholes price at the quoted IV
    pub bs_price: f64,
    /// `bs_price - last_price`
    pub error: f64,
    /// Volatility implied by `last_price`, when solving was requested and succeeded
    pub solved_iv: Option<f64>,
}

impl PricedContract {
    /// Strike of the underlying quote.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.quote.strike
    }

    /// Side of the underlying quote.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.quote.option_type
    }
}

/// Keeps only rows whose quote carries a positive implied volatility.
pub fn liquid_only(rows: &[PricedContract]) -> Vec<PricedContract> {
    rows.iter().filter(|r| r.quote.is_liquid()).cloned().collect()
}
