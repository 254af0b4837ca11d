//! Row-wise Black-Scholes pricing of an option chain.

use pricer_core::types::time_to_expiry;
use pricer_models::analytical::{implied_volatility, zero_vol_price, BlackScholes};
use rayon::prelude::*;

use super::error::ComparisonError;
use super::quote::{ContractQuote, PricedContract, PricingInputs};

/// Prices a single quote.
///
/// Quotes with a non-positive or non-finite IV are priced in the σ → 0
/// limit (discounted intrinsic value). Expired contracts price at
/// intrinsic value.
///
/// # Errors
/// `ComparisonError::InvalidQuote` for a non-positive strike.
pub fn price_contract(
    quote: &ContractQuote,
    inputs: &PricingInputs,
) -> Result<PricedContract, ComparisonError> {
    if !(quote.strike > 0.0) {
        return Err(ComparisonError::InvalidQuote {
            strike: quote.strike,
            message: "strike must be positive".to_string(),
        });
    }

    let t = time_to_expiry(inputs.valuation_time, quote.expiry, inputs.day_count);
    let spot = inputs.spot;
    let rate = inputs.risk_free_rate;

    let bs_price = if quote.iv > 0.0 && quote.iv.is_finite() {
        BlackScholes::new(spot, rate, quote.iv)?.price(quote.option_type, quote.strike, t)
    } else {
        zero_vol_price(quote.option_type, spot, quote.strike, rate, t)
    };

    // Solver failures (stale or arbitrageable prints) leave the column empty
    let solved_iv = match &inputs.implied_vol {
        Some(config) if t > 0.0 => implied_volatility(
            quote.option_type,
            quote.last_price,
            spot,
            quote.strike,
            rate,
            t,
            config,
        )
        .ok(),
        _ => None,
    };

    Ok(PricedContract {
        quote: quote.clone(),
        time_to_expiry: t,
        bs_price,
        error: bs_price - quote.last_price,
        solved_iv,
    })
}

/// Prices every quote of a chain in parallel.
///
/// The output has one row per input quote, in input order.
///
/// # Errors
/// The first invalid quote aborts the whole chain.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::{Date, OptionType};
/// use pricer_risk::comparison::{price_chain, ContractQuote, PricingInputs};
///
/// let expiry = Date::from_ymd(2025, 8, 28).unwrap();
/// let now = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let inputs = PricingInputs::new(100.0, 0.0, now).unwrap();
///
/// let quotes = [ContractQuote::new(90.0, OptionType::Call, 10.0, 0.0, expiry)];
/// let priced = price_chain(&quotes, &inputs).unwrap();
///
/// // Zero IV with zero rate: intrinsic value
/// assert!((priced[0].bs_price - 10.0).abs() < 1e-12);
/// assert!(priced[0].error.abs() < 1e-12);
/// ```
pub fn price_chain(
    quotes: &[ContractQuote],
    inputs: &PricingInputs,
) -> Result<Vec<PricedContract>, ComparisonError> {
    quotes
        .par_iter()
        .map(|quote| price_contract(quote, inputs))
        .collect()
}
