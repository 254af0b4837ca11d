//! Implied volatility recovery from observed option prices.
//!
//! Inverts the Black-Scholes price in σ with a safeguarded Newton-Raphson
//! iteration: Newton steps on vega while they stay inside the current
//! bracket, bisection otherwise. The price is strictly increasing in σ, so
//! the bracket always contains the root once the bound check has passed.

use pricer_core::types::OptionType;

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;

/// Configuration for the implied volatility search.
///
/// # Example
///
/// ```
/// use pricer_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert!(config.tolerance < 1e-6);
/// assert!(config.max_iterations >= 50);
/// assert!(config.min_volatility < config.max_volatility);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpliedVolConfig {
    /// Stop once |model price - market price| falls below this.
    pub tolerance: f64,
    /// Maximum number of Newton/bisection iterations.
    pub max_iterations: usize,
    /// Lower end of the search bracket.
    pub min_volatility: f64,
    /// Upper end of the search bracket.
    pub max_volatility: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
            min_volatility: 1e-6,
            max_volatility: 5.0,
        }
    }
}

/// Recovers the volatility that reproduces `market_price`.
///
/// # Arguments
/// * `option_type` - Call or put
/// * `market_price` - Observed option price
/// * `spot` - Underlying spot price
/// * `strike` - Strike price
/// * `rate` - Risk-free rate (continuously compounded)
/// * `expiry` - Time to expiry in years (must be positive)
/// * `config` - Search configuration
///
/// # Errors
/// - `InvalidSpot` / `InvalidStrike` for non-positive inputs
/// - `NumericalInstability` for expired contracts or non-finite prices
/// - `PriceOutOfBounds` if no volatility in the bracket reproduces the price
/// - `NotConverged` if the iteration budget runs out
///
/// # Examples
///
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::{implied_volatility, BlackScholes, ImpliedVolConfig};
///
/// let bs = BlackScholes::new(24_500.0_f64, 0.055, 0.12).unwrap();
/// let t = 12.0 / 252.0;
/// let price = bs.price_put(24_300.0, t);
///
/// let iv = implied_volatility(
///     OptionType::Put, price, 24_500.0, 24_300.0, 0.055, t, &ImpliedVolConfig::default(),
/// ).unwrap();
/// assert!((iv - 0.12).abs() < 1e-6);
/// ```
pub fn implied_volatility(
    option_type: OptionType,
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    config: &ImpliedVolConfig,
) -> Result<f64, AnalyticalError> {
    if !(spot > 0.0) {
        return Err(AnalyticalError::InvalidSpot { spot });
    }
    if !(strike > 0.0) {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    if !(expiry > 0.0) {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("no implied volatility for expiry T = {}", expiry),
        });
    }
    if !market_price.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("non-finite market price {}", market_price),
        });
    }

    let model_at = |sigma: f64| -> Result<f64, AnalyticalError> {
        Ok(BlackScholes::new(spot, rate, sigma)?.price(option_type, strike, expiry))
    };

    let mut lo = config.min_volatility;
    let mut hi = config.max_volatility;
    let lower = model_at(lo)?;
    let upper = model_at(hi)?;
    if market_price < lower || market_price > upper {
        return Err(AnalyticalError::PriceOutOfBounds {
            price: market_price,
            lower,
            upper,
        });
    }

    // Brenner-Subrahmanyam ATM approximation as the starting point
    let mut sigma = ((2.0 * std::f64::consts::PI / expiry).sqrt() * market_price / spot)
        .clamp(lo, hi);

    for _ in 0..config.max_iterations {
        let model = BlackScholes::new(spot, rate, sigma)?;
        let diff = model.price(option_type, strike, expiry) - market_price;

        if diff.abs() < config.tolerance {
            return Ok(sigma);
        }

        if diff > 0.0 {
            hi = sigma;
        } else {
            lo = sigma;
        }

        let vega = model.vega(strike, expiry);
        let newton = sigma - diff / vega;
        sigma = if vega > f64::EPSILON && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        if hi - lo < f64::EPSILON * hi {
            return Ok(sigma);
        }
    }

    Err(AnalyticalError::NotConverged {
        iterations: config.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solve(side: OptionType, price: f64, spot: f64, strike: f64, t: f64) -> Result<f64, AnalyticalError> {
        implied_volatility(side, price, spot, strike, 0.055, t, &ImpliedVolConfig::default())
    }

    #[test]
    fn test_recovers_input_volatility_across_strikes() {
        let spot = 24_500.0;
        let t = 20.0 / 252.0;
        for &strike in &[23_000.0, 24_000.0, 24_500.0, 25_000.0, 26_000.0] {
            for &vol in &[0.08, 0.12, 0.25] {
                let bs = BlackScholes::new(spot, 0.055, vol).unwrap();
                for side in [OptionType::Call, OptionType::Put] {
                    let price = bs.price(side, strike, t);
                    if price < 1e-3 {
                        continue;
                    }
                    let iv = solve(side, price, spot, strike, t).unwrap();
                    assert_relative_eq!(iv, vol, epsilon = 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_price_below_intrinsic_rejected() {
        // Deep ITM call quoted below forward intrinsic
        let err = solve(OptionType::Call, 400.0, 24_500.0, 24_000.0, 10.0 / 252.0).unwrap_err();
        assert!(matches!(err, AnalyticalError::PriceOutOfBounds { .. }));
    }

    #[test]
    fn test_price_above_spot_rejected() {
        let err = solve(OptionType::Call, 30_000.0, 24_500.0, 24_000.0, 10.0 / 252.0).unwrap_err();
        assert!(matches!(err, AnalyticalError::PriceOutOfBounds { .. }));
    }

    #[test]
    fn test_expired_contract_rejected() {
        let err = solve(OptionType::Put, 10.0, 24_500.0, 24_600.0, 0.0).unwrap_err();
        assert!(matches!(err, AnalyticalError::NumericalInstability { .. }));

        let err = solve(OptionType::Put, 10.0, 24_500.0, 24_600.0, -1.0 / 252.0).unwrap_err();
        assert!(matches!(err, AnalyticalError::NumericalInstability { .. }));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            solve(OptionType::Call, 10.0, 0.0, 100.0, 0.1),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            solve(OptionType::Call, 10.0, 100.0, -5.0, 0.1),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            solve(OptionType::Call, f64::NAN, 100.0, 100.0, 0.1),
            Err(AnalyticalError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let config = ImpliedVolConfig {
            max_iterations: 1,
            tolerance: 1e-14,
            ..ImpliedVolConfig::default()
        };
        let bs = BlackScholes::new(100.0, 0.055, 0.6).unwrap();
        let price = bs.price_call(130.0, 0.5);
        let err =
            implied_volatility(OptionType::Call, price, 100.0, 130.0, 0.055, 0.5, &config).unwrap_err();
        assert_eq!(err, AnalyticalError::NotConverged { iterations: 1 });
    }
}
