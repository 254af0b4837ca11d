//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to closed-form pricing and implied volatility

use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidStrike`: Non-positive strike
/// - `PriceOutOfBounds`: Market price outside the no-arbitrage band
/// - `NotConverged`: Implied volatility search exhausted its iterations
/// - `NumericalInstability`: Computation encountered numerical issues
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Observed price cannot be produced by any volatility.
    #[error("Price {price} outside no-arbitrage bounds [{lower}, {upper}]")]
    PriceOutOfBounds {
        /// Observed option price
        price: f64,
        /// Zero-volatility lower bound
        lower: f64,
        /// Infinite-volatility upper bound
        upper: f64,
    },

    /// Implied volatility search did not converge.
    #[error("Implied volatility did not converge after {iterations} iterations")]
    NotConverged {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_spot_display() {
        let err = AnalyticalError::InvalidSpot { spot: -100.0 };
        assert_eq!(format!("{}", err), "Invalid spot price: S = -100");
    }

    #[test]
    fn test_price_out_of_bounds_display() {
        let err = AnalyticalError::PriceOutOfBounds {
            price: 0.5,
            lower: 1.0,
            upper: 100.0,
        };
        assert_eq!(
            format!("{}", err),
            "Price 0.5 outside no-arbitrage bounds [1, 100]"
        );
    }

    #[test]
    fn test_not_converged_display() {
        let err = AnalyticalError::NotConverged { iterations: 100 };
        assert!(format!("{}", err).contains("100 iterations"));
    }
}
