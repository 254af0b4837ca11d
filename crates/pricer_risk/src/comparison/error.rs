//! Comparison error types.

use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

/// Errors raised while pricing a chain or aggregating its errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ComparisonError {
    /// Market inputs are unusable (non-positive spot, non-finite rate).
    #[error("Invalid pricing inputs: {0}")]
    InvalidInputs(String),

    /// A single quote cannot be priced.
    #[error("Invalid quote at strike {strike}: {message}")]
    InvalidQuote {
        /// Strike of the offending contract
        strike: f64,
        /// What is wrong with it
        message: String,
    },

    /// Error from the analytical model.
    #[error("Model error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Metrics requested over zero contracts.
    #[error("No contracts to aggregate")]
    EmptySample,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_quote() {
        let err = ComparisonError::InvalidQuote {
            strike: 24_000.0,
            message: "non-positive strike".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid quote at strike 24000: non-positive strike"
        );
    }

    #[test]
    fn test_error_display_empty() {
        assert_eq!(
            format!("{}", ComparisonError::EmptySample),
            "No contracts to aggregate"
        );
    }

    #[test]
    fn test_from_analytical_error() {
        let err: ComparisonError = AnalyticalError::InvalidSpot { spot: -1.0 }.into();
        assert!(matches!(err, ComparisonError::Analytical(_)));
        assert!(format!("{}", err).contains("Invalid spot price"));
    }
}
