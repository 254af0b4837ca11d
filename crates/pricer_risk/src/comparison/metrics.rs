//! Aggregate pricing-error metrics.
//!
//! - MAE = mean |bs_price - last_price|
//! - RMSE = sqrt(mean (bs_price - last_price)²)
//! - Bias = mean (bs_price - last_price)
//!
//! By construction MAE <= RMSE, with equality iff all absolute errors match.

use pricer_core::types::OptionType;

use super::error::ComparisonError;
use super::quote::PricedContract;

/// Error statistics over a set of priced contracts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorMetrics {
    /// Number of contracts aggregated
    pub count: usize,
    /// Mean absolute error
    pub mae: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean signed error (positive when the model overprices)
    pub bias: f64,
}

impl ErrorMetrics {
    /// Computes metrics over priced rows.
    ///
    /// # Errors
    /// `ComparisonError::EmptySample` when `rows` is empty.
    ///
    /// # Examples
    /// ```
    /// use pricer_risk::comparison::ErrorMetrics;
    ///
    /// let m = ErrorMetrics::from_errors([3.0, -4.0]).unwrap();
    /// assert_eq!(m.count, 2);
    /// assert!((m.mae - 3.5).abs() < 1e-12);
    /// assert!((m.rmse - 12.5_f64.sqrt()).abs() < 1e-12);
    /// assert!((m.bias + 0.5).abs() < 1e-12);
    /// ```
    pub fn compute(rows: &[PricedContract]) -> Result<Self, ComparisonError> {
        Self::from_errors(rows.iter().map(|r| r.error))
    }

    /// Computes metrics from raw signed errors.
    pub fn from_errors<I>(errors: I) -> Result<Self, ComparisonError>
    where
        I: IntoIterator<Item = f64>,
    {
        let (count, abs_sum, sq_sum, sum) = errors.into_iter().fold(
            (0usize, 0.0, 0.0, 0.0),
            |(n, abs_sum, sq_sum, sum), e| (n + 1, abs_sum + e.abs(), sq_sum + e * e, sum + e),
        );

        if count == 0 {
            return Err(ComparisonError::EmptySample);
        }

        let n = count as f64;
        Ok(Self {
            count,
            mae: abs_sum / n,
            rmse: (sq_sum / n).sqrt(),
            bias: sum / n,
        })
    }
}

/// Metrics over a whole chain with a per-side breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsReport {
    /// All rows
    pub overall: ErrorMetrics,
    /// Call rows only (absent when the chain has no calls)
    pub calls: Option<ErrorMetrics>,
    /// Put rows only (absent when the chain has no puts)
    pub puts: Option<ErrorMetrics>,
}

impl MetricsReport {
    /// Computes overall and per-side metrics.
    ///
    /// # Errors
    /// `ComparisonError::EmptySample` when `rows` is empty.
    pub fn compute(rows: &[PricedContract]) -> Result<Self, ComparisonError> {
        let overall = ErrorMetrics::compute(rows)?;
        let side = |option_type: OptionType| {
            ErrorMetrics::from_errors(
                rows.iter()
                    .filter(|r| r.option_type() == option_type)
                    .map(|r| r.error),
            )
            .ok()
        };

        Ok(Self {
            overall,
            calls: side(OptionType::Call),
            puts: side(OptionType::Put),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::quote::ContractQuote;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;

    fn row(option_type: OptionType, last_price: f64, bs_price: f64) -> PricedContract {
        PricedContract {
            quote: ContractQuote::new(
                24_500.0,
                option_type,
                last_price,
                0.12,
                Date::from_ymd(2025, 8, 28).unwrap(),
            ),
            time_to_expiry: 10.0 / 252.0,
            bs_price,
            error: bs_price - last_price,
            solved_iv: None,
        }
    }

    #[test]
    fn test_known_values() {
        let rows = vec![
            row(OptionType::Call, 100.0, 110.0),
            row(OptionType::Call, 50.0, 45.0),
            row(OptionType::Put, 80.0, 80.0),
            row(OptionType::Put, 20.0, 27.0),
        ];
        let m = ErrorMetrics::compute(&rows).unwrap();
        assert_eq!(m.count, 4);
        assert_relative_eq!(m.mae, (10.0 + 5.0 + 0.0 + 7.0) / 4.0, epsilon = 1e-12);
        assert_relative_eq!(
            m.rmse,
            ((100.0 + 25.0 + 0.0 + 49.0) / 4.0_f64).sqrt(),
            epsilon = 1e-12
        );
        assert_relative_eq!(m.bias, (10.0 - 5.0 + 0.0 + 7.0) / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_is_error() {
        assert_eq!(
            ErrorMetrics::compute(&[]).unwrap_err(),
            ComparisonError::EmptySample
        );
        assert!(MetricsReport::compute(&[]).is_err());
    }

    #[test]
    fn test_perfect_model() {
        let rows = vec![
            row(OptionType::Call, 100.0, 100.0),
            row(OptionType::Put, 3.5, 3.5),
        ];
        let m = ErrorMetrics::compute(&rows).unwrap();
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.rmse, 0.0);
    }

    #[test]
    fn test_constant_error_mae_equals_rmse() {
        let m = ErrorMetrics::from_errors([2.0, -2.0, 2.0]).unwrap();
        assert_relative_eq!(m.mae, m.rmse, epsilon = 1e-12);
    }

    #[test]
    fn test_report_breakdown() {
        let rows = vec![
            row(OptionType::Call, 100.0, 110.0),
            row(OptionType::Put, 20.0, 17.0),
            row(OptionType::Call, 50.0, 52.0),
        ];
        let report = MetricsReport::compute(&rows).unwrap();
        assert_eq!(report.overall.count, 3);

        let calls = report.calls.unwrap();
        assert_eq!(calls.count, 2);
        assert_relative_eq!(calls.mae, 6.0, epsilon = 1e-12);

        let puts = report.puts.unwrap();
        assert_eq!(puts.count, 1);
        assert_relative_eq!(puts.rmse, 3.0, epsilon = 1e-12);
        assert_relative_eq!(puts.bias, -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_report_missing_side() {
        let rows = vec![row(OptionType::Put, 20.0, 21.0)];
        let report = MetricsReport::compute(&rows).unwrap();
        assert!(report.calls.is_none());
        assert_eq!(report.puts.unwrap().count, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn mae_never_exceeds_rmse(errors in prop::collection::vec(-1e4_f64..1e4, 1..100)) {
                let m = ErrorMetrics::from_errors(errors.iter().copied()).unwrap();
                prop_assert!(m.mae <= m.rmse * (1.0 + 1e-12) + 1e-12);
                prop_assert!(m.bias.abs() <= m.mae * (1.0 + 1e-12) + 1e-12);
                prop_assert_eq!(m.count, errors.len());
            }

            #[test]
            fn sides_partition_overall(
                errors in prop::collection::vec((any::<bool>(), -500.0_f64..500.0), 1..60)
            ) {
                let rows: Vec<PricedContract> = errors
                    .iter()
                    .map(|&(is_call, e)| {
                        let side = if is_call { OptionType::Call } else { OptionType::Put };
                        row(side, 100.0, 100.0 + e)
                    })
                    .collect();
                let report = MetricsReport::compute(&rows).unwrap();
                let n_calls = report.calls.map_or(0, |m| m.count);
                let n_puts = report.puts.map_or(0, |m| m.count);
                prop_assert_eq!(n_calls + n_puts, report.overall.count);
            }
        }
    }
}
