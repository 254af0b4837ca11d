//! Quote-versus-model comparison for an option chain.
//!
//! This module provides:
//! - [`ContractQuote`] / [`PricingInputs`]: what is priced and against what
//! - [`price_chain`]: parallel row-wise Black-Scholes pricing
//! - [`ErrorMetrics`] / [`MetricsReport`]: aggregate pricing error
//! - [`liquid_only`]: the `iv > 0` selection

pub mod error;
pub mod metrics;
pub mod pricing;
pub mod quote;

pub use error::ComparisonError;
pub use metrics::{ErrorMetrics, MetricsReport};
pub use pricing::{price_chain, price_contract};
pub use quote::{liquid_only, ContractQuote, PricedContract, PricingInputs};
