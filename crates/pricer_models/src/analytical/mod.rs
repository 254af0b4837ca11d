//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes prices, d1/d2 and vega
//! - The zero-volatility limit used for contracts quoted with no IV
//! - Implied volatility recovery from observed prices
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the closed-form formulas
//! - **Expired contracts** collapse to intrinsic value instead of NaN

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied_vol;

pub use black_scholes::{zero_vol_price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::{implied_volatility, ImpliedVolConfig};
