//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option pricing used to benchmark exchange quotes.
//!
//! This crate provides:
//! - Standard normal CDF/PDF
//! - Black-Scholes call/put pricing with d1, d2 and vega
//! - Implied volatility inversion (safeguarded Newton-Raphson)
//!
//! ## Usage
//!
//! ```
//! use pricer_core::types::OptionType;
//! use pricer_models::analytical::BlackScholes;
//!
//! let bs = BlackScholes::new(24_500.0_f64, 0.055, 0.11).unwrap();
//! let call = bs.price(OptionType::Call, 24_500.0, 7.0 / 252.0);
//! assert!(call > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
