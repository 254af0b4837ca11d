//! # Pricer Risk (L4: Application)
//!
//! Compares exchange quotes against Black-Scholes theoretical prices.
//!
//! This crate provides:
//! - Contract quotes and the market inputs they are priced against
//! - Rayon-based row-wise pricing of a full option chain
//! - Error metrics (MAE, RMSE, bias) overall and per option type
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  comparison/ - quotes, price_chain,    │
//! │                ErrorMetrics            │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)           │
//! │  Black-Scholes, implied volatility     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::types::{Date, OptionType};
//! use pricer_risk::comparison::{price_chain, ContractQuote, MetricsReport, PricingInputs};
//!
//! let expiry = Date::from_ymd(2025, 8, 28).unwrap();
//! let now = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let inputs = PricingInputs::new(24_500.0, 0.055, now).unwrap();
//!
//! let quotes = vec![
//!     ContractQuote::new(24_500.0, OptionType::Call, 210.0, 0.11, expiry),
//!     ContractQuote::new(24_500.0, OptionType::Put, 150.0, 0.12, expiry),
//! ];
//!
//! let priced = price_chain(&quotes, &inputs).unwrap();
//! assert_eq!(priced.len(), 2);
//!
//! let report = MetricsReport::compute(&priced).unwrap();
//! assert!(report.overall.mae <= report.overall.rmse);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod comparison;
