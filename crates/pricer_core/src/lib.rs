//! # pricer_core: Foundation Types for Index Option Comparison
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the pricer stack, providing:
//! - Option side type: `OptionType` (`types::option_type`)
//! - Time types: `Date`, `DayCountConvention`, `time_to_expiry` (`types::time`)
//! - Error type: `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Date, DayCountConvention, OptionType};
//!
//! // Exchange-format expiry dates
//! let expiry = Date::parse_exchange("28-Aug-2025").unwrap();
//! assert_eq!(expiry.to_string(), "2025-08-28");
//!
//! // Trading-day year fractions
//! let start = Date::from_ymd(2025, 8, 18).unwrap();
//! let yf = DayCountConvention::Trading252.year_fraction_dates(start, expiry);
//! assert!((yf - 10.0 / 252.0).abs() < 1e-12);
//!
//! // Option sides
//! let side: OptionType = "CE".parse().unwrap();
//! assert_eq!(side, OptionType::Call);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, OptionType, DayCountConvention

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
