//! Core option, time, and error types.
//!
//! This module provides:
//! - `option_type`: Call/put side of an option contract
//! - `time`: Time types (Date, DayCountConvention) and time-to-expiry
//! - `error`: Date construction and parsing errors
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`time_to_expiry`] from `time`
//! - [`OptionType`] from `option_type`
//! - [`DateError`] from `error`

pub mod error;
pub mod option_type;
pub mod time;

pub use error::DateError;
pub use option_type::OptionType;
pub use time::{time_to_expiry, Date, DayCountConvention};
