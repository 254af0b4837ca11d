//! Date construction and parsing errors.

use thiserror::Error;

/// Date construction or parsing failure.
///
/// # Examples
/// ```
/// use pricer_core::types::{Date, DateError};
///
/// let err = Date::parse_exchange("2025/08/28").unwrap_err();
/// assert!(matches!(err, DateError::ParseError { format: "DD-Mon-YYYY", .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Components do not name a calendar day (e.g. 30 February).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component
        month: u32,
        /// Day component
        day: u32,
    },

    /// Text does not match the expected layout.
    #[error("Cannot parse '{input}' as {format}")]
    ParseError {
        /// Text as received
        input: String,
        /// Expected layout, e.g. `DD-Mon-YYYY`
        format: &'static str,
    },
}
