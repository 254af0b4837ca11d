//! Time types and day count conventions for option expiries.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: Year fraction conventions, including the trading-day basis
//! - `time_to_expiry`: Year fraction from a valuation instant to an expiry date
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2025, 8, 1).unwrap();
//! let end = Date::from_ymd(2025, 8, 28).unwrap();
//!
//! let yf = DayCountConvention::Actual365Fixed.year_fraction_dates(start, end);
//! assert!((yf - 27.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Serialises as ISO 8601 and parses both ISO strings and the exchange
/// `DD-Mon-YYYY` form used in option chain feeds.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2025, 8, 28).unwrap();
/// assert_eq!(date.year(), 2025);
/// assert_eq!(date.month(), 8);
/// assert_eq!(date.day(), 28);
///
/// let parsed: Date = "2025-08-28".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let exchange = Date::parse_exchange("28-Aug-2025").unwrap();
/// assert_eq!(date, exchange);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2025, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::parse("2025-08-28").unwrap();
    /// assert_eq!(date.day(), 28);
    ///
    /// assert!(Date::parse("28-Aug-2025").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| DateError::ParseError {
                input: s.to_string(),
                format: "YYYY-MM-DD",
            })
    }

    /// Parses a date in exchange format (`DD-Mon-YYYY`, e.g. `28-Aug-2025`).
    ///
    /// Month abbreviations are matched case-insensitively, so `28-AUG-2025`
    /// is accepted as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let a = Date::parse_exchange("28-Aug-2025").unwrap();
    /// let b = Date::parse_exchange("28-AUG-2025").unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn parse_exchange(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%d-%b-%Y")
            .map(Date)
            .map_err(|_| DateError::ParseError {
                input: s.to_string(),
                format: "DD-Mon-YYYY",
            })
    }

    /// Parses either ISO or exchange format.
    pub fn parse_any(s: &str) -> Result<Self, DateError> {
        Date::parse(s).or_else(|_| Date::parse_exchange(s))
    }

    /// Formats the date in exchange format (`DD-Mon-YYYY`).
    pub fn to_exchange_string(&self) -> String {
        self.0.format("%d-%b-%Y").to_string()
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses ISO 8601 first, then the exchange `DD-Mon-YYYY` format.
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse_any(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `Trading252`: Calendar days / 252, the trading-day basis used for
///   listed index options comparisons
/// - `Actual365Fixed`: Actual days / 365
/// - `Actual360`: Actual days / 360
///
/// # Usage
///
/// ```
/// use pricer_core::types::time::DayCountConvention;
///
/// assert_eq!(DayCountConvention::default(), DayCountConvention::Trading252);
/// assert_eq!(DayCountConvention::Trading252.days_per_year(), 252.0);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Calendar days / 252.
    #[default]
    Trading252,

    /// Actual/365 Fixed: actual_days / 365.0
    Actual365Fixed,

    /// Actual/360: actual_days / 360.0
    Actual360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::Trading252.name(), "TRADING/252");
    /// assert_eq!(DayCountConvention::Actual365Fixed.name(), "ACT/365F");
    /// assert_eq!(DayCountConvention::Actual360.name(), "ACT/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Trading252 => "TRADING/252",
            DayCountConvention::Actual365Fixed => "ACT/365F",
            DayCountConvention::Actual360 => "ACT/360",
        }
    }

    /// Denominator applied to a whole-day count.
    #[inline]
    pub fn days_per_year(&self) -> f64 {
        match self {
            DayCountConvention::Trading252 => 252.0,
            DayCountConvention::Actual365Fixed => 365.0,
            DayCountConvention::Actual360 => 360.0,
        }
    }

    /// Converts a signed whole-day count into a year fraction.
    #[inline]
    pub fn year_fraction_days(&self, days: i64) -> f64 {
        days as f64 / self.days_per_year()
    }

    /// Calculates the year fraction between two dates.
    ///
    /// Returns a negative value when `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2025, 1, 1).unwrap();
    /// let end = Date::from_ymd(2025, 9, 10).unwrap();
    /// let yf = DayCountConvention::Trading252.year_fraction_dates(start, end);
    /// assert!((yf - 252.0 / 252.0).abs() < 1e-12);
    ///
    /// let yf_neg = DayCountConvention::Trading252.year_fraction_dates(end, start);
    /// assert!(yf_neg < 0.0);
    /// ```
    pub fn year_fraction_dates(&self, start: Date, end: Date) -> f64 {
        self.year_fraction_days(end - start)
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses day count convention from string (case-insensitive).
    ///
    /// Supports multiple aliases for each convention:
    /// - TRADING/252: "TRADING/252", "Trading252", "252", "BUS/252"
    /// - ACT/365F: "ACT/365F", "ACT/365", "Actual/365", "A365"
    /// - ACT/360: "ACT/360", "Actual/360", "A360"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' ', '_', '-'], "").as_str() {
            "TRADING252" | "BUS252" | "252" => Ok(DayCountConvention::Trading252),
            "ACT365F" | "ACT365" | "ACTUAL365" | "ACTUAL365FIXED" | "A365" => {
                Ok(DayCountConvention::Actual365Fixed)
            }
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::Actual360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Whole days from `now` until the start (00:00) of `expiry`, floored.
///
/// A valuation instant part-way through a day counts only completed days,
/// so the result is one less than the plain date difference unless `now`
/// is exactly midnight. Expired contracts yield negative counts.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::time::{days_to_expiry, Date};
///
/// let now = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(10, 30, 0).unwrap();
/// let expiry = Date::from_ymd(2025, 8, 28).unwrap();
/// assert_eq!(days_to_expiry(now, expiry), 7);
///
/// let midnight = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(days_to_expiry(midnight, expiry), 8);
/// ```
pub fn days_to_expiry(now: NaiveDateTime, expiry: Date) -> i64 {
    let expiry_start = expiry.into_inner().and_time(chrono::NaiveTime::MIN);
    (expiry_start - now)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Year fraction from the valuation instant `now` until `expiry`.
///
/// Computed as `days_to_expiry(now, expiry) / convention.days_per_year()`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::time::{time_to_expiry, Date, DayCountConvention};
///
/// let now = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(10, 30, 0).unwrap();
/// let expiry = Date::from_ymd(2025, 8, 28).unwrap();
///
/// let t = time_to_expiry(now, expiry, DayCountConvention::Trading252);
/// assert!((t - 7.0 / 252.0).abs() < 1e-12);
/// ```
pub fn time_to_expiry(now: NaiveDateTime, expiry: Date, convention: DayCountConvention) -> f64 {
    convention.year_fraction_days(days_to_expiry(now, expiry))
}
