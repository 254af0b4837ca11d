//! # Adapter Loader (A: Adapter Layer)
//!
//! Flat-file persistence of priced option chains.
//!
//! This crate provides:
//! - [`ComparisonRow`]: one CSV line per priced contract
//! - [`write_rows`] / [`read_rows`]: CSV writer and reader
//!
//! Column layout:
//!
//! ```text
//! strike,type,last_price,iv,expiry,expiry_dt,time_to_expiry,bs_price,error,solved_iv
//! ```

#![deny(missing_docs)]

pub mod csv_io;
pub mod error;
pub mod row;

pub use csv_io::{read_rows, write_rows};
pub use error::LoaderError;
pub use row::ComparisonRow;
