//! # Adapter Feeds (A: Adapter Layer)
//!
//! Market data ingestion for the option-chain comparison.
//!
//! This crate provides:
//! - [`OptionChainSource`] / [`SpotSource`]: async source traits
//! - [`NseClient`]: NSE index option-chain client (cookie-primed session)
//! - [`ChainSnapshot`]: parsed chain, flattened into `ContractQuote`s per expiry
//! - [`YahooClient`]: last daily close from the Yahoo Finance chart API
//! - [`NseUnderlying`] / [`FileChainSource`]: offline and chain-derived sources

#![deny(missing_docs)]

pub mod chain;
pub mod error;
pub mod nse;
pub mod source;
pub mod yahoo;

pub use chain::{ChainLeg, ChainRow, ChainSnapshot};
pub use error::FeedError;
pub use nse::{NseClient, NseUnderlying, DEFAULT_NSE_BASE_URL};
pub use source::{FileChainSource, OptionChainSource, SpotSource};
pub use yahoo::{YahooClient, DEFAULT_YAHOO_BASE_URL};
