//! # RideFare Common
//!
//! Shared types and errors for the RideFare pricing engine.
//!
//! ## Core Types
//!
//! - [`TripInput`]: distance, duration, stops, recurrence, and rider count
//! - [`FeeConfig`]: immutable snapshot of every rate the engine applies
//! - [`PriceBreakdown`]: itemized fare, rounded to cents field by field
//! - [`RiderSplit`]: driver contribution plus reconciled rider shares
//! - [`FareQuote`]: timestamped envelope around a breakdown
//!
//! All currency is [`rust_decimal::Decimal`].

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{FareError, Result};
pub use types::{
    fee_config::FeeConfig,
    money::{RoundingMode, CENT, CURRENCY_DP},
    pricing::{FareQuote, PriceBreakdown, RiderSplit},
    trip::TripInput,
};

/// RideFare version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
