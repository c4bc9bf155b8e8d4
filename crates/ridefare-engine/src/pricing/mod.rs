//! Pricing module
//!
//! Pure fare calculation with:
//! - Clamped per-mile base price
//! - Stop, overtime, and recurring adjustments
//! - Platform/driver partition and processing fees
//! - Cent-exact rider splitting

pub mod engine;
pub mod split;

pub use engine::{calculate_price, effective_price_per_mile};
pub use split::{split_detail, split_price, MAX_SPLIT_RIDERS};

use ridefare_common::{FareError, Result};
use rust_decimal::Decimal;

/// Map a failed checked operation to [`FareError::Overflow`]
pub(crate) fn checked(value: Option<Decimal>) -> Result<Decimal> {
    value.ok_or(FareError::Overflow)
}
