//! Currency rounding
//!
//! All money is carried as [`Decimal`] and rounded to whole cents, one field
//! at a time. The rounding mode is part of the fee configuration so that
//! reconciliation can reproduce any historical quote.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Decimal places kept on every currency value
pub const CURRENCY_DP: u32 = 2;

/// Smallest currency unit
pub const CENT: Decimal = dec!(0.01);

/// Midpoint rule used when rounding to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.125 -> 0.13, -0.125 -> -0.13
    #[default]
    HalfUp,
    /// Banker's rounding: 0.125 -> 0.12, 0.135 -> 0.14
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Round an amount to whole cents
    pub fn round(self, amount: Decimal) -> Decimal {
        let mut rounded = amount.round_dp_with_strategy(CURRENCY_DP, self.strategy());
        // Fix the scale so 2.5 and 2.50 serialize identically.
        rounded.rescale(CURRENCY_DP);
        rounded
    }
}

/// Number of whole cents in an amount already rounded to cents
pub fn to_cents(amount: Decimal) -> Option<i64> {
    amount.checked_div(CENT)?.trunc().to_i64()
}
