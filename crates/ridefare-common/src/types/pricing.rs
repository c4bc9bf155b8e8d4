//! Pricing Types - itemized fare and rider split
//!
//! ```text
//! subtotal        = (base + stops + time) × (1 - recurring discount)
//! platform_profit = subtotal × platform margin
//! driver_earnings = subtotal - platform_profit
//! stripe_fees     = subtotal × stripe % + stripe fixed
//! total_price     = subtotal            (or subtotal + stripe_fees)
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FareError, Result};

/// Itemized price of one trip; every currency field is rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Per-mile price after clamping (not rounded)
    pub effective_price_per_mile: Decimal,

    /// Distance component
    pub base_price: Decimal,

    /// Additional stops component
    pub stop_fee_total: Decimal,

    /// Time beyond the free threshold
    pub time_fee_total: Decimal,

    /// Amount removed by the recurring discount
    pub discount: Decimal,

    /// Price after the recurring discount, before processing fees
    pub subtotal: Decimal,

    /// Platform share of the subtotal
    pub platform_profit: Decimal,

    /// Driver share of the subtotal
    pub driver_earnings: Decimal,

    /// Card processing cost
    pub stripe_fees: Decimal,

    /// Amount charged to the payer(s)
    pub total_price: Decimal,

    /// Total per mile, `None` for a zero-distance trip
    pub price_per_mile: Option<Decimal>,

    /// Largest individual share when the trip is split
    pub price_per_rider: Option<Decimal>,
}

impl PriceBreakdown {
    /// Pre-discount subtotal
    pub fn raw_subtotal(&self) -> Decimal {
        self.base_price + self.stop_fee_total + self.time_fee_total
    }

    /// Total per mile, failing on a zero-distance trip
    pub fn per_mile(&self) -> Result<Decimal> {
        self.price_per_mile.ok_or(FareError::DivisionByZero {
            field: "distance_miles",
        })
    }
}

/// Division of a shared trip's total between driver and riders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiderSplit {
    /// Total being split
    pub total_price: Decimal,

    /// Portion the driver is deemed to contribute
    pub driver_contribution: Decimal,

    /// Rounded even share before remainder reconciliation
    pub per_rider_share: Decimal,

    /// Amount owed by each rider, in rider order
    pub shares: Vec<Decimal>,
}

impl RiderSplit {
    /// Sum of the rider shares
    pub fn riders_total(&self) -> Decimal {
        self.shares.iter().copied().sum()
    }

    /// Whether shares and driver contribution add up to the total exactly
    pub fn is_reconciled(&self) -> bool {
        self.riders_total() + self.driver_contribution == self.total_price
    }
}

/// Price quote handed to the booking service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareQuote {
    /// Quote identifier
    pub quote_id: Uuid,

    /// Itemized price
    pub breakdown: PriceBreakdown,

    /// Rider split for shared trips
    pub split: Option<RiderSplit>,

    /// Calculation timestamp (Unix milliseconds)
    pub computed_at: i64,

    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: i64,
}

impl FareQuote {
    /// Default quote validity period (5 minutes)
    pub const DEFAULT_VALIDITY_MS: u64 = 5 * 60 * 1000;

    /// Wrap a breakdown into a quote valid for `valid_for_ms`
    pub fn new(breakdown: PriceBreakdown, split: Option<RiderSplit>, valid_for_ms: u64) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            quote_id: Uuid::now_v7(),
            breakdown,
            split,
            computed_at: now,
            expires_at: now.saturating_add(valid_for_ms as i64),
        }
    }

    /// Check if the quote is still valid
    pub fn is_valid(&self) -> bool {
        chrono::Utc::now().timestamp_millis() < self.expires_at
    }

    /// Amount to charge
    pub fn total_price(&self) -> Decimal {
        self.breakdown.total_price
    }
}
