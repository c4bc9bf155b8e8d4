//! # RideFare Engine
//!
//! Fare calculation and rider splitting for a ride-sharing backend.
//!
//! ## Pricing Formula
//!
//! ```text
//! rate     = clamp(fuel + insurance + maintenance + depreciation, min, max)
//! subtotal = (rate × miles + stops × stop_fee + overtime × time_fee)
//!            × (1 - recurring discount)
//! ```
//!
//! The subtotal is partitioned between platform and driver; card
//! processing fees are either absorbed or charged on top, per
//! [`FeeConfig::fees_added_to_total`].

pub mod pricing;
pub mod schedule;
pub mod settings;

use std::sync::Arc;

use ridefare_common::{FareQuote, FeeConfig, Result, RiderSplit, TripInput};
use rust_decimal::Decimal;
use tracing::{info, instrument};

pub use pricing::{calculate_price, split_detail, split_price};
pub use schedule::FeeSchedule;
pub use settings::FareSettings;

/// Fare service
///
/// Owns the published fee schedule and turns trips into quotes. Each call
/// works on one config snapshot from start to finish.
#[derive(Debug)]
pub struct FareService {
    schedule: FeeSchedule,
    quote_validity_ms: u64,
}

impl FareService {
    pub fn new(settings: FareSettings) -> Result<Self> {
        Ok(Self {
            schedule: FeeSchedule::new(settings.fees)?,
            quote_validity_ms: settings.quote_validity_ms,
        })
    }

    /// Current fee configuration
    pub fn fees(&self) -> Arc<FeeConfig> {
        self.schedule.snapshot()
    }

    /// Replace the fee configuration for subsequent quotes
    pub fn reconfigure(&self, fees: FeeConfig) -> Result<()> {
        self.schedule.publish(fees).map(|_| ())
    }

    /// Price a trip and, when shared, split it among riders
    #[instrument(skip(self, trip), fields(riders = trip.rider_count))]
    pub fn quote(&self, trip: &TripInput) -> Result<FareQuote> {
        let fees = self.schedule.snapshot();
        let breakdown = calculate_price(trip, &fees)?;

        let split = if trip.is_shared() {
            Some(split_detail(breakdown.total_price, trip.rider_count, &fees)?)
        } else {
            None
        };

        let quote = FareQuote::new(breakdown, split, self.quote_validity_ms);
        info!(
            quote_id = %quote.quote_id,
            total_price = %quote.total_price(),
            "Issued fare quote"
        );
        Ok(quote)
    }

    /// Split a total among riders with the current fee configuration
    pub fn split(&self, total_price: Decimal, rider_count: u32) -> Result<RiderSplit> {
        split_detail(total_price, rider_count, &self.schedule.snapshot())
    }
}

impl Default for FareService {
    fn default() -> Self {
        Self {
            schedule: FeeSchedule::default(),
            quote_validity_ms: FareQuote::DEFAULT_VALIDITY_MS,
        }
    }
}
