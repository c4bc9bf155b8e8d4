//! Trip description submitted for pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fee_config::FeeConfig;
use crate::error::{FareError, Result};

/// Attributes of a single trip, constructed per pricing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripInput {
    /// Route distance in miles
    pub distance_miles: Decimal,

    /// Estimated duration in minutes
    pub duration_minutes: Decimal,

    /// Additional stops beyond origin and destination
    #[serde(default)]
    pub stop_count: u32,

    /// Part of a repeating schedule
    #[serde(default)]
    pub is_recurring: bool,

    /// Riders sharing the trip (1 = solo)
    #[serde(default = "default_rider_count")]
    pub rider_count: u32,

    /// Current gas price, overriding the configured fuel cost for this trip
    #[serde(default)]
    pub gas_price_per_gallon: Option<Decimal>,
}

fn default_rider_count() -> u32 {
    1
}

impl TripInput {
    /// Create a solo, non-recurring trip without stops
    pub fn new(distance_miles: Decimal, duration_minutes: Decimal) -> Self {
        Self {
            distance_miles,
            duration_minutes,
            stop_count: 0,
            is_recurring: false,
            rider_count: default_rider_count(),
            gas_price_per_gallon: None,
        }
    }

    /// Set the number of additional stops
    pub fn with_stops(mut self, stop_count: u32) -> Self {
        self.stop_count = stop_count;
        self
    }

    /// Mark the trip as recurring
    pub fn with_recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }

    /// Set the number of riders sharing the trip
    pub fn with_riders(mut self, rider_count: u32) -> Self {
        self.rider_count = rider_count;
        self
    }

    /// Price fuel from a current gas price
    pub fn with_gas_price(mut self, gas_price_per_gallon: Decimal) -> Self {
        self.gas_price_per_gallon = Some(gas_price_per_gallon);
        self
    }

    /// Whether the fare is split among several riders
    pub fn is_shared(&self) -> bool {
        self.rider_count > 1
    }

    /// Check field constraints, including the configured trip limits
    pub fn validate(&self, config: &FeeConfig) -> Result<()> {
        if self.distance_miles < Decimal::ZERO {
            return Err(FareError::invalid(
                "distance_miles",
                format!("must be non-negative, got {}", self.distance_miles),
            ));
        }
        if self.duration_minutes < Decimal::ZERO {
            return Err(FareError::invalid(
                "duration_minutes",
                format!("must be non-negative, got {}", self.duration_minutes),
            ));
        }
        if self.rider_count < 1 {
            return Err(FareError::invalid("rider_count", "must be at least 1"));
        }
        if let Some(gas_price) = self.gas_price_per_gallon {
            if gas_price < Decimal::ZERO {
                return Err(FareError::invalid(
                    "gas_price_per_gallon",
                    format!("must be non-negative, got {}", gas_price),
                ));
            }
        }
        if let Some(max_stops) = config.max_stops {
            if self.stop_count > max_stops {
                return Err(FareError::invalid(
                    "stop_count",
                    format!("{} exceeds the limit of {}", self.stop_count, max_stops),
                ));
            }
        }
        if let Some(max_riders) = config.max_riders {
            if self.rider_count > max_riders {
                return Err(FareError::invalid(
                    "rider_count",
                    format!("{} exceeds the limit of {}", self.rider_count, max_riders),
                ));
            }
        }
        Ok(())
    }
}
