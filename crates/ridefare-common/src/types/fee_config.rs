//! Fee configuration
//!
//! A [`FeeConfig`] is a read-only snapshot of every rate the fare engine
//! uses. It is loaded once per deployment and passed explicitly into each
//! calculation; live changes publish a whole new snapshot instead of
//! mutating this one.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::money::RoundingMode;
use crate::error::{FareError, Result};

/// Default gas price used to derive the fuel cost (USD per gallon)
pub const DEFAULT_GAS_PRICE_PER_GALLON: Decimal = dec!(3.50);

/// Default fuel economy used to derive the fuel cost
pub const DEFAULT_VEHICLE_MPG: Decimal = dec!(25);

/// Per-deployment fee parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Fuel cost per mile (gas price / mpg)
    pub fuel_cost_per_mile: Decimal,
    /// Insurance cost per mile
    pub insurance_per_mile: Decimal,
    /// Maintenance cost per mile (oil, tires, etc.)
    pub maintenance_per_mile: Decimal,
    /// Vehicle depreciation per mile
    pub depreciation_per_mile: Decimal,

    /// Flat fee per additional stop
    pub stop_fee: Decimal,
    /// Fee per minute beyond the free-time threshold
    pub time_fee_per_minute: Decimal,
    /// Minutes included before the time fee applies
    pub free_time_threshold_minutes: Decimal,

    /// Discount on the pre-discount subtotal for recurring rides
    pub recurring_discount_rate: Decimal,

    /// Floor on the effective per-mile price
    pub min_price_per_mile: Decimal,
    /// Ceiling on the effective per-mile price
    pub max_price_per_mile: Decimal,

    /// Driver margin; only priced in when `margins_in_rate` is set
    pub driver_profit_margin: Decimal,
    /// Fraction of the subtotal retained by the platform
    pub platform_profit_margin: Decimal,

    /// Percentage component of the card processing fee
    pub stripe_percentage_fee: Decimal,
    /// Fixed component of the card processing fee
    pub stripe_fixed_fee: Decimal,

    /// Fraction of a shared ride's total the driver is deemed to contribute
    pub driver_rider_contribution_rate: Decimal,

    /// Charge processing fees on top of the subtotal instead of absorbing them
    pub fees_added_to_total: bool,
    /// Midpoint rule for every currency field
    pub rounding: RoundingMode,
    /// Mark the operating cost up by driver and platform margins before clamping
    pub margins_in_rate: bool,
    /// Fuel economy used when a trip carries its own gas price
    pub vehicle_mpg: Option<Decimal>,
    /// Maximum additional stops per trip
    pub max_stops: Option<u32>,
    /// Maximum riders sharing a trip
    pub max_riders: Option<u32>,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            fuel_cost_per_mile: DEFAULT_GAS_PRICE_PER_GALLON / DEFAULT_VEHICLE_MPG,
            insurance_per_mile: dec!(0.15),
            maintenance_per_mile: dec!(0.10),
            depreciation_per_mile: dec!(0.08),
            stop_fee: dec!(2.00),
            time_fee_per_minute: dec!(0.25),
            free_time_threshold_minutes: dec!(60),
            recurring_discount_rate: dec!(0.10),
            min_price_per_mile: dec!(0.25),
            max_price_per_mile: dec!(0.45),
            driver_profit_margin: dec!(0.20),
            platform_profit_margin: dec!(0.05),
            stripe_percentage_fee: dec!(0.029),
            stripe_fixed_fee: dec!(0.30),
            driver_rider_contribution_rate: dec!(0.20),
            fees_added_to_total: false,
            rounding: RoundingMode::HalfUp,
            margins_in_rate: false,
            vehicle_mpg: Some(DEFAULT_VEHICLE_MPG),
            max_stops: None,
            max_riders: None,
        }
    }
}

impl FeeConfig {
    /// Derive the fuel cost per mile from a gas price and fuel economy
    pub fn with_fuel_economy(mut self, gas_price_per_gallon: Decimal, mpg: Decimal) -> Self {
        if !mpg.is_zero() {
            self.fuel_cost_per_mile = gas_price_per_gallon / mpg;
        }
        self.vehicle_mpg = Some(mpg);
        self
    }

    /// Set the per-mile price bounds
    pub fn with_price_bounds(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_price_per_mile = min;
        self.max_price_per_mile = max;
        self
    }

    /// Set whether processing fees are charged on top of the subtotal
    pub fn with_fees_added_to_total(mut self, added: bool) -> Self {
        self.fees_added_to_total = added;
        self
    }

    /// Set the rounding mode
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sum of the four per-mile cost components
    pub fn operating_cost_per_mile(&self) -> Decimal {
        self.fuel_cost_per_mile
            + self.insurance_per_mile
            + self.maintenance_per_mile
            + self.depreciation_per_mile
    }

    /// Check that every amount is non-negative, every rate is a fraction,
    /// and the per-mile bounds are ordered
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("fuel_cost_per_mile", self.fuel_cost_per_mile),
            ("insurance_per_mile", self.insurance_per_mile),
            ("maintenance_per_mile", self.maintenance_per_mile),
            ("depreciation_per_mile", self.depreciation_per_mile),
            ("stop_fee", self.stop_fee),
            ("time_fee_per_minute", self.time_fee_per_minute),
            ("free_time_threshold_minutes", self.free_time_threshold_minutes),
            ("min_price_per_mile", self.min_price_per_mile),
            ("max_price_per_mile", self.max_price_per_mile),
            ("stripe_fixed_fee", self.stripe_fixed_fee),
        ];
        for (name, value) in amounts {
            if value < Decimal::ZERO {
                return Err(FareError::Config(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let rates = [
            ("recurring_discount_rate", self.recurring_discount_rate),
            ("driver_profit_margin", self.driver_profit_margin),
            ("platform_profit_margin", self.platform_profit_margin),
            ("stripe_percentage_fee", self.stripe_percentage_fee),
            (
                "driver_rider_contribution_rate",
                self.driver_rider_contribution_rate,
            ),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(FareError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.min_price_per_mile > self.max_price_per_mile {
            return Err(FareError::Config(format!(
                "min_price_per_mile {} exceeds max_price_per_mile {}",
                self.min_price_per_mile, self.max_price_per_mile
            )));
        }

        if let Some(mpg) = self.vehicle_mpg {
            if mpg <= Decimal::ZERO {
                return Err(FareError::Config(format!(
                    "vehicle_mpg must be positive, got {}",
                    mpg
                )));
            }
        }

        if self.max_riders == Some(0) {
            return Err(FareError::Config(
                "max_riders must allow at least one rider".to_string(),
            ));
        }

        Ok(())
    }
}
