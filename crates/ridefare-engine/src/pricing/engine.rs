//! Fare calculation
//!
//! Converts a [`TripInput`] into an itemized [`PriceBreakdown`]:
//! - Per-mile rate from vehicle operating costs, clamped to the floor/ceiling
//! - Stop and overtime fees
//! - Recurring discount
//! - Platform/driver partition and card processing fees
//!
//! Each currency field is rounded on its own; dependent fields are derived
//! from the rounded values so the partition holds to the cent.

use ridefare_common::{FeeConfig, PriceBreakdown, Result, TripInput};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::checked;
use super::split::first_share;

/// Calculate the itemized price of a trip
#[instrument(
    level = "debug",
    skip_all,
    fields(
        distance = %trip.distance_miles,
        duration = %trip.duration_minutes,
        stops = trip.stop_count,
        recurring = trip.is_recurring,
        riders = trip.rider_count,
    )
)]
pub fn calculate_price(trip: &TripInput, config: &FeeConfig) -> Result<PriceBreakdown> {
    config.validate()?;
    trip.validate(config)?;
    let round = |amount: Decimal| config.rounding.round(amount);

    let effective_price_per_mile = effective_price_per_mile(trip, config)?;

    let base_price = round(checked(
        effective_price_per_mile.checked_mul(trip.distance_miles),
    )?);
    let stop_fee_total = round(checked(
        config.stop_fee.checked_mul(Decimal::from(trip.stop_count)),
    )?);

    let billable_minutes =
        (trip.duration_minutes - config.free_time_threshold_minutes).max(Decimal::ZERO);
    let time_fee_total = round(checked(
        config.time_fee_per_minute.checked_mul(billable_minutes),
    )?);

    let raw_subtotal = checked(
        base_price
            .checked_add(stop_fee_total)
            .and_then(|sum| sum.checked_add(time_fee_total)),
    )?;

    let subtotal = if trip.is_recurring {
        round(raw_subtotal * (Decimal::ONE - config.recurring_discount_rate))
    } else {
        raw_subtotal
    };
    let discount = raw_subtotal - subtotal;

    let platform_profit = round(subtotal * config.platform_profit_margin);
    let driver_earnings = subtotal - platform_profit;

    let stripe_fees = round(checked(
        (subtotal * config.stripe_percentage_fee).checked_add(config.stripe_fixed_fee),
    )?);

    let total_price = if config.fees_added_to_total {
        checked(subtotal.checked_add(stripe_fees))?
    } else {
        subtotal
    };

    let price_per_mile = if trip.distance_miles > Decimal::ZERO {
        Some(round(checked(total_price.checked_div(trip.distance_miles))?))
    } else {
        None
    };

    let price_per_rider = if trip.is_shared() {
        Some(first_share(total_price, trip.rider_count, config)?)
    } else {
        None
    };

    debug!(
        %base_price,
        %stop_fee_total,
        %time_fee_total,
        %subtotal,
        %total_price,
        "Calculated fare"
    );

    Ok(PriceBreakdown {
        effective_price_per_mile,
        base_price,
        stop_fee_total,
        time_fee_total,
        discount,
        subtotal,
        platform_profit,
        driver_earnings,
        stripe_fees,
        total_price,
        price_per_mile,
        price_per_rider,
    })
}

/// Per-mile rate for this trip after margins and clamping
pub fn effective_price_per_mile(trip: &TripInput, config: &FeeConfig) -> Result<Decimal> {
    let fuel_cost_per_mile = match (trip.gas_price_per_gallon, config.vehicle_mpg) {
        (Some(gas_price), Some(mpg)) if mpg > Decimal::ZERO => {
            checked(gas_price.checked_div(mpg))?
        }
        _ => config.fuel_cost_per_mile,
    };

    let mut operating_cost = checked(
        fuel_cost_per_mile
            .checked_add(config.insurance_per_mile)
            .and_then(|sum| sum.checked_add(config.maintenance_per_mile))
            .and_then(|sum| sum.checked_add(config.depreciation_per_mile)),
    )?;

    if config.margins_in_rate {
        operating_cost = checked(
            operating_cost
                .checked_mul(Decimal::ONE + config.driver_profit_margin)
                .and_then(|cost| cost.checked_mul(Decimal::ONE + config.platform_profit_margin)),
        )?;
    }

    let effective = operating_cost.clamp(config.min_price_per_mile, config.max_price_per_mile);
    if effective != operating_cost {
        debug!(%operating_cost, %effective, "Clamped per-mile rate");
    }
    Ok(effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridefare_common::{FareError, RoundingMode};
    use rust_decimal_macros::dec;

    /// Operating cost of $0.20/mi, raised to the $0.25 floor
    fn floor_config() -> FeeConfig {
        FeeConfig {
            fuel_cost_per_mile: dec!(0.05),
            insurance_per_mile: dec!(0.05),
            maintenance_per_mile: dec!(0.05),
            depreciation_per_mile: dec!(0.05),
            ..FeeConfig::default()
        }
    }

    #[test]
    fn test_ten_mile_trip_at_floor_rate() {
        let trip = TripInput::new(dec!(10), dec!(30)).with_stops(2);
        let breakdown = calculate_price(&trip, &floor_config()).unwrap();

        assert_eq!(breakdown.effective_price_per_mile, dec!(0.25));
        assert_eq!(breakdown.base_price, dec!(2.50));
        assert_eq!(breakdown.stop_fee_total, dec!(4.00));
        assert_eq!(breakdown.time_fee_total, dec!(0.00));
        assert_eq!(breakdown.subtotal, dec!(6.50));
        assert_eq!(breakdown.platform_profit, dec!(0.33));
        assert_eq!(breakdown.driver_earnings, dec!(6.17));
        assert_eq!(breakdown.stripe_fees, dec!(0.49));
        assert_eq!(breakdown.total_price, dec!(6.50));
        assert_eq!(breakdown.price_per_mile, Some(dec!(0.65)));
        assert_eq!(breakdown.price_per_rider, None);
    }

    #[test]
    fn test_fees_added_to_total() {
        let config = floor_config().with_fees_added_to_total(true);
        let trip = TripInput::new(dec!(10), dec!(30)).with_stops(2);
        let breakdown = calculate_price(&trip, &config).unwrap();

        assert_eq!(breakdown.subtotal, dec!(6.50));
        assert_eq!(breakdown.total_price, dec!(6.99));
        assert_eq!(breakdown.price_per_mile, Some(dec!(0.70)));
    }

    #[test]
    fn test_ceiling_clamp() {
        // Default operating cost is 0.47, above the 0.45 ceiling
        let trip = TripInput::new(dec!(100), dec!(0));
        let breakdown = calculate_price(&trip, &FeeConfig::default()).unwrap();

        assert_eq!(breakdown.effective_price_per_mile, dec!(0.45));
        assert_eq!(breakdown.base_price, dec!(45.00));
    }

    #[test]
    fn test_rate_within_bounds_is_unchanged() {
        let config = FeeConfig::default().with_price_bounds(dec!(0.10), dec!(1.00));
        let trip = TripInput::new(dec!(10), dec!(0));
        assert_eq!(
            effective_price_per_mile(&trip, &config).unwrap(),
            dec!(0.47)
        );
    }

    #[test]
    fn test_margins_in_rate() {
        let config = FeeConfig {
            margins_in_rate: true,
            ..FeeConfig::default().with_price_bounds(dec!(0.10), dec!(1.00))
        };
        let trip = TripInput::new(dec!(10), dec!(0));
        // 0.47 × 1.20 × 1.05
        assert_eq!(
            effective_price_per_mile(&trip, &config).unwrap(),
            dec!(0.5922)
        );
    }

    #[test]
    fn test_trip_gas_price_overrides_fuel_cost() {
        let config = FeeConfig::default().with_price_bounds(dec!(0.10), dec!(1.00));
        // 5.00 / 25 = 0.20 fuel, plus 0.33 of other costs
        let trip = TripInput::new(dec!(10), dec!(0)).with_gas_price(dec!(5.00));
        assert_eq!(
            effective_price_per_mile(&trip, &config).unwrap(),
            dec!(0.53)
        );

        let no_mpg = FeeConfig {
            vehicle_mpg: None,
            ..config
        };
        assert_eq!(
            effective_price_per_mile(&trip, &no_mpg).unwrap(),
            dec!(0.47)
        );
    }

    #[test]
    fn test_time_fee_beyond_threshold() {
        let trip = TripInput::new(dec!(0), dec!(90));
        let breakdown = calculate_price(&trip, &FeeConfig::default()).unwrap();
        // 30 billable minutes at $0.25
        assert_eq!(breakdown.time_fee_total, dec!(7.50));

        let at_threshold = TripInput::new(dec!(0), dec!(60));
        let breakdown = calculate_price(&at_threshold, &FeeConfig::default()).unwrap();
        assert_eq!(breakdown.time_fee_total, dec!(0.00));
    }

    #[test]
    fn test_recurring_discount() {
        // 10 stops at $1.00 gives a raw subtotal of exactly $10.00
        let config = FeeConfig {
            stop_fee: dec!(1.00),
            ..FeeConfig::default()
        };
        let trip = TripInput::new(dec!(0), dec!(0))
            .with_stops(10)
            .with_recurring(true);
        let breakdown = calculate_price(&trip, &config).unwrap();

        assert_eq!(breakdown.raw_subtotal(), dec!(10.00));
        assert_eq!(breakdown.subtotal, dec!(9.00));
        assert_eq!(breakdown.discount, dec!(1.00));
        assert_eq!(breakdown.total_price, dec!(9.00));
    }

    #[test]
    fn test_zero_distance() {
        let trip = TripInput::new(dec!(0), dec!(0));
        let breakdown = calculate_price(&trip, &FeeConfig::default()).unwrap();

        assert_eq!(breakdown.total_price, dec!(0.00));
        assert_eq!(breakdown.price_per_mile, None);
        assert_eq!(
            breakdown.per_mile().unwrap_err(),
            FareError::DivisionByZero {
                field: "distance_miles"
            }
        );
    }

    #[test]
    fn test_zero_distance_keeps_stop_fees() {
        let trip = TripInput::new(dec!(0), dec!(0)).with_stops(1);
        let breakdown = calculate_price(&trip, &FeeConfig::default()).unwrap();
        assert_eq!(breakdown.total_price, dec!(2.00));
        assert!(breakdown.per_mile().is_err());
    }

    #[test]
    fn test_shared_trip_fills_price_per_rider() {
        let config = FeeConfig {
            stop_fee: dec!(1.00),
            ..FeeConfig::default()
        };
        let trip = TripInput::new(dec!(0), dec!(0))
            .with_stops(10)
            .with_riders(3);
        let breakdown = calculate_price(&trip, &config).unwrap();
        assert_eq!(breakdown.price_per_rider, Some(dec!(2.67)));
    }

    #[test]
    fn test_huge_rider_count_prices_first_share() {
        let trip = TripInput::new(dec!(10), dec!(30)).with_riders(u32::MAX);
        let breakdown = calculate_price(&trip, &FeeConfig::default()).unwrap();

        assert_eq!(breakdown.total_price, dec!(4.50));
        assert_eq!(breakdown.price_per_rider, Some(dec!(0.01)));
    }

    #[test]
    fn test_half_even_rounding() {
        let config = floor_config().with_rounding(RoundingMode::HalfEven);
        let trip = TripInput::new(dec!(10), dec!(30)).with_stops(2);
        let breakdown = calculate_price(&trip, &config).unwrap();

        // 6.50 × 0.05 = 0.325 rounds to the even cent
        assert_eq!(breakdown.platform_profit, dec!(0.32));
        assert_eq!(breakdown.driver_earnings, dec!(6.18));
    }

    #[test]
    fn test_invalid_trip() {
        let trip = TripInput::new(dec!(-3), dec!(10));
        let err = calculate_price(&trip, &FeeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            FareError::InvalidInput {
                field: "distance_miles",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = FeeConfig::default().with_price_bounds(dec!(1), dec!(0));
        let trip = TripInput::new(dec!(3), dec!(10));
        assert!(matches!(
            calculate_price(&trip, &config),
            Err(FareError::Config(_))
        ));
    }

    #[test]
    fn test_overflowing_distance() {
        let config = FeeConfig::default().with_price_bounds(dec!(2), dec!(2));
        let trip = TripInput::new(Decimal::MAX, dec!(0));
        assert_eq!(
            calculate_price(&trip, &config).unwrap_err(),
            FareError::Overflow
        );
    }
}
