//! Rider split
//!
//! On a shared trip the driver is deemed to contribute a fixed fraction of
//! the total; the rest is divided evenly among riders. The even share is
//! rounded to cents, and the leftover cents are reconciled so that the
//! shares plus the driver contribution add up to the total exactly:
//! - a positive remainder adds one cent to each of the first riders
//! - a negative remainder takes one cent from each of the last riders
//!
//! Shares are therefore non-increasing in rider order.

use ridefare_common::types::money::to_cents;
use ridefare_common::{FareError, FeeConfig, Result, RiderSplit, CENT};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::checked;

/// Largest group a split itemizes share by share
pub const MAX_SPLIT_RIDERS: u32 = 10_000;

/// Split a total among riders, returning one share per rider in order
pub fn split_price(total_price: Decimal, rider_count: u32, config: &FeeConfig) -> Result<Vec<Decimal>> {
    Ok(split_detail(total_price, rider_count, config)?.shares)
}

/// Split a total among riders, keeping the driver contribution and even share
#[instrument(level = "debug", skip(config))]
pub fn split_detail(total_price: Decimal, rider_count: u32, config: &FeeConfig) -> Result<RiderSplit> {
    config.validate()?;
    validate_split(total_price, rider_count)?;
    if rider_count > MAX_SPLIT_RIDERS {
        return Err(FareError::invalid(
            "rider_count",
            format!("must be at most {}, got {}", MAX_SPLIT_RIDERS, rider_count),
        ));
    }

    let total_price = config.rounding.round(total_price);

    if rider_count == 1 {
        return Ok(RiderSplit {
            total_price,
            driver_contribution: config.rounding.round(Decimal::ZERO),
            per_rider_share: total_price,
            shares: vec![total_price],
        });
    }

    let (driver_contribution, per_rider_share, remainder_cents) =
        share_terms(total_price, rider_count, config)?;

    let mut shares = vec![per_rider_share; rider_count as usize];
    let adjusted = remainder_cents.unsigned_abs() as usize;
    if remainder_cents > 0 {
        for share in shares.iter_mut().take(adjusted) {
            *share = checked(share.checked_add(CENT))?;
        }
    } else if remainder_cents < 0 {
        for share in shares.iter_mut().rev().take(adjusted) {
            *share = checked(share.checked_sub(CENT))?;
        }
    }

    debug!(
        %driver_contribution,
        %per_rider_share,
        remainder_cents,
        "Split fare among riders"
    );

    Ok(RiderSplit {
        total_price,
        driver_contribution,
        per_rider_share,
        shares,
    })
}

/// Share paid by the first rider, without itemizing the whole group
///
/// Agrees with `split_detail(..).shares[0]` for every group size.
pub(crate) fn first_share(total_price: Decimal, rider_count: u32, config: &FeeConfig) -> Result<Decimal> {
    validate_split(total_price, rider_count)?;
    let total_price = config.rounding.round(total_price);
    if rider_count == 1 {
        return Ok(total_price);
    }

    let (_, per_rider_share, remainder_cents) = share_terms(total_price, rider_count, config)?;
    if remainder_cents > 0 {
        checked(per_rider_share.checked_add(CENT))
    } else {
        Ok(per_rider_share)
    }
}

fn validate_split(total_price: Decimal, rider_count: u32) -> Result<()> {
    if rider_count < 1 {
        return Err(FareError::invalid("rider_count", "must be at least 1"));
    }
    if total_price < Decimal::ZERO {
        return Err(FareError::invalid(
            "total_price",
            format!("must be non-negative, got {}", total_price),
        ));
    }
    Ok(())
}

/// Driver contribution, even share, and leftover cents for a group of two or more
fn share_terms(total_price: Decimal, rider_count: u32, config: &FeeConfig) -> Result<(Decimal, Decimal, i64)> {
    let round = |amount: Decimal| config.rounding.round(amount);

    let driver_contribution = round(checked(
        total_price.checked_mul(config.driver_rider_contribution_rate),
    )?);
    let remaining = checked(total_price.checked_sub(driver_contribution))?;

    let riders = Decimal::from(rider_count);
    let per_rider_share = round(checked(remaining.checked_div(riders))?);
    let remainder = checked(
        per_rider_share
            .checked_mul(riders)
            .and_then(|allotted| remaining.checked_sub(allotted)),
    )?;
    let remainder_cents = to_cents(remainder).ok_or(FareError::Overflow)?;

    // At most one cent per rider; more means the share lost precision
    if remainder_cents.unsigned_abs() >= u64::from(rider_count) {
        return Err(FareError::Overflow);
    }

    Ok((driver_contribution, per_rider_share, remainder_cents))
}
