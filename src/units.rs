//! Minor Units
//!
//! Conversion between decimal [`Money`] amounts and integer minor units
//! (pence, cents). All solver arithmetic happens on the integer side.
//!
//! Rounding is to the nearest minor unit with midpoints rounded away from
//! zero, so `2.345 USD` becomes `235` and `-0.005 USD` becomes `-1`.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors converting between money amounts and minor units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    /// The amount does not fit in signed 64-bit minor units.
    #[error("amount {0} cannot be represented in minor units")]
    NotRepresentable(String),
}

/// Scale factor between major and minor units for a currency.
fn minor_scale(currency: &Currency) -> Option<Decimal> {
    10_i64.checked_pow(currency.exponent).map(Decimal::from)
}

/// Converts a money amount to minor units of its currency.
///
/// # Errors
///
/// Returns [`UnitsError::NotRepresentable`] if the scaled amount overflows `i64`.
pub fn to_minor_units(money: &Money<'_, Currency>) -> Result<i64, UnitsError> {
    minor_scale(money.currency())
        .and_then(|scale| money.amount().checked_mul(scale))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or_else(|| UnitsError::NotRepresentable(money.to_string()))
}

/// Builds a money amount from a non-negative count of minor units.
///
/// # Errors
///
/// Returns [`UnitsError::NotRepresentable`] if `units` overflows `i64`.
pub fn from_minor_units(
    units: usize,
    currency: &Currency,
) -> Result<Money<'_, Currency>, UnitsError> {
    let minor =
        i64::try_from(units).map_err(|_err| UnitsError::NotRepresentable(units.to_string()))?;

    Ok(Money::from_minor(minor, currency))
}
