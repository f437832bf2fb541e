//! Discretizer
//!
//! Converts the balance, the top-up amount and menu prices to integer minor
//! units, dropping items that would be free after rounding.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    menu::{Menu, MenuItem},
    solvers::SolverError,
    topup::{PolicyError, TopUpPolicy},
    units::to_minor_units,
};

/// A menu item with its price in minor units.
#[derive(Debug, Clone, Copy)]
pub struct PricedItem<'m, 'a> {
    item: &'m MenuItem<'a>,
    price_units: usize,
}

impl<'m, 'a> PricedItem<'m, 'a> {
    /// The underlying menu item
    pub fn item(&self) -> &'m MenuItem<'a> {
        self.item
    }

    /// Rounded price in minor units, always positive
    pub fn price_units(&self) -> usize {
        self.price_units
    }
}

/// Solver inputs in minor units.
#[derive(Debug)]
pub struct Discretized<'m, 'a> {
    balance_units: usize,
    top_up_units: usize,
    items: SmallVec<[PricedItem<'m, 'a>; 10]>,
    dropped: usize,
    currency: &'a Currency,
}

impl<'m, 'a> Discretized<'m, 'a> {
    /// Discretize a solve request.
    ///
    /// # Errors
    ///
    /// - [`SolverError::NegativeBalance`]: `balance` is below zero.
    /// - [`SolverError::CurrencyMismatch`]: the top-up or menu currency differs from the balance.
    /// - [`SolverError::Policy`]: the top-up amount rounds to zero minor units.
    /// - [`SolverError::Units`]: an amount cannot be represented in minor units.
    pub fn new(
        balance: &Money<'a, Currency>,
        menu: &'m Menu<'a>,
        policy: &TopUpPolicy<'a>,
    ) -> Result<Self, SolverError> {
        let currency = balance.currency();

        ensure_same_currency(currency, policy.currency())?;
        ensure_same_currency(currency, menu.currency())?;

        if *balance.amount() < Decimal::ZERO {
            return Err(SolverError::NegativeBalance(balance.to_string()));
        }

        let balance_units = usize::try_from(to_minor_units(balance)?)
            .map_err(|_err| SolverError::NegativeBalance(balance.to_string()))?;

        let top_up_units = usize::try_from(to_minor_units(policy.amount())?)
            .ok()
            .filter(|&units| units > 0)
            .ok_or_else(|| PolicyError::NonPositiveTopUp(policy.amount().to_string()))?;

        let mut items = SmallVec::new();
        let mut dropped = 0;

        for item in menu.iter() {
            // A zero-priced step never shrinks the remaining sum.
            match usize::try_from(to_minor_units(item.price())?) {
                Ok(price_units) if price_units > 0 => items.push(PricedItem { item, price_units }),
                _ => dropped += 1,
            }
        }

        Ok(Self {
            balance_units,
            top_up_units,
            items,
            dropped,
            currency,
        })
    }

    /// Starting balance in minor units
    pub fn balance_units(&self) -> usize {
        self.balance_units
    }

    /// One top-up in minor units
    pub fn top_up_units(&self) -> usize {
        self.top_up_units
    }

    /// Items kept after filtering, in catalog order
    pub fn items(&self) -> &[PricedItem<'m, 'a>] {
        &self.items
    }

    /// Get a kept item by its position in [`Self::items`].
    pub fn item(&self, idx: usize) -> Option<&PricedItem<'m, 'a>> {
        self.items.get(idx)
    }

    /// Item prices in minor units, indexed like [`Self::items`].
    pub fn prices(&self) -> SmallVec<[usize; 10]> {
        self.items.iter().map(PricedItem::price_units).collect()
    }

    /// Number of menu items dropped for a non-positive rounded price
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Check whether no items survived filtering.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency of every amount in the request
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// The balance after `top_ups` top-ups, in minor units.
    ///
    /// Returns `None` on overflow.
    pub fn target_units(&self, top_ups: u32) -> Option<usize> {
        let top_ups = usize::try_from(top_ups).ok()?;
        let top_up_total = top_ups.checked_mul(self.top_up_units)?;

        self.balance_units.checked_add(top_up_total)
    }

    /// The largest target reachable with `max_top_ups` top-ups, in minor units.
    ///
    /// Computed in 128 bits so callers can report oversized requests exactly.
    pub fn max_target_units(&self, max_top_ups: u32) -> u128 {
        let balance = u128::try_from(self.balance_units).unwrap_or(u128::MAX);
        let top_up = u128::try_from(self.top_up_units).unwrap_or(u128::MAX);

        top_up
            .saturating_mul(u128::from(max_top_ups))
            .saturating_add(balance)
    }
}

fn ensure_same_currency(expected: &Currency, found: &Currency) -> Result<(), SolverError> {
    if expected == found {
        Ok(())
    } else {
        Err(SolverError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            found: found.iso_alpha_code,
        })
    }
}
