//! Top-ups

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::units::{UnitsError, to_minor_units};

/// Upper bound on the number of top-ups a single solve may explore.
pub const MAX_TOP_UPS: u32 = 500;

/// Number of top-ups explored when none is configured.
pub const DEFAULT_MAX_TOP_UPS: u32 = 10;

/// Largest reachable sum, in minor units, a solve may tabulate.
pub const DEFAULT_MAX_TARGET_UNITS: usize = 250_000;

/// Errors raised while building a top-up policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The top-up amount rounds to zero or less minor units.
    #[error("top-up amount must be at least one minor unit, got {0}")]
    NonPositiveTopUp(String),

    /// More top-ups were requested than a solve may explore.
    #[error("at most {limit} top-ups can be searched, requested {requested}")]
    TooManyTopUps {
        /// Requested number of top-ups
        requested: u32,

        /// Maximum allowed number of top-ups
        limit: u32,
    },

    /// Wrapped minor unit conversion error.
    #[error(transparent)]
    Units(#[from] UnitsError),
}

/// How a balance may be increased: a fixed top-up amount, applied up to
/// `max_top_ups` times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopUpPolicy<'a> {
    amount: Money<'a, Currency>,
    max_top_ups: u32,
    max_target_units: usize,
}

impl<'a> TopUpPolicy<'a> {
    /// Create a policy topping up by `amount` at most `max_top_ups` times.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::NonPositiveTopUp`]: `amount` rounds to less than one minor unit.
    /// - [`PolicyError::TooManyTopUps`]: `max_top_ups` exceeds [`MAX_TOP_UPS`].
    /// - [`PolicyError::Units`]: `amount` cannot be represented in minor units.
    pub fn new(amount: Money<'a, Currency>, max_top_ups: u32) -> Result<Self, PolicyError> {
        if to_minor_units(&amount)? <= 0 {
            return Err(PolicyError::NonPositiveTopUp(amount.to_string()));
        }

        if max_top_ups > MAX_TOP_UPS {
            return Err(PolicyError::TooManyTopUps {
                requested: max_top_ups,
                limit: MAX_TOP_UPS,
            });
        }

        Ok(Self {
            amount,
            max_top_ups,
            max_target_units: DEFAULT_MAX_TARGET_UNITS,
        })
    }

    /// Ten major units of `currency`, up to [`DEFAULT_MAX_TOP_UPS`] times.
    pub fn default_for(currency: &'a Currency) -> Self {
        Self {
            amount: Money::from_decimal(Decimal::TEN, currency),
            max_top_ups: DEFAULT_MAX_TOP_UPS,
            max_target_units: DEFAULT_MAX_TARGET_UNITS,
        }
    }

    /// Override the largest sum, in minor units, a solve may tabulate.
    #[must_use]
    pub fn with_max_target_units(mut self, max_target_units: usize) -> Self {
        self.max_target_units = max_target_units;
        self
    }

    /// The amount added by one top-up
    pub fn amount(&self) -> &Money<'a, Currency> {
        &self.amount
    }

    /// The maximum number of top-ups to explore
    pub fn max_top_ups(&self) -> u32 {
        self.max_top_ups
    }

    /// The largest sum, in minor units, a solve may tabulate
    pub fn max_target_units(&self) -> usize {
        self.max_target_units
    }

    /// The currency top-ups are made in
    pub fn currency(&self) -> &'a Currency {
        self.amount.currency()
    }
}
