//! Solvers for exact-spend combinations

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    menu::{Menu, MenuError, MenuItem},
    solution::Solution,
    solvers::knapsack::KnapsackSolver,
    topup::{PolicyError, TopUpPolicy},
    units::UnitsError,
};

pub mod knapsack;

/// Solver Errors
///
/// These are validation failures and internal defects. A balance that cannot
/// be spent exactly is not an error; solvers return an empty list for it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The starting balance is below zero.
    #[error("balance must not be negative, got {0}")]
    NegativeBalance(String),

    /// The balance and the top-up amount or menu use different currencies.
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the balance
        expected: &'static str,

        /// Conflicting currency
        found: &'static str,
    },

    /// The largest target would need a table beyond the configured limit.
    #[error("search space of {units} minor units exceeds the limit of {limit}")]
    SearchSpaceTooLarge {
        /// Largest target in minor units (saturated on overflow)
        units: u128,

        /// Configured limit in minor units
        limit: usize,
    },

    /// Wrapped top-up policy error.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Wrapped menu construction error.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// Wrapped minor unit conversion error.
    #[error(transparent)]
    Units(#[from] UnitsError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Trait for finding item combinations that spend a balance exactly
pub trait Solver {
    /// Find combinations of `menu` items costing exactly `balance` plus some
    /// number of top-ups allowed by `policy`, best first.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the inputs fail validation or the solver
    /// detects an internal inconsistency.
    fn solve<'a>(
        &self,
        balance: Money<'a, Currency>,
        menu: &Menu<'a>,
        policy: &TopUpPolicy<'a>,
    ) -> Result<Vec<Solution<'a>>, SolverError>;
}

/// Find the fewest top-ups after which `balance` can be spent exactly on
/// `items`, returning up to three distinct combinations.
///
/// Items priced at zero or less are ignored. An empty result means no
/// combination exists within `max_top_ups` top-ups.
///
/// # Errors
///
/// Returns a [`SolverError`] if the balance is negative, the top-up amount is
/// not positive, `max_top_ups` is above [`crate::topup::MAX_TOP_UPS`], the
/// currencies differ, or the search space is too large.
pub fn solve<'a>(
    balance: Money<'a, Currency>,
    items: &[MenuItem<'a>],
    top_up: Money<'a, Currency>,
    max_top_ups: u32,
) -> Result<Vec<Solution<'a>>, SolverError> {
    let menu = Menu::with_items(items.to_vec(), balance.currency())?;
    let policy = TopUpPolicy::new(top_up, max_top_ups)?;

    KnapsackSolver::default().solve(balance, &menu, &policy)
}
