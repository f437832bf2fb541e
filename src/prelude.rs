//! Spendable prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError, LoadedMenu},
    menu::{Menu, MenuError, MenuItem},
    report::{ReportError, write_solutions},
    solution::Solution,
    solvers::{
        Solver, SolverError,
        knapsack::{
            DEFAULT_MAX_SOLUTIONS, KnapsackSolver,
            observer::{KnapsackObserver, NoopObserver},
            paths::{MAX_RECONSTRUCTION_STEPS, Strategy},
        },
        solve,
    },
    topup::{DEFAULT_MAX_TARGET_UNITS, DEFAULT_MAX_TOP_UPS, MAX_TOP_UPS, PolicyError, TopUpPolicy},
    units::{UnitsError, from_minor_units, to_minor_units},
};
