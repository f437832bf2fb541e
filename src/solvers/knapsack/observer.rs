//! Knapsack Observer

use crate::{solution::Solution, solvers::knapsack::paths::Strategy};

/// Observer trait for following a knapsack solve as it runs.
///
/// Every callback has an empty default, so observers only implement what
/// they record. The solver calls them in search order: discretization, the
/// table build, then each explored top-up count with its paths and accepted
/// solutions.
pub trait KnapsackObserver {
    /// Called once the inputs are in minor units.
    ///
    /// # Parameters
    ///
    /// - `balance_units`: Starting balance
    /// - `top_up_units`: Size of one top-up
    /// - `kept`: Items with a positive rounded price
    /// - `dropped`: Items ignored for a non-positive rounded price
    fn on_discretized(
        &mut self,
        _balance_units: usize,
        _top_up_units: usize,
        _kept: usize,
        _dropped: usize,
    ) {
    }

    /// Called after the reachability table is built.
    fn on_table_built(&mut self, _max_target: usize, _reachable: usize) {}

    /// Called for each top-up count considered, smallest first.
    ///
    /// `reachable` is false when the target cannot be spent exactly, or is
    /// zero and empty combinations are disallowed.
    fn on_target(&mut self, _top_ups: u32, _target_units: usize, _reachable: bool) {}

    /// Called after each reconstruction attempt; `path` is `None` if the
    /// walk was abandoned.
    fn on_path(&mut self, _top_ups: u32, _strategy: Strategy, _path: Option<&[usize]>) {}

    /// Called when a solution is accepted as unique.
    fn on_solution(&mut self, _solution: &Solution<'_>) {}
}

/// Observer that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl KnapsackObserver for NoopObserver {}
