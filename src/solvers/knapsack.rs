//! Knapsack Solver
//!
//! Finds the fewest top-ups after which a balance can be spent exactly, using
//! unbounded-knapsack reachability over minor units:
//!
//! 1. [`discretizer`] converts the balance, top-up and prices to minor units.
//! 2. [`reachability`] tabulates every sum up to the largest possible target.
//! 3. [`paths`] walks reachable targets back into item combinations.
//! 4. This module explores top-up counts in increasing order, deduplicates the
//!    combinations and ranks them.

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, trace};

use crate::{
    menu::Menu,
    solution::Solution,
    solvers::{
        Solver, SolverError,
        knapsack::{
            discretizer::Discretized,
            observer::{KnapsackObserver, NoopObserver},
            paths::{Strategy, path_signature, reconstruct},
            reachability::ReachabilityTable,
        },
    },
    topup::TopUpPolicy,
    units::from_minor_units,
};

pub mod discretizer;
pub mod observer;
pub mod paths;
pub mod reachability;

/// Number of distinct solutions returned when none is configured.
pub const DEFAULT_MAX_SOLUTIONS: usize = 3;

/// Solver using unbounded-knapsack dynamic programming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnapsackSolver {
    max_solutions: usize,
    allow_empty: bool,
}

impl Default for KnapsackSolver {
    fn default() -> Self {
        Self {
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            allow_empty: false,
        }
    }
}

impl KnapsackSolver {
    /// Create a solver returning up to [`DEFAULT_MAX_SOLUTIONS`] solutions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return at most `max_solutions` solutions (at least one).
    ///
    /// A limit of one gives the single best combination for the smallest
    /// feasible number of top-ups.
    #[must_use]
    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions.max(1);
        self
    }

    /// Accept buying nothing when the balance is already zero.
    #[must_use]
    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Maximum number of solutions returned
    pub fn max_solutions(&self) -> usize {
        self.max_solutions
    }

    /// Whether a zero-item solution may be returned
    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    /// Solve, reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the inputs fail validation, the search
    /// space exceeds the policy limit, or an internal invariant is violated.
    #[tracing::instrument(
        name = "knapsack.solve",
        skip_all,
        fields(
            balance = %balance,
            top_up = %policy.amount(),
            max_top_ups = policy.max_top_ups(),
            menu_items = menu.len()
        )
    )]
    pub fn solve_with_observer<'a, O: KnapsackObserver>(
        &self,
        balance: Money<'a, Currency>,
        menu: &Menu<'a>,
        policy: &TopUpPolicy<'a>,
        observer: &mut O,
    ) -> Result<Vec<Solution<'a>>, SolverError> {
        let discretized = Discretized::new(&balance, menu, policy)?;

        observer.on_discretized(
            discretized.balance_units(),
            discretized.top_up_units(),
            discretized.items().len(),
            discretized.dropped(),
        );

        debug!(
            balance_units = discretized.balance_units(),
            top_up_units = discretized.top_up_units(),
            kept = discretized.items().len(),
            dropped = discretized.dropped(),
            "discretized inputs"
        );

        if discretized.is_empty() {
            debug!("no positively priced items on the menu");

            return Ok(Vec::new());
        }

        let max_target = search_space(&discretized, policy)?;

        let prices = discretized.prices();
        let table = ReachabilityTable::build(&prices, max_target);

        observer.on_table_built(max_target, table.reachable_count());

        debug!(
            max_target,
            reachable = table.reachable_count(),
            "built reachability table"
        );

        let mut solutions: Vec<Solution<'a>> = Vec::with_capacity(self.max_solutions);
        let mut signatures = FxHashSet::default();

        'top_ups: for top_ups in 0..=policy.max_top_ups() {
            let target = discretized
                .target_units(top_ups)
                .filter(|&target| target <= max_target)
                .ok_or(SolverError::InvariantViolation {
                    message: "top-up target lies beyond the tabulated sums",
                })?;

            let reachable = table.is_reachable(target) && (target > 0 || self.allow_empty);

            observer.on_target(top_ups, target, reachable);
            trace!(top_ups, target, reachable, "explored target");

            if !reachable {
                continue;
            }

            let mut path_signatures = FxHashSet::default();

            for strategy in Strategy::ALL {
                let path = reconstruct(&table, &prices, target, strategy)?;

                observer.on_path(top_ups, strategy, path.as_deref());

                let Some(path) = path else {
                    trace!(top_ups, %strategy, "abandoned path over the step limit");
                    continue;
                };

                if !path_signatures.insert(path_signature(&path)) {
                    continue;
                }

                let solution = build_solution(&discretized, top_ups, target, &path)?;

                if !signatures.insert(solution.signature()) {
                    trace!(top_ups, %strategy, "skipped duplicate combination");
                    continue;
                }

                observer.on_solution(&solution);
                solutions.push(solution);

                if solutions.len() >= self.max_solutions {
                    break 'top_ups;
                }
            }
        }

        solutions.sort_by(Solution::rank_cmp);

        debug!(found = solutions.len(), "ranked solutions");

        Ok(solutions)
    }
}

impl Solver for KnapsackSolver {
    fn solve<'a>(
        &self,
        balance: Money<'a, Currency>,
        menu: &Menu<'a>,
        policy: &TopUpPolicy<'a>,
    ) -> Result<Vec<Solution<'a>>, SolverError> {
        self.solve_with_observer(balance, menu, policy, &mut NoopObserver)
    }
}

/// Largest target to tabulate, rejected up front if over the policy limit.
fn search_space(
    discretized: &Discretized<'_, '_>,
    policy: &TopUpPolicy<'_>,
) -> Result<usize, SolverError> {
    let units = discretized.max_target_units(policy.max_top_ups());
    let limit = policy.max_target_units();

    usize::try_from(units)
        .ok()
        .filter(|&max_target| max_target <= limit)
        .ok_or(SolverError::SearchSpaceTooLarge { units, limit })
}

/// Turn a reconstructed path into a solution holding copies of its items.
fn build_solution<'a>(
    discretized: &Discretized<'_, 'a>,
    top_ups: u32,
    target: usize,
    path: &[usize],
) -> Result<Solution<'a>, SolverError> {
    let mut items = Vec::with_capacity(path.len());
    let mut total_units: usize = 0;

    for &idx in path {
        let priced = discretized
            .item(idx)
            .ok_or(SolverError::InvariantViolation {
                message: "path points outside the item list",
            })?;

        total_units = total_units.saturating_add(priced.price_units());
        items.push(priced.item().clone());
    }

    debug_assert_eq!(total_units, target, "path for {top_ups} top-ups misses its target");

    if total_units != target {
        return Err(SolverError::InvariantViolation {
            message: "path total differs from its target",
        });
    }

    let currency = discretized.currency();

    Ok(Solution::new(
        top_ups,
        from_minor_units(target, currency)?,
        items,
        from_minor_units(total_units, currency)?,
    ))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::menu::MenuItem;

    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        discretized: Option<(usize, usize, usize, usize)>,
        table: Option<(usize, usize)>,
        targets: Vec<(u32, usize, bool)>,
        paths: Vec<(u32, Strategy, Option<Vec<usize>>)>,
        solutions: Vec<String>,
    }

    impl KnapsackObserver for Recorder {
        fn on_discretized(&mut self, balance: usize, top_up: usize, kept: usize, dropped: usize) {
            self.discretized = Some((balance, top_up, kept, dropped));
        }

        fn on_table_built(&mut self, max_target: usize, reachable: usize) {
            self.table = Some((max_target, reachable));
        }

        fn on_target(&mut self, top_ups: u32, target_units: usize, reachable: bool) {
            self.targets.push((top_ups, target_units, reachable));
        }

        fn on_path(&mut self, top_ups: u32, strategy: Strategy, path: Option<&[usize]>) {
            self.paths.push((top_ups, strategy, path.map(<[usize]>::to_vec)));
        }

        fn on_solution(&mut self, solution: &Solution<'_>) {
            self.solutions.push(solution.signature());
        }
    }

    fn usd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, USD)
    }

    fn five_and_seven() -> Result<Menu<'static>, crate::menu::MenuError> {
        Menu::with_items(
            [
                MenuItem::new("five", "Five", usd(500)),
                MenuItem::new("seven", "Seven", usd(700)),
            ],
            USD,
        )
    }

    fn signatures(solutions: &[Solution<'_>]) -> Vec<String> {
        solutions.iter().map(Solution::signature).collect()
    }

    #[test]
    fn observer_sees_the_search_in_order() -> TestResult {
        let menu = Menu::with_items([MenuItem::new("pie", "Pie", usd(650))], USD)?;
        let policy = TopUpPolicy::new(usd(1000), 3)?;
        let mut recorder = Recorder::default();

        let solutions =
            KnapsackSolver::new().solve_with_observer(usd(300), &menu, &policy, &mut recorder)?;

        assert_eq!(signatures(&solutions), vec!["Pie:2"]);
        assert_eq!(recorder.discretized, Some((300, 1000, 1, 0)));
        assert_eq!(recorder.table.map(|(max_target, _)| max_target), Some(3300));
        assert_eq!(
            recorder.targets,
            vec![
                (0, 300, false),
                (1, 1300, true),
                (2, 2300, false),
                (3, 3300, false),
            ]
        );
        assert_eq!(
            recorder.paths,
            vec![
                (1, Strategy::LargestFirst, Some(vec![0, 0])),
                (1, Strategy::SmallestFirst, Some(vec![0, 0])),
                (1, Strategy::Variety, Some(vec![0, 0])),
            ]
        );
        assert_eq!(recorder.solutions, vec!["Pie:2"]);

        Ok(())
    }

    #[test]
    fn search_stops_once_enough_solutions_are_found() -> TestResult {
        let menu = five_and_seven()?;
        let policy = TopUpPolicy::new(usd(1000), 5)?;
        let mut recorder = Recorder::default();

        let solutions =
            KnapsackSolver::new().solve_with_observer(usd(1500), &menu, &policy, &mut recorder)?;

        assert_eq!(signatures(&solutions), vec!["Five:3", "Five:5", "Seven:5"]);
        assert_eq!(recorder.targets.len(), 3);

        Ok(())
    }

    #[test]
    fn larger_limits_rank_within_a_top_up_count() -> TestResult {
        let menu = five_and_seven()?;
        let policy = TopUpPolicy::new(usd(1000), 5)?;

        let solutions = KnapsackSolver::new()
            .with_max_solutions(5)
            .solve(usd(1500), &menu, &policy)?;

        assert_eq!(
            signatures(&solutions),
            vec!["Five:3", "Five:5", "Seven:5", "Five:7", "Five:2|Seven:5"]
        );

        let top_ups: Vec<u32> = solutions.iter().map(Solution::top_ups_needed).collect();

        assert_eq!(top_ups, vec![0, 1, 2, 2, 3]);

        Ok(())
    }

    #[test]
    fn single_solution_limit_returns_the_best_only() -> TestResult {
        let menu = five_and_seven()?;
        let policy = TopUpPolicy::new(usd(1000), 5)?;

        let solutions = KnapsackSolver::new()
            .with_max_solutions(1)
            .solve(usd(1500), &menu, &policy)?;

        assert_eq!(signatures(&solutions), vec!["Five:3"]);

        Ok(())
    }

    #[test]
    fn solution_limit_is_at_least_one() {
        let solver = KnapsackSolver::new().with_max_solutions(0);

        assert_eq!(solver.max_solutions(), 1);
    }

    #[test]
    fn duplicate_names_collapse_into_one_solution() -> TestResult {
        let menu = Menu::with_items(
            [
                MenuItem::new("latte-small", "Latte", usd(300)),
                MenuItem::new("latte-large", "Latte", usd(300)),
            ],
            USD,
        )?;
        let policy = TopUpPolicy::new(usd(1000), 0)?;
        let mut recorder = Recorder::default();

        let solutions =
            KnapsackSolver::new().solve_with_observer(usd(600), &menu, &policy, &mut recorder)?;

        assert_eq!(signatures(&solutions), vec!["Latte:2"]);
        assert_eq!(
            recorder.paths.last(),
            Some(&(0, Strategy::Variety, Some(vec![0, 1])))
        );

        Ok(())
    }

    #[test]
    fn zero_balance_needs_a_top_up_by_default() -> TestResult {
        let menu = Menu::with_items([MenuItem::new("bun", "Bun", usd(250))], USD)?;
        let policy = TopUpPolicy::new(usd(1000), 1)?;

        let solutions = KnapsackSolver::new().solve(usd(0), &menu, &policy)?;

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions.first().map(Solution::top_ups_needed), Some(1));
        assert_eq!(solutions.first().map(Solution::item_count), Some(4));

        Ok(())
    }

    #[test]
    fn zero_balance_may_be_left_alone_when_allowed() -> TestResult {
        let menu = Menu::with_items([MenuItem::new("bun", "Bun", usd(250))], USD)?;
        let policy = TopUpPolicy::new(usd(1000), 1)?;

        let solutions = KnapsackSolver::new()
            .with_allow_empty(true)
            .solve(usd(0), &menu, &policy)?;

        let empty = solutions.first().ok_or("expected an empty solution")?;

        assert_eq!(solutions.len(), 2);
        assert_eq!(empty.top_ups_needed(), 0);
        assert_eq!(empty.item_count(), 0);
        assert_eq!(empty.total_cost(), usd(0));

        Ok(())
    }

    #[test]
    fn oversized_search_space_is_rejected() -> TestResult {
        let menu = five_and_seven()?;
        let policy = TopUpPolicy::new(usd(1000), 5)?.with_max_target_units(1000);

        let result = KnapsackSolver::new().solve(usd(1500), &menu, &policy);

        assert_eq!(
            result.err(),
            Some(SolverError::SearchSpaceTooLarge {
                units: 6500,
                limit: 1000,
            })
        );

        Ok(())
    }

    #[test]
    fn free_menu_skips_the_search_space_limit() -> TestResult {
        let menu = Menu::with_items([MenuItem::new("water", "Water", usd(0))], USD)?;
        let policy = TopUpPolicy::default_for(USD).with_max_target_units(100);

        let solutions = KnapsackSolver::new().solve(usd(300_000), &menu, &policy)?;

        assert!(solutions.is_empty());

        Ok(())
    }

    #[test]
    fn free_menu_skips_the_table() -> TestResult {
        let menu = Menu::with_items([MenuItem::new("water", "Water", usd(0))], USD)?;
        let policy = TopUpPolicy::default_for(USD);
        let mut recorder = Recorder::default();

        let solutions =
            KnapsackSolver::new().solve_with_observer(usd(500), &menu, &policy, &mut recorder)?;

        assert!(solutions.is_empty());
        assert_eq!(recorder.discretized, Some((500, 1000, 0, 1)));
        assert_eq!(recorder.table, None);
        assert!(recorder.targets.is_empty());

        Ok(())
    }
}
