//! Path Reconstruction
//!
//! Walks a [`ReachabilityTable`] back from a target sum to zero, picking one
//! recorded step at a time.

use std::{cmp::Reverse, fmt};

use smallvec::SmallVec;

use crate::solvers::{
    SolverError,
    knapsack::reachability::{ReachabilityTable, Step},
};

/// Longest path a reconstruction may produce before giving up.
pub const MAX_RECONSTRUCTION_STEPS: usize = 1000;

/// Item indices in the order they were walked back.
pub type Path = SmallVec<[usize; 16]>;

/// How to pick among the recorded last steps of a sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Most expensive candidate, lowest index on ties.
    LargestFirst,

    /// Cheapest candidate, lowest index on ties.
    SmallestFirst,

    /// First candidate not yet used on this path, else the first candidate.
    Variety,
}

impl Strategy {
    /// Every strategy, in the order solvers try them.
    pub const ALL: [Strategy; 3] = [
        Strategy::LargestFirst,
        Strategy::SmallestFirst,
        Strategy::Variety,
    ];

    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::LargestFirst => "largest-first",
            Strategy::SmallestFirst => "smallest-first",
            Strategy::Variety => "variety",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconstruct one combination of items summing exactly to `target`.
///
/// Returns `Ok(None)` when no path exists: the target is unreachable, or the
/// walk exceeds [`MAX_RECONSTRUCTION_STEPS`] items.
///
/// # Errors
///
/// Returns [`SolverError::InvariantViolation`] if the table records a step
/// that does not match `prices`.
pub fn reconstruct(
    table: &ReachabilityTable,
    prices: &[usize],
    target: usize,
    strategy: Strategy,
) -> Result<Option<Path>, SolverError> {
    let mut path = Path::new();
    let mut remaining = target;

    while remaining > 0 {
        let Some(idx) = choose(strategy, table.steps(remaining), prices, &path)? else {
            return Ok(None);
        };

        let price = prices.get(idx).copied().unwrap_or_default();

        debug_assert!(
            price > 0 && price <= remaining,
            "step item {idx} priced {price} cannot precede sum {remaining}"
        );

        if price == 0 || price > remaining {
            return Err(SolverError::InvariantViolation {
                message: "recorded step does not lead back to a reachable sum",
            });
        }

        path.push(idx);
        remaining -= price;

        if path.len() > MAX_RECONSTRUCTION_STEPS {
            return Ok(None);
        }
    }

    Ok(Some(path))
}

/// Order-independent key for a path: its sorted item indices.
pub fn path_signature(path: &[usize]) -> String {
    let mut sorted: Path = path.iter().copied().collect();
    sorted.sort_unstable();

    sorted
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn choose(
    strategy: Strategy,
    steps: &[Step],
    prices: &[usize],
    path: &[usize],
) -> Result<Option<usize>, SolverError> {
    let candidates = steps
        .iter()
        .filter_map(|step| match step {
            Step::Item(idx) => Some(*idx),
            Step::Origin => None,
        })
        .map(|idx| {
            debug_assert!(idx < prices.len(), "step item {idx} is out of range");

            prices
                .get(idx)
                .map(|&price| (idx, price))
                .ok_or(SolverError::InvariantViolation {
                    message: "recorded step points outside the item list",
                })
        })
        .collect::<Result<SmallVec<[(usize, usize); 4]>, _>>()?;

    let chosen = match strategy {
        Strategy::LargestFirst => candidates
            .iter()
            .min_by_key(|&&(idx, price)| (Reverse(price), idx)),
        Strategy::SmallestFirst => candidates
            .iter()
            .min_by_key(|&&(idx, price)| (price, idx)),
        Strategy::Variety => candidates
            .iter()
            .find(|(idx, _)| !path.contains(idx))
            .or_else(|| candidates.first()),
    };

    Ok(chosen.map(|&(idx, _)| idx))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn sum(path: &[usize], prices: &[usize]) -> usize {
        path.iter()
            .filter_map(|&idx| prices.get(idx))
            .sum()
    }

    #[test]
    fn zero_target_is_the_empty_path() -> TestResult {
        let table = ReachabilityTable::build(&[5], 10);

        let path = reconstruct(&table, &[5], 0, Strategy::LargestFirst)?;

        assert_eq!(path.as_deref(), Some(&[][..]));

        Ok(())
    }

    #[test]
    fn unreachable_target_has_no_path() -> TestResult {
        let prices = [5];
        let table = ReachabilityTable::build(&prices, 13);

        for strategy in Strategy::ALL {
            assert_eq!(reconstruct(&table, &prices, 13, strategy)?, None);
        }

        Ok(())
    }

    #[test]
    fn largest_first_prefers_expensive_items() -> TestResult {
        let prices = [500, 700];
        let table = ReachabilityTable::build(&prices, 3500);

        let path = reconstruct(&table, &prices, 3500, Strategy::LargestFirst)?;

        assert_eq!(path.as_deref(), Some(&[1, 1, 1, 1, 1][..]));

        Ok(())
    }

    #[test]
    fn smallest_first_prefers_cheap_items() -> TestResult {
        let prices = [500, 700];
        let table = ReachabilityTable::build(&prices, 3500);

        let path = reconstruct(&table, &prices, 3500, Strategy::SmallestFirst)?;

        assert_eq!(path.as_deref(), Some(&[0, 0, 0, 0, 0, 0, 0][..]));

        Ok(())
    }

    #[test]
    fn price_ties_go_to_the_lowest_index() -> TestResult {
        let prices = [300, 300];
        let table = ReachabilityTable::build(&prices, 600);

        let largest = reconstruct(&table, &prices, 600, Strategy::LargestFirst)?;
        let smallest = reconstruct(&table, &prices, 600, Strategy::SmallestFirst)?;

        assert_eq!(largest.as_deref(), Some(&[0, 0][..]));
        assert_eq!(smallest.as_deref(), Some(&[0, 0][..]));

        Ok(())
    }

    #[test]
    fn variety_avoids_items_already_on_the_path() -> TestResult {
        let prices = [2, 3];
        let table = ReachabilityTable::build(&prices, 10);

        // Every sum from 5 to 10 records [1, 0]; the second step skips 1.
        let variety = reconstruct(&table, &prices, 10, Strategy::Variety)?;
        let largest = reconstruct(&table, &prices, 10, Strategy::LargestFirst)?;

        assert_eq!(variety.as_deref(), Some(&[1, 0, 1, 0][..]));
        assert_eq!(largest.as_deref(), Some(&[1, 1, 0, 0][..]));

        Ok(())
    }

    #[test]
    fn variety_falls_back_to_the_first_candidate() -> TestResult {
        let prices = [4];
        let table = ReachabilityTable::build(&prices, 12);

        let path = reconstruct(&table, &prices, 12, Strategy::Variety)?;

        assert_eq!(path.as_deref(), Some(&[0, 0, 0][..]));

        Ok(())
    }

    #[test]
    fn every_strategy_sums_to_the_target() -> TestResult {
        let prices = [125, 310, 475, 990];
        let table = ReachabilityTable::build(&prices, 5000);

        for target in (0..=5000).filter(|&target| table.is_reachable(target)) {
            for strategy in Strategy::ALL {
                let path = reconstruct(&table, &prices, target, strategy)?
                    .ok_or("reachable target should reconstruct")?;

                assert_eq!(sum(&path, &prices), target, "{strategy} at {target}");
            }
        }

        Ok(())
    }

    #[test]
    fn paths_longer_than_the_step_limit_are_abandoned() -> TestResult {
        let prices = [1];
        let table = ReachabilityTable::build(&prices, MAX_RECONSTRUCTION_STEPS + 1);

        let at_limit = reconstruct(&table, &prices, MAX_RECONSTRUCTION_STEPS, Strategy::Variety)?;
        let over_limit = reconstruct(
            &table,
            &prices,
            MAX_RECONSTRUCTION_STEPS + 1,
            Strategy::Variety,
        )?;

        assert_eq!(
            at_limit.as_deref().map(<[usize]>::len),
            Some(MAX_RECONSTRUCTION_STEPS)
        );
        assert_eq!(over_limit, None);

        Ok(())
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "out of range"))]
    fn mismatched_prices_are_an_invariant_violation() {
        let table = ReachabilityTable::build(&[5], 10);

        let result = reconstruct(&table, &[], 10, Strategy::LargestFirst);

        assert!(matches!(
            result,
            Err(SolverError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn path_signature_is_order_independent() {
        assert_eq!(path_signature(&[2, 0, 1, 0]), "0,0,1,2");
        assert_eq!(path_signature(&[0, 1, 0, 2]), path_signature(&[2, 0, 1, 0]));
        assert_eq!(path_signature(&[]), "");
    }

    #[test]
    fn strategies_display_their_names() {
        let names: Vec<String> = Strategy::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(names, vec!["largest-first", "smallest-first", "variety"]);
    }
}
