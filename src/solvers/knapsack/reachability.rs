//! Reachability Table
//!
//! Unbounded-knapsack reachability over integer sums `0..=max_target`. Each
//! reachable sum records which items can be the last one added on some way
//! of building it, so several distinct combinations can be walked back out.

use smallvec::SmallVec;

/// How a reachable sum was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The empty combination; only recorded for sum zero.
    Origin,

    /// The item at this index was added last.
    Item(usize),
}

type Steps = SmallVec<[Step; 4]>;

/// Reachable sums and their last steps, for one solve.
#[derive(Debug, Clone)]
pub struct ReachabilityTable {
    entries: Vec<Steps>,
}

impl ReachabilityTable {
    /// Tabulate every sum up to `max_target` reachable with `prices`.
    ///
    /// Sums are visited in increasing order, so a sum is complete before it
    /// is extended. Items may repeat without limit. Steps at a sum are kept in
    /// the order they were found and never duplicated.
    pub fn build(prices: &[usize], max_target: usize) -> Self {
        let mut entries: Vec<Steps> = vec![SmallVec::new(); max_target.saturating_add(1)];

        if let Some(origin) = entries.first_mut() {
            origin.push(Step::Origin);
        }

        for sum in 0..=max_target {
            let reachable = entries.get(sum).is_some_and(|steps| !steps.is_empty());

            if !reachable {
                continue;
            }

            for (idx, &price) in prices.iter().enumerate() {
                let Some(steps) = sum
                    .checked_add(price)
                    .filter(|&next| next <= max_target)
                    .and_then(|next| entries.get_mut(next))
                else {
                    continue;
                };

                let step = Step::Item(idx);

                if !steps.contains(&step) {
                    steps.push(step);
                }
            }
        }

        Self { entries }
    }

    /// Largest sum covered by the table
    pub fn max_target(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Check whether some combination of items sums exactly to `sum`.
    pub fn is_reachable(&self, sum: usize) -> bool {
        !self.steps(sum).is_empty()
    }

    /// Recorded last steps for `sum`; empty if unreachable or out of range.
    pub fn steps(&self, sum: usize) -> &[Step] {
        self.entries
            .get(sum)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Number of reachable sums, including zero.
    pub fn reachable_count(&self) -> usize {
        self.entries.iter().filter(|steps| !steps.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_reachable_through_origin() {
        let table = ReachabilityTable::build(&[500], 0);

        assert_eq!(table.max_target(), 0);
        assert_eq!(table.steps(0), &[Step::Origin]);
        assert_eq!(table.reachable_count(), 1);
    }

    #[test]
    fn multiples_of_a_single_price_are_reachable() {
        let table = ReachabilityTable::build(&[5], 20);

        let reachable: Vec<usize> = (0..=20).filter(|&sum| table.is_reachable(sum)).collect();

        assert_eq!(reachable, vec![0, 5, 10, 15, 20]);
        assert_eq!(table.steps(15), &[Step::Item(0)]);
    }

    #[test]
    fn combinations_of_prices_are_reachable() {
        let table = ReachabilityTable::build(&[5, 7], 15);

        let reachable: Vec<usize> = (0..=15).filter(|&sum| table.is_reachable(sum)).collect();

        assert_eq!(reachable, vec![0, 5, 7, 10, 12, 14, 15]);
    }

    #[test]
    fn steps_are_recorded_in_discovery_order() {
        // 35 is first extended from 28 (seven) and then from 30 (five).
        let table = ReachabilityTable::build(&[5, 7], 35);

        assert_eq!(table.steps(35), &[Step::Item(1), Step::Item(0)]);
        assert_eq!(table.steps(12), &[Step::Item(1), Step::Item(0)]);
    }

    #[test]
    fn each_item_is_recorded_once_per_sum() {
        let table = ReachabilityTable::build(&[2, 2], 4);

        assert_eq!(table.steps(4), &[Step::Item(0), Step::Item(1)]);
    }

    #[test]
    fn out_of_range_sums_are_unreachable() {
        let table = ReachabilityTable::build(&[1], 3);

        assert!(table.is_reachable(3));
        assert!(!table.is_reachable(4));
        assert!(table.steps(4).is_empty());
    }

    #[test]
    fn no_prices_only_reach_zero() {
        let table = ReachabilityTable::build(&[], 10);

        assert_eq!(table.reachable_count(), 1);
        assert!(!table.is_reachable(10));
    }
}
