//! Solutions

use std::{cmp::Ordering, collections::BTreeMap};

use rustc_hash::FxHashSet;
use rusty_money::{Money, iso::Currency};

use crate::menu::MenuItem;

/// One way to spend a topped-up balance exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<'a> {
    /// Number of top-ups applied to the starting balance
    top_ups_needed: u32,

    /// Balance after the top-ups, which the items spend exactly
    final_target_balance: Money<'a, Currency>,

    /// Chosen items, one entry per unit bought, in reconstruction order
    items: Vec<MenuItem<'a>>,

    /// Sum of the chosen item prices
    total_cost: Money<'a, Currency>,

    /// Number of distinct item names
    unique_items: usize,
}

impl<'a> Solution<'a> {
    /// Create a new solution from its parts.
    pub fn new(
        top_ups_needed: u32,
        final_target_balance: Money<'a, Currency>,
        items: Vec<MenuItem<'a>>,
        total_cost: Money<'a, Currency>,
    ) -> Self {
        let unique_items = items
            .iter()
            .map(MenuItem::name)
            .collect::<FxHashSet<_>>()
            .len();

        Self {
            top_ups_needed,
            final_target_balance,
            items,
            total_cost,
            unique_items,
        }
    }

    /// Number of top-ups applied to the starting balance
    pub fn top_ups_needed(&self) -> u32 {
        self.top_ups_needed
    }

    /// Balance after the top-ups
    pub fn final_target_balance(&self) -> Money<'a, Currency> {
        self.final_target_balance
    }

    /// Chosen items, one entry per unit bought
    pub fn items(&self) -> &[MenuItem<'a>] {
        &self.items
    }

    /// Sum of the chosen item prices
    pub fn total_cost(&self) -> Money<'a, Currency> {
        self.total_cost
    }

    /// Total number of items bought
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of distinct item names
    pub fn unique_items(&self) -> usize {
        self.unique_items
    }

    /// Item counts keyed by name, in name order.
    pub fn quantities(&self) -> BTreeMap<&str, usize> {
        let mut quantities = BTreeMap::new();

        for item in &self.items {
            *quantities.entry(item.name()).or_insert(0) += 1;
        }

        quantities
    }

    /// Order-independent signature of the item composition, e.g. `Latte:1|Scone:2`.
    ///
    /// Two solutions with equal signatures buy the same items by name.
    pub fn signature(&self) -> String {
        self.quantities()
            .into_iter()
            .map(|(name, count)| format!("{name}:{count}"))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Preference order: fewer top-ups, then fewer items, then more variety.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.top_ups_needed
            .cmp(&other.top_ups_needed)
            .then_with(|| self.item_count().cmp(&other.item_count()))
            .then_with(|| other.unique_items.cmp(&self.unique_items))
    }
}
