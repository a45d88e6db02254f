use std::collections::HashMap;

use crate::dice::{MAX_DICE, Points};
use crate::search::DecisionState;

/// Memoised search results, owned by whoever drives the search.
///
/// Two tables: the value of each canonical [`DecisionState`], and the marginal
/// expected value of rerolling `n` dice (the expectation minus the caller's
/// banked points). Entries are never evicted; [`MemoStore::clear`] drops all of
/// them at once.
#[derive(Debug, Clone, Default)]
pub struct MemoStore {
    values: HashMap<DecisionState, Points>,
    reroll_marginals: [Option<Points>; MAX_DICE + 1],
}

impl MemoStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self, state: &DecisionState) -> Option<Points> {
        self.values.get(state).copied()
    }

    #[inline]
    pub fn insert_value(&mut self, state: DecisionState, value: Points) {
        self.values.insert(state, value);
    }

    #[inline]
    pub fn reroll_marginal(&self, dice_count: usize) -> Option<Points> {
        self.reroll_marginals.get(dice_count).copied().flatten()
    }

    pub fn insert_reroll_marginal(&mut self, dice_count: usize, marginal: Points) {
        if let Some(slot) = self.reroll_marginals.get_mut(dice_count) {
            *slot = Some(marginal);
        }
    }

    /// Number of memoised decision states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.reroll_marginals.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.reroll_marginals = [None; MAX_DICE + 1];
    }
}
