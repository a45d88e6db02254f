use log::trace;

use crate::combination::{is_bust, legal_combinations};
use crate::dice::{MAX_DICE, Points};
use crate::error::SearchError;

use super::outcomes::{self, outcomes, total_weight};
use super::{DecisionState, MemoStore, SearchConfig, SearchStats};

/// Memoised expectimax over [`DecisionState`]s.
///
/// Choice nodes take the best of ending, rerolling and every legal bank; the
/// reroll chance node averages over all face outcomes, with busts scoring
/// nothing. The memo store is injected, so callers decide whether it survives
/// between games.
pub struct Valuator {
    cfg: SearchConfig,
    memo: MemoStore,
    stats: SearchStats,
}

impl Valuator {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(cfg: SearchConfig) -> Self {
        Self::with_memo(cfg, MemoStore::new())
    }

    /// Reuse a store warmed by an earlier search with the same config.
    pub fn with_memo(cfg: SearchConfig, memo: MemoStore) -> Self {
        outcomes::warm();
        Self {
            cfg,
            memo,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.cfg
    }

    #[inline]
    pub fn memo(&self) -> &MemoStore {
        &self.memo
    }

    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    pub fn into_memo(self) -> MemoStore {
        self.memo
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Expected final turn score of `state` under optimal play.
    pub fn value(&mut self, state: &DecisionState) -> Result<Points, SearchError> {
        self.stats.nodes += 1;
        if let Some(value) = self.memo.value(state) {
            self.stats.state_hits += 1;
            return Ok(value);
        }

        let mut best: Option<Points> = None;
        if state.can_reroll {
            let reroll = self.expected_reroll_value(state)?;
            best = best.max(Some(reroll));
        }
        if state.can_end {
            best = best.max(Some(state.points));
        }
        for combination in legal_combinations(&state.dice) {
            let child = state.after_bank(&combination)?;
            let value = self.value(&child)?;
            best = best.max(Some(value));
        }
        let mut value = best.ok_or(SearchError::DeadEnd(*state))?;

        // Around the bend: an emptied pool earns a fresh roll of every die.
        if state.dice.is_empty() && state.bend_depth < self.cfg.bend_limit {
            value += self.reroll(0, MAX_DICE, state.bend_depth + 1)?;
        }

        self.memo.insert_value(*state, value);
        Ok(value)
    }

    /// Expected turn score of rolling every die left in `state.dice`.
    ///
    /// The marginal part of the expectation is memoised by dice count, so a
    /// warm store answers for any `state.points` in constant time.
    pub fn expected_reroll_value(&mut self, state: &DecisionState) -> Result<Points, SearchError> {
        self.reroll(state.points, state.dice.len(), state.bend_depth)
    }

    fn reroll(
        &mut self,
        points: Points,
        dice_count: usize,
        bend_depth: u8,
    ) -> Result<Points, SearchError> {
        if let Some(marginal) = self.memo.reroll_marginal(dice_count) {
            self.stats.reroll_hits += 1;
            return Ok(marginal + points);
        }
        self.stats.reroll_expansions += 1;
        trace!("expanding reroll of {dice_count} dice at {points} points");

        let mut sum: Points = 0;
        for outcome in outcomes(dice_count) {
            if is_bust(&outcome.dice) {
                continue;
            }
            let rolled = DecisionState {
                points,
                dice: outcome.dice,
                can_reroll: false,
                can_end: false,
                bend_depth,
            };
            sum += self.value(&rolled)? * Points::from(outcome.weight);
        }
        let expected = sum.div_euclid(Points::from(total_weight(dice_count)));
        self.memo.insert_reroll_marginal(dice_count, expected - points);
        Ok(expected)
    }
}

impl Default for Valuator {
    fn default() -> Self {
        Self::new()
    }
}
