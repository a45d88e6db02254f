//! Expectimax valuation of in-turn decisions.
//!
//! A [`DecisionState`] is a self-contained snapshot of a choice point inside a
//! turn. The [`Valuator`] maximises over banking choices and averages over the
//! reroll chance node, memoising both into an owner-controlled [`MemoStore`].
//!
//! Heuristics that look at the scoreboard never enter this module: every value
//! computed here is `points` plus a term that depends only on the dice and flags,
//! which is what lets reroll expectations be cached by dice count alone.
//!
//! Quick start
//! ```
//! use farklebot::dice::DicePool;
//! use farklebot::search::{DecisionState, Valuator};
//!
//! let mut valuator = Valuator::new();
//! let state = DecisionState::new(0, DicePool::new(&[2]).unwrap(), true, false);
//! assert_eq!(valuator.value(&state).unwrap(), 25);
//! ```

use serde::{Deserialize, Serialize};

use crate::combination::{self, Combination};
use crate::dice::{DicePool, Points};
use crate::error::RulesError;

pub mod memo;
pub mod outcomes;
mod valuator;

pub use memo::MemoStore;
pub use valuator::Valuator;

/// Immutable decision point inside a turn.
///
/// The dice pool is a canonical multiset, so the state itself is the memo key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DecisionState {
    pub points: Points,
    pub dice: DicePool,
    pub can_reroll: bool,
    pub can_end: bool,
    /// Nested "pool exhausted, roll six again" expansions above this state.
    pub bend_depth: u8,
}

impl DecisionState {
    pub fn new(points: Points, dice: DicePool, can_reroll: bool, can_end: bool) -> Self {
        Self {
            points,
            dice,
            can_reroll,
            can_end,
            bend_depth: 0,
        }
    }

    /// State reached by banking `combination`: the turn may end, and the
    /// remaining dice may be rerolled if any are left.
    pub fn after_bank(&self, combination: &Combination) -> Result<Self, RulesError> {
        let dice = combination::remove(&self.dice, combination)?;
        Ok(Self {
            points: self.points + combination::score(std::slice::from_ref(combination)),
            dice,
            can_reroll: !dice.is_empty(),
            can_end: true,
            bend_depth: self.bend_depth,
        })
    }

    /// State right after a reroll landed on `outcome`: the player must bank
    /// before doing anything else.
    pub fn rolled(&self, outcome: DicePool) -> Self {
        Self {
            points: self.points,
            dice: outcome,
            can_reroll: false,
            can_end: false,
            bend_depth: self.bend_depth,
        }
    }
}

/// Knobs for the valuator. The default never applies the around-the-bend bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// An empty-pool state earns the expected value of a fresh six-dice roll
    /// while its `bend_depth` is below this limit. Zero disables the bonus.
    pub bend_limit: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { bend_limit: 0 }
    }
}

/// Counters accumulated by a [`Valuator`] since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub state_hits: u64,
    pub reroll_hits: u64,
    pub reroll_expansions: u64,
}
