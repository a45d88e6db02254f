use serde::{Deserialize, Serialize};

use crate::action::{Action, PlayerId};
use crate::combination::legal_combinations;
use crate::dice::{DicePool, Points};

/// Live decision point handed to a bot by the turn loop.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub turn_score: Points,
    pub can_end_turn: bool,
    pub available_dice: DicePool,
}

impl TurnSnapshot {
    /// Rerolling needs a banked combination since the last roll and dice to throw.
    #[inline]
    pub fn can_reroll(&self) -> bool {
        self.can_end_turn && !self.available_dice.is_empty()
    }

    /// Every action the board accepts right now: EndTurn, Reroll, then banks in
    /// catalog order.
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.can_end_turn {
            actions.push(Action::EndTurn);
        }
        if self.can_reroll() {
            actions.push(Action::Reroll);
        }
        actions.extend(
            legal_combinations(&self.available_dice)
                .into_iter()
                .map(Action::Bank),
        );
        actions
    }
}

/// Scoreboard context used only by top-level bot heuristics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub win_threshold_reached: bool,
    pub self_score: Points,
    pub opponent_scores: Vec<Points>,
}

impl MatchSnapshot {
    /// Snapshot for a player with no opponents and no threshold pressure.
    pub fn solo(self_score: Points) -> Self {
        Self {
            win_threshold_reached: false,
            self_score,
            opponent_scores: Vec::new(),
        }
    }

    pub fn best_opponent_score(&self) -> Option<Points> {
        self.opponent_scores.iter().copied().max()
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// How a finished turn came to an end.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnEnd {
    Ended,
    Bust,
    AroundTheBend,
}

/// One completed turn, as recorded by the game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnRecord {
    pub player: PlayerId,
    pub score: Points,
    pub end: TurnEnd,
}
