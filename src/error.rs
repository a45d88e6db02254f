use thiserror::Error;

use crate::action::PlayerId;
use crate::combination::Combination;
use crate::dice::{DicePool, Face};
use crate::search::DecisionState;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("rules violation: {0}")]
    Rules(#[from] RulesError),
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
    #[error("no legal action is available")]
    NoLegalAction,
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Violations of the combination catalog or of dice-pool bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("cannot remove {} from pool {pool}", combination.dice)]
    InvalidRemoval {
        pool: DicePool,
        combination: Combination,
    },
    #[error("die face {0} is outside 1..=6")]
    InvalidFace(Face),
    #[error("a pool holds at most 6 dice, got {0}")]
    TooManyDice(usize),
}

/// Failures inside the valuator. Both indicate an illegal branch was built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("state {0:?} offers no candidate to value")]
    DeadEnd(DecisionState),
}

/// Details of actions the live board refuses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("turn cannot end before a combination is banked")]
    CannotEndTurn,
    #[error("reroll requires a banked combination and dice left to roll")]
    CannotReroll,
    #[error("dice {0} do not form a scoring combination")]
    NotACombination(DicePool),
    #[error("dice {0} are not available on the board")]
    DiceUnavailable(DicePool),
}
