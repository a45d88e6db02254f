use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combination::Combination;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to a player during a turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Stop and add the banked turn score to the player's total.
    EndTurn,
    /// Roll every die that has not been banked.
    Reroll,
    /// Set aside a scoring combination from the current roll.
    Bank(Combination),
}

impl Action {
    /// Returns the combination if the action banks one.
    pub fn combination(&self) -> Option<&Combination> {
        match self {
            Action::Bank(combination) => Some(combination),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::EndTurn => write!(f, "EndTurn"),
            Action::Reroll => write!(f, "Reroll"),
            Action::Bank(combination) => write!(f, "Bank{}", combination.dice),
        }
    }
}
