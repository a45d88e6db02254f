use crate::action::Action;
use crate::error::GameError;
use crate::state::{MatchSnapshot, TurnSnapshot};

/// Interface for anything that can take a player's seat.
pub trait Bot {
    fn select_action(
        &mut self,
        turn: &TurnSnapshot,
        game: &MatchSnapshot,
    ) -> Result<Action, GameError>;
}
