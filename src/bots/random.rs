use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::error::GameError;
use crate::state::{MatchSnapshot, TurnSnapshot};

/// Baseline bot that samples uniformly from the legal action set.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(
        &mut self,
        turn: &TurnSnapshot,
        _game: &MatchSnapshot,
    ) -> Result<Action, GameError> {
        turn.legal_actions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalAction)
    }
}
