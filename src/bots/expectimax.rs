use log::debug;

use crate::action::Action;
use crate::bot::Bot;
use crate::combination::legal_combinations;
use crate::dice::Points;
use crate::error::GameError;
use crate::search::{DecisionState, SearchConfig, Valuator};
use crate::state::{MatchSnapshot, TurnSnapshot};

/// Toggles for the scoreboard-aware overrides applied on top of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicConfig {
    /// Keep rolling rather than end a turn that leaves us behind once the
    /// win threshold is reached.
    pub dont_concede: bool,
    /// Stop rolling once banking now would put us ahead after the threshold.
    pub dont_blow_lead: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            dont_concede: true,
            dont_blow_lead: true,
        }
    }
}

/// A candidate action and the expected turn score of taking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEval {
    pub action: Action,
    pub value: Points,
}

/// Bot that values every legal action with the expectimax search and takes
/// the best one.
///
/// The valuator's memo persists across calls, so later decisions in a game
/// (and later games) reuse earlier expansions.
pub struct ExpectimaxBot {
    valuator: Valuator,
    heuristics: HeuristicConfig,
}

impl ExpectimaxBot {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default(), HeuristicConfig::default())
    }

    pub fn with_config(search: SearchConfig, heuristics: HeuristicConfig) -> Self {
        Self::with_valuator(Valuator::with_config(search), heuristics)
    }

    pub fn with_valuator(valuator: Valuator, heuristics: HeuristicConfig) -> Self {
        Self { valuator, heuristics }
    }

    pub fn valuator(&self) -> &Valuator {
        &self.valuator
    }

    pub fn valuator_mut(&mut self) -> &mut Valuator {
        &mut self.valuator
    }

    /// Candidate actions in tie-break order: EndTurn, Reroll, then banks in
    /// catalog order. Suppressed actions are left out.
    pub fn evaluate_actions(
        &mut self,
        turn: &TurnSnapshot,
        game: &MatchSnapshot,
    ) -> Result<Vec<ActionEval>, GameError> {
        let mut candidates = Vec::new();

        if turn.can_end_turn && !(self.heuristics.dont_concede && should_not_end_turn(turn, game)) {
            candidates.push(ActionEval {
                action: Action::EndTurn,
                value: turn.turn_score,
            });
        }

        if turn.can_reroll() && !(self.heuristics.dont_blow_lead && should_not_reroll(turn, game)) {
            let state = DecisionState::new(turn.turn_score, turn.available_dice, true, false);
            candidates.push(ActionEval {
                action: Action::Reroll,
                value: self.valuator.expected_reroll_value(&state)?,
            });
        }

        let root = DecisionState::new(
            turn.turn_score,
            turn.available_dice,
            !turn.available_dice.is_empty(),
            turn.can_end_turn,
        );
        for combination in legal_combinations(&turn.available_dice) {
            let child = root.after_bank(&combination)?;
            candidates.push(ActionEval {
                action: Action::Bank(combination),
                value: self.valuator.value(&child)?,
            });
        }

        Ok(candidates)
    }

    /// Best candidate by value; the earliest candidate wins ties.
    pub fn choose_action(
        &mut self,
        turn: &TurnSnapshot,
        game: &MatchSnapshot,
    ) -> Result<Action, GameError> {
        let candidates = self.evaluate_actions(turn, game)?;
        debug!(
            "turn score {} dice {}: {}",
            turn.turn_score,
            turn.available_dice,
            candidates
                .iter()
                .map(|c| format!("{}={}", c.action, c.value))
                .collect::<Vec<_>>()
                .join(" ")
        );
        let mut best: Option<ActionEval> = None;
        for candidate in candidates {
            if best.is_none_or(|b| candidate.value > b.value) {
                best = Some(candidate);
            }
        }
        best.map(|b| b.action).ok_or(GameError::NoLegalAction)
    }
}

impl Default for ExpectimaxBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for ExpectimaxBot {
    fn select_action(
        &mut self,
        turn: &TurnSnapshot,
        game: &MatchSnapshot,
    ) -> Result<Action, GameError> {
        self.choose_action(turn, game)
    }
}

/// Ending now would leave us behind an opponent after the threshold is reached.
pub fn should_not_end_turn(turn: &TurnSnapshot, game: &MatchSnapshot) -> bool {
    if !game.win_threshold_reached {
        return false;
    }
    let Some(score_to_beat) = game.best_opponent_score() else {
        return false;
    };
    game.self_score + turn.turn_score < score_to_beat
}

/// Banking what we have would already win after the threshold is reached.
pub fn should_not_reroll(turn: &TurnSnapshot, game: &MatchSnapshot) -> bool {
    if !game.win_threshold_reached {
        return false;
    }
    let Some(score_to_beat) = game.best_opponent_score() else {
        return false;
    };
    game.self_score + turn.turn_score > score_to_beat
}
