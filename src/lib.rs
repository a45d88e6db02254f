//! Farkle-style dice game engine with an expectimax bot.
//!
//! Players roll six dice, bank scoring combinations, and either stop or risk
//! the remaining dice for more. The [`search`] module values every in-turn
//! choice exactly; [`ExpectimaxBot`] turns those values into moves.

pub mod action;
pub mod bot;
pub mod bots;
pub mod combination;
pub mod dice;
pub mod error;
pub mod game;
pub mod logging;
pub mod search;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{ActionEval, ExpectimaxBot, HeuristicConfig, HumanBot, RandomBot};
pub use crate::combination::{CATALOG, Combination};
pub use crate::dice::{DicePool, Face, Points};
pub use crate::error::{GameError, InvalidAction, RulesError, SearchError};
pub use crate::game::{Board, Game, GameBuilder, GameConfig};
pub use crate::search::{DecisionState, MemoStore, SearchConfig, SearchStats, Valuator};
pub use crate::state::{GameStatus, MatchSnapshot, TurnEnd, TurnRecord, TurnSnapshot};
pub use crate::visualize::{
    describe_action, describe_status, describe_turn, render_scoreboard, render_turn,
};
