use std::io::{self, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::combination::combination_for;
use crate::dice::{DicePool, Face};
use crate::error::GameError;
use crate::state::{MatchSnapshot, TurnSnapshot};
use crate::visualize::{describe_action, render_turn};

/// Interactive bot that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

/// Parses a typed action.
///
/// `e`/`end` ends the turn, `r`/`rr` rerolls, and anything else is read as the
/// faces to bank (spaces and commas ignored), e.g. `555` or `1, 5`.
pub fn parse_action(input: &str) -> Option<Action> {
    let trimmed = input.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "" => None,
        "e" | "end" => Some(Action::EndTurn),
        "r" | "rr" => Some(Action::Reroll),
        other => {
            let faces = other
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .map(|c| c.to_digit(10).map(|d| d as Face))
                .collect::<Option<Vec<Face>>>()?;
            let dice = DicePool::new(&faces).ok()?;
            combination_for(&dice).map(Action::Bank)
        }
    }
}

impl Bot for HumanBot {
    fn select_action(
        &mut self,
        turn: &TurnSnapshot,
        game: &MatchSnapshot,
    ) -> Result<Action, GameError> {
        let legal_actions = turn.legal_actions();
        if legal_actions.is_empty() {
            return Err(GameError::NoLegalAction);
        }
        loop {
            println!("\n=== {}'s turn (score {}) ===", self.name, game.self_score);
            println!("{}", render_turn(turn));
            println!("Available actions:");
            for action in &legal_actions {
                println!("  {}", describe_action(action));
            }
            println!("Type 'e' to end, 'r' to reroll, the dice to bank (e.g. 555), or 'q' to quit.");
            print!("Action: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_err() {
                eprintln!("failed to read input");
                continue;
            }
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                println!("Exiting game at user's request.");
                std::process::exit(0);
            }
            let Some(action) = parse_action(trimmed) else {
                println!("Input not understood. Try again");
                continue;
            };
            if legal_actions.contains(&action) {
                println!("You selected: {}", describe_action(&action));
                return Ok(action);
            }
            println!("{} is not allowed right now.", describe_action(&action));
        }
    }
}
