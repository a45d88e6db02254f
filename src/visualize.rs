use std::fmt::Write;

use crate::action::{Action, PlayerId};
use crate::dice::Points;
use crate::state::{GameStatus, TurnEnd, TurnRecord, TurnSnapshot};

/// Scoreboard in seat order, one line per player.
pub fn render_scoreboard(labels: &[String], scores: &[Points]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "***** Scores *****");
    for (seat, score) in scores.iter().enumerate() {
        let label = labels
            .get(seat)
            .cloned()
            .unwrap_or_else(|| format!("Player {seat}"));
        let _ = writeln!(out, "{label} - {score}");
    }
    let _ = write!(out, "******************");
    out
}

pub fn render_turn(turn: &TurnSnapshot) -> String {
    format!(
        "Turn score: {}  Dice: {}  {}",
        turn.turn_score,
        turn.available_dice,
        if turn.can_end_turn {
            "(may end turn)"
        } else {
            "(must bank)"
        }
    )
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::EndTurn => String::from("End turn"),
        Action::Reroll => String::from("Reroll remaining dice"),
        Action::Bank(combination) => {
            format!("Bank {} for {}", combination.dice, combination.score)
        }
    }
}

pub fn describe_turn(record: &TurnRecord) -> String {
    match record.end {
        TurnEnd::Ended => format!("Player {} ended with {}", record.player, record.score),
        TurnEnd::Bust => format!("Player {} busted", record.player),
        TurnEnd::AroundTheBend => format!(
            "Player {} went around the bend with {} and rolls again",
            record.player, record.score
        ),
    }
}

pub fn describe_status(status: GameStatus, labels: &[String]) -> String {
    match status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: {})", label(labels, winner)),
    }
}

fn label(labels: &[String], player: PlayerId) -> String {
    labels
        .get(player)
        .cloned()
        .unwrap_or_else(|| format!("Player {player}"))
}
