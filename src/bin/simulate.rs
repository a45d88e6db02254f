use std::env;
use std::error::Error;
use std::process;

use farklebot::logging;
use farklebot::{
    Bot, Game, GameError, create_bot_from_spec, describe_action, describe_status, describe_turn,
    label_for_spec, render_scoreboard, render_turn,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;
const DEFAULT_SCORE_TO_WIN: i64 = 5000;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut visualize = false;
    let mut verbosity = 0u8;
    let mut seed = DEFAULT_SEED;
    let mut score_to_win = DEFAULT_SCORE_TO_WIN;
    let mut max_turns: Option<usize> = None;
    let mut bot_specs: Vec<String> = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--visualize" => visualize = true,
            "-v" | "--verbose" => verbosity = verbosity.saturating_add(1),
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--score-to-win" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--score-to-win requires a value".to_string())?;
                score_to_win = value
                    .parse::<i64>()
                    .map_err(|_| format!("invalid score-to-win value: {value}"))?;
            }
            "--max-turns" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--max-turns requires a value".to_string())?;
                max_turns = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| format!("invalid max-turns value: {value}"))?,
                );
            }
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => bot_specs.push(other.to_string()),
        }
    }
    logging::init(logging::level_for_verbosity(verbosity))?;

    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("expectimax")];
    }
    if bot_specs.len() > 6 {
        return Err(format!(
            "expected between 1 and 6 players, received {}",
            bot_specs.len()
        )
        .into());
    }

    let num_players = bot_specs.len();
    let mut game = Game::builder(num_players)?
        .with_seed(seed)
        .with_score_to_win(score_to_win)?
        .build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(num_players);
    let mut labels: Vec<String> = Vec::with_capacity(num_players);
    for (index, spec) in bot_specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, seed)?);
        labels.push(format!("{} ({index})", label_for_spec(spec)));
    }

    println!("Starting game with {num_players} players, first to {score_to_win}.\n");
    let mut actions = 0usize;
    let mut reported = 0usize;
    loop {
        for record in &game.history()[reported..] {
            println!("{}", describe_turn(record));
            if visualize {
                println!("{}", render_scoreboard(&labels, game.scores()));
            }
        }
        reported = game.history().len();
        if game.is_finished() {
            break;
        }
        if let Some(limit) = max_turns {
            if reported >= limit {
                println!("Max turn limit {limit} reached. Stopping simulation.");
                break;
            }
        }
        let current = game.current_player();
        let turn = game.turn_snapshot();
        let standing = game.match_snapshot(current)?;
        if game.legal_actions().is_empty() {
            return Err(GameError::NoLegalAction.into());
        }
        if visualize {
            println!("{}: {}", labels[current], render_turn(&turn));
        }
        let action = bots[current].select_action(&turn, &standing)?;
        if visualize {
            println!("Chosen action: {}\n", describe_action(&action));
        }
        game.apply_action(action)?;
        actions += 1;
    }

    println!("\n{}", render_scoreboard(&labels, game.scores()));
    if game.is_finished() {
        println!("Game finished after {actions} actions.");
    } else {
        println!("Simulation stopped before completion.");
    }
    println!("{}", describe_status(game.status(), &labels));

    Ok(())
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [BOT ...]");
    println!("  --visualize             Show each decision and the scoreboard after every turn");
    println!("  -v, --verbose           Raise log level (repeat for debug/trace)");
    println!("  --seed <u64>            Seed for the dice (default: {DEFAULT_SEED:#x})");
    println!("  --score-to-win <i64>    Final round starts once a player reaches this (default: {DEFAULT_SCORE_TO_WIN})");
    println!("  --max-turns <usize>     Stop after the specified number of completed turns");
    println!("  --help                  Show this help message");
    println!("Bot entries (1-6 total):");
    println!("  human[:name]            Interactive human-controlled player");
    println!("  random[:seed]           Random bot with optional per-bot seed");
    println!("  expectimax[:bend]       Expectimax bot, optional around-the-bend depth limit");
    println!("  greedy                  Expectimax bot without scoreboard heuristics");
    println!("If no bots are provided, defaults to one human and one expectimax bot.");
}
