use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{ArgAction, Parser, ValueEnum};
use log::info;
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use farklebot::logging;
use farklebot::{Bot, Game, GameError};
use farklebot::{create_bot_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

/// Output format for the generated chart. Currently only PNG is supported.
#[derive(Clone, Debug, ValueEnum)]
enum ChartFormat {
    Png,
}

impl ChartFormat {
    fn from_path(path: &PathBuf) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
        {
            Some(ext) if ext == "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run multiple games and report per-bot win rates and mean points."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (dice + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Final round starts once any player reaches this score.
    /// With one bot and 0, every game is a single turn sequence.
    #[arg(long = "score-to-win", default_value_t = 5000)]
    score_to_win: i64,

    /// Output chart file (png)
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Explicit output format (inferred from --out when omitted)
    #[arg(long = "format", value_enum)]
    format: Option<ChartFormat>,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Safety cap on actions per game; games exceeding this are aborted (not counted as a win)
    #[arg(long = "max-actions", default_value_t = 20_000)]
    max_actions: usize,

    /// Raise log level (repeat for debug/trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Player bot specs: e.g., expectimax random (1-6 total)
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    logging::init(logging::level_for_verbosity(args.verbose))?;
    if args.bots.is_empty() || args.bots.len() > 6 {
        return Err(format!(
            "expected between 1 and 6 bot specs (e.g., expectimax random), received {}",
            args.bots.len()
        )
        .into());
    }

    // Disallow human in batch sims; it would block waiting for input.
    if args
        .bots
        .iter()
        .any(|s| s.to_ascii_lowercase().starts_with("human"))
    {
        return Err("human players are not supported in winrate runs".into());
    }

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut points_per_label: HashMap<String, i64> = HashMap::new();
    let mut aborted_games: usize = 0;

    let mut decision_time_ns: HashMap<String, u128> = HashMap::new();
    let mut decision_counts: HashMap<String, usize> = HashMap::new();

    let base_seed = args.seed;
    let players_per_game = args.bots.len();
    let labels_for_spec: Vec<String> = args.bots.iter().map(|s| label_for_spec(s)).collect();

    // Bots live for the whole run so search memos stay warm across games.
    let mut bots_by_spec: Vec<Box<dyn Bot>> = Vec::with_capacity(players_per_game);
    for (index, spec) in args.bots.iter().enumerate() {
        bots_by_spec.push(create_bot_from_spec(spec, index, mix_seed(base_seed, 0, index as u64))?);
    }

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = (0..players_per_game).collect();
        let mut seat_rng = StdRng::seed_from_u64(base_seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let dice_seed = mix_seed(base_seed, game_idx as u64, 0x5EED_15);
        let mut game = Game::builder(players_per_game)?
            .with_seed(dice_seed)
            .with_score_to_win(args.score_to_win)?
            .build()?;

        for src_idx in &indices {
            *seats_per_label
                .entry(labels_for_spec[*src_idx].clone())
                .or_default() += 1;
        }

        let mut actions = 0usize;
        while !game.is_finished() && actions < args.max_actions {
            let seat = game.current_player();
            let src_idx = indices[seat];
            let turn = game.turn_snapshot();
            let standing = game.match_snapshot(seat)?;
            if game.legal_actions().is_empty() {
                return Err(GameError::NoLegalAction.into());
            }
            let t0 = Instant::now();
            let action = bots_by_spec[src_idx].select_action(&turn, &standing)?;
            let dt = t0.elapsed();
            let label = &labels_for_spec[src_idx];
            *decision_time_ns.entry(label.clone()).or_default() += dt.as_nanos();
            *decision_counts.entry(label.clone()).or_default() += 1;
            game.apply_action(action)?;
            actions += 1;
        }

        if let Some(winner) = game.winner() {
            *wins_per_label
                .entry(labels_for_spec[indices[winner]].clone())
                .or_default() += 1;
            for (seat, &score) in game.scores().iter().enumerate() {
                *points_per_label
                    .entry(labels_for_spec[indices[seat]].clone())
                    .or_default() += score;
            }
        } else {
            aborted_games += 1;
        }
        if (game_idx + 1) % 100 == 0 {
            info!("{} games played", game_idx + 1);
        }
    }

    // Per-seat win probability per label, including labels that never won.
    let mut results: Vec<(String, f64, usize, usize)> = Vec::new();
    for (label, &seats) in &seats_per_label {
        let wins = *wins_per_label.get(label).unwrap_or(&0);
        let rate = if seats > 0 {
            wins as f64 / seats as f64
        } else {
            0.0
        };
        results.push((label.clone(), rate, wins, seats));
    }

    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat) with final scores:");
    for (label, rate, wins, seats) in &results {
        let total_points = *points_per_label.get(label).unwrap_or(&0);
        let avg_points = if *seats > 0 {
            total_points as f64 / (*seats as f64)
        } else {
            0.0
        };
        println!(
            "  {label:<12}  {wins}/{seats}  ({:.2}%)   avg pts: {:>8.2}   total pts: {}",
            rate * 100.0,
            avg_points,
            total_points
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} game(s) hit the action cap without finishing.");
    }

    if !args.no_chart {
        let format = args
            .format
            .or_else(|| ChartFormat::from_path(&args.out))
            .unwrap_or(ChartFormat::Png);
        if !matches!(format, ChartFormat::Png) {
            return Err("only PNG output is supported currently; use --out with .png".into());
        }
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    if !decision_counts.is_empty() {
        println!("\nDecision time (per bot label):");
        for (label, _rate, _wins, _seats) in &results {
            let Some(&count) = decision_counts.get(label) else {
                continue;
            };
            let total_ns = *decision_time_ns.get(label).unwrap_or(&0u128);
            let total_ms = (total_ns as f64) / 1.0e6;
            let avg_ms = if count > 0 {
                total_ms / (count as f64)
            } else {
                0.0
            };
            println!(
                "  {label:<12}  decisions: {count:<7}  total: {total_ms:.3} ms  avg: {avg_ms:.3} ms"
            );
        }
    }

    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

fn render_bar_chart(
    out: &PathBuf,
    data: &[(String, f64, usize, usize)],
) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|(l, _, _, _)| l.clone()).collect();
    let values: Vec<f64> = data.iter().map(|(_, r, _, _)| r * 100.0).collect();
    let max_value = values.iter().cloned().fold(0.0_f64, f64::max);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Dice Bot Win Rates (per-seat)", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len(), 0.0f64..max_value.max(10.0))
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Bot type")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| {
            if *idx < labels.len() {
                labels[*idx].clone()
            } else {
                idx.to_string()
            }
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new([(i, 0.0), (i + 1, *value)], BLUE.filled());
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
