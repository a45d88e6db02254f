use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Bot;
use crate::bots::expectimax::HeuristicConfig;
use crate::search::SearchConfig;
use crate::{ExpectimaxBot, HumanBot, RandomBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - expectimax[:bend_limit]
/// - greedy (expectimax without the scoreboard heuristics)
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let spec_lower = spec.to_ascii_lowercase();
    let param = spec.split_once(':').map(|(_, value)| value.trim());
    if spec_lower.starts_with("human") {
        let name = param
            .map(str::to_string)
            .unwrap_or_else(|| format!("Human {index}"));
        Ok(Box::new(HumanBot::new(name)))
    } else if spec_lower.starts_with("random") {
        let custom_seed = param
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
        Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
    } else if spec_lower.starts_with("expectimax") {
        let bend_limit = match param {
            Some(value) => value
                .parse::<u8>()
                .map_err(|_| format!("invalid bend limit in spec: {spec}"))?,
            None => SearchConfig::default().bend_limit,
        };
        Ok(Box::new(ExpectimaxBot::with_config(
            SearchConfig { bend_limit },
            HeuristicConfig::default(),
        )))
    } else if spec_lower.starts_with("greedy") {
        Ok(Box::new(ExpectimaxBot::with_config(
            SearchConfig::default(),
            HeuristicConfig {
                dont_concede: false,
                dont_blow_lead: false,
            },
        )))
    } else {
        Err(format!("unrecognized bot spec: {spec}").into())
    }
}
