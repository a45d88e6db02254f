//! Scoring combinations a player may bank, and the operations the search and
//! the live board perform against the catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, Points};
use crate::error::RulesError;

/// A catalog entry: a fixed multiset of faces worth a fixed number of points.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub score: Points,
    pub dice: DicePool,
}

impl Combination {
    const fn new(score: Points, counts: [u8; 6]) -> Self {
        Self {
            score,
            dice: DicePool::from_counts(counts),
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pts)", self.dice, self.score)
    }
}

/// Every bankable combination, in the order candidates are enumerated.
pub const CATALOG: [Combination; 8] = [
    Combination::new(50, [0, 0, 0, 0, 1, 0]),
    Combination::new(100, [1, 0, 0, 0, 0, 0]),
    Combination::new(200, [0, 3, 0, 0, 0, 0]),
    Combination::new(300, [0, 0, 3, 0, 0, 0]),
    Combination::new(400, [0, 0, 0, 3, 0, 0]),
    Combination::new(500, [0, 0, 0, 0, 3, 0]),
    Combination::new(600, [0, 0, 0, 0, 0, 3]),
    Combination::new(1000, [1, 1, 1, 1, 1, 1]),
];

/// Combinations that can be banked from `pool`, in catalog order.
///
/// An empty result means the roll is a bust.
pub fn legal_combinations(pool: &DicePool) -> Vec<Combination> {
    CATALOG
        .iter()
        .filter(|combination| pool.contains(&combination.dice))
        .copied()
        .collect()
}

/// True when `pool` holds no scoring combination.
#[inline]
pub fn is_bust(pool: &DicePool) -> bool {
    !CATALOG.iter().any(|combination| pool.contains(&combination.dice))
}

pub fn score(combinations: &[Combination]) -> Points {
    combinations.iter().map(|c| c.score).sum()
}

/// Takes the dice of `combination` out of `pool`.
pub fn remove(pool: &DicePool, combination: &Combination) -> Result<DicePool, RulesError> {
    pool.checked_sub(&combination.dice)
        .ok_or(RulesError::InvalidRemoval {
            pool: *pool,
            combination: *combination,
        })
}

/// Catalog entry made of exactly `dice`, if any.
pub fn combination_for(dice: &DicePool) -> Option<Combination> {
    CATALOG.iter().find(|c| c.dice == *dice).copied()
}
