//! Weighted tables of reroll outcomes.
//!
//! Rolling `n` dice has `6^n` equally likely ordered results but far fewer
//! distinct multisets (462 for six dice). Each table lists the sorted multisets
//! once with their multiplicity, in lexicographic order of the sorted faces.
//! That is also the order in which each multiset first shows up when walking the
//! raw `6^n` results lexicographically, so a memoised walk over the table visits
//! states in the same order as the raw walk would.

use std::sync::OnceLock;

use crate::dice::{DicePool, FACE_COUNT, MAX_DICE};

/// One distinct roll of `n` dice and the number of ordered results producing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub dice: DicePool,
    pub weight: u32,
}

static OUTCOME_TABLES: OnceLock<[Box<[Outcome]>; MAX_DICE + 1]> = OnceLock::new();

/// Builds every table once. Safe to call repeatedly.
pub fn warm() {
    let _ = tables();
}

fn tables() -> &'static [Box<[Outcome]>; MAX_DICE + 1] {
    OUTCOME_TABLES.get_or_init(|| std::array::from_fn(build_table))
}

/// Distinct outcomes of rolling `dice_count` dice.
///
/// Counts above six dice have no table and yield an empty slice.
pub fn outcomes(dice_count: usize) -> &'static [Outcome] {
    tables().get(dice_count).map(|t| t.as_ref()).unwrap_or(&[])
}

/// Number of equally likely ordered results for `dice_count` dice.
#[inline]
pub fn total_weight(dice_count: usize) -> u32 {
    6u32.pow(dice_count as u32)
}

fn build_table(dice_count: usize) -> Box<[Outcome]> {
    let mut out = Vec::new();
    let mut counts = [0u8; FACE_COUNT];
    push_sorted(dice_count, 0, &mut counts, &mut out);
    out.into_boxed_slice()
}

// Appending faces in non-decreasing order yields sorted tuples lexicographically.
fn push_sorted(
    remaining: usize,
    min_face: usize,
    counts: &mut [u8; FACE_COUNT],
    out: &mut Vec<Outcome>,
) {
    if remaining == 0 {
        out.push(Outcome {
            dice: DicePool::from_counts(*counts),
            weight: multiplicity(counts),
        });
        return;
    }
    for face in min_face..FACE_COUNT {
        counts[face] += 1;
        push_sorted(remaining - 1, face, counts, out);
        counts[face] -= 1;
    }
}

fn multiplicity(counts: &[u8; FACE_COUNT]) -> u32 {
    let n: u32 = counts.iter().map(|&c| c as u32).sum();
    let denom: u32 = counts.iter().map(|&c| factorial(c as u32)).product();
    factorial(n) / denom
}

fn factorial(n: u32) -> u32 {
    (1..=n).product()
}
