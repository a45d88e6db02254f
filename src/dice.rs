use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Value showing on a single die.
pub type Face = u8;

/// Banked points, expected values and scores.
pub type Points = i64;

pub const MIN_FACE: Face = 1;
pub const MAX_FACE: Face = 6;
pub const FACE_COUNT: usize = 6;
/// Dice a turn starts with and gets back after going around the bend.
pub const MAX_DICE: usize = 6;

/// Multiset of die faces, stored as per-face counts.
///
/// The count vector is canonical by construction: two pools holding the same
/// faces in any roll order compare and hash identically.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DicePool {
    counts: [u8; FACE_COUNT],
}

impl DicePool {
    pub const EMPTY: DicePool = DicePool { counts: [0; FACE_COUNT] };

    /// Builds a pool from faces in any order.
    pub fn new(faces: &[Face]) -> Result<Self, RulesError> {
        if faces.len() > MAX_DICE {
            return Err(RulesError::TooManyDice(faces.len()));
        }
        let mut counts = [0u8; FACE_COUNT];
        for &face in faces {
            if !(MIN_FACE..=MAX_FACE).contains(&face) {
                return Err(RulesError::InvalidFace(face));
            }
            counts[(face - 1) as usize] += 1;
        }
        Ok(Self { counts })
    }

    pub const fn from_counts(counts: [u8; FACE_COUNT]) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn counts(&self) -> [u8; FACE_COUNT] {
        self.counts
    }

    #[inline]
    pub fn count(&self, face: Face) -> u8 {
        debug_assert!((MIN_FACE..=MAX_FACE).contains(&face));
        self.counts[(face - 1) as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// True when every die of `other` is also present here.
    pub fn contains(&self, other: &DicePool) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(have, need)| have >= need)
    }

    /// Removes `other` from this pool, or `None` if it is not a sub-multiset.
    pub fn checked_sub(&self, other: &DicePool) -> Option<DicePool> {
        let mut counts = self.counts;
        for (slot, need) in counts.iter_mut().zip(other.counts.iter()) {
            *slot = slot.checked_sub(*need)?;
        }
        Some(DicePool { counts })
    }

    /// Faces in ascending order.
    pub fn faces(&self) -> Vec<Face> {
        let mut out = Vec::with_capacity(self.len());
        for (idx, &count) in self.counts.iter().enumerate() {
            out.extend(std::iter::repeat(idx as Face + 1).take(count as usize));
        }
        out
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, face) in self.faces().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{face}")?;
        }
        write!(f, "]")
    }
}
