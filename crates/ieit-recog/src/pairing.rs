//! Nearest-neighbor pairing of class reference vectors

use ieit_core::{Error, ReferenceVector, hamming_distance};

use crate::RecogResult;

/// Nearest other class of one class, by Hamming distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborPair {
    /// Index of the nearest other class
    pub neighbor: usize,
    /// Hamming distance between the two reference vectors
    pub distance: usize,
}

impl NeighborPair {
    /// Placeholder for a class that has no other class to compare with
    ///
    /// Both fields are `len + 1`, one more than any real distance.
    pub fn sentinel(len: usize) -> Self {
        Self {
            neighbor: len + 1,
            distance: len + 1,
        }
    }

    /// Check whether the pair refers to an actual class
    pub fn is_resolved(&self, class_count: usize) -> bool {
        self.neighbor < class_count
    }
}

/// Find every class's nearest neighbor
///
/// Classes are scanned in index order and a candidate replaces the current
/// best only when strictly closer, so on ties the lowest class index wins.
/// With a single class the result is the [sentinel](NeighborPair::sentinel).
///
/// # Errors
///
/// Returns [`Error::FeatureMismatch`] if the vectors differ in length and
/// [`Error::InvalidInput`] if `vectors` is empty.
pub fn pair_classes(vectors: &[ReferenceVector]) -> RecogResult<Vec<NeighborPair>> {
    let first = vectors
        .first()
        .ok_or_else(|| Error::InvalidInput("no reference vectors to pair".to_string()))?;
    let len = first.len();
    if let Some(v) = vectors.iter().find(|v| v.len() != len) {
        return Err(Error::FeatureMismatch {
            expected: len,
            actual: v.len(),
        }
        .into());
    }

    let pairs = vectors
        .iter()
        .enumerate()
        .map(|(i, vi)| {
            let mut best = NeighborPair::sentinel(len);
            for (j, vj) in vectors.iter().enumerate() {
                if i == j {
                    continue;
                }
                let distance = hamming_distance(vi.as_slice(), vj.as_slice());
                if distance < best.distance {
                    best = NeighborPair { neighbor: j, distance };
                }
            }
            best
        })
        .collect();

    Ok(pairs)
}
