//! Exam of an encoded tile against the class containers
//!
//! ```text
//!   exam(k) = mean over rows of (1 - d(row, vector_k) / radius_k)
//! ```
//!
//! A tile goes to the class with the highest exam score if that score is
//! positive. The first class wins ties. Classes whose radius is missing or
//! zero have no defined score and never take part.

use ieit_core::{BinaryMatrix, ReferenceVector, TileAssignment, TileRect};

use crate::{RecogError, RecogResult};

/// Exam score of a binary tile against one class
///
/// # Errors
///
/// Returns [`RecogError::ExamUndefined`] when `radius` is `None` or zero,
/// and a feature mismatch error when the tile width differs from the
/// reference vector.
pub fn exam(
    class: usize,
    vector: &ReferenceVector,
    radius: Option<usize>,
    tile: &BinaryMatrix,
) -> RecogResult<f64> {
    let r = match radius {
        Some(r) if r > 0 => r as f64,
        _ => return Err(RecogError::ExamUndefined { class, radius }),
    };

    let sum: f64 = tile
        .distances_to(vector)?
        .into_iter()
        .map(|d| 1.0 - d as f64 / r)
        .sum();
    Ok(sum / tile.rows() as f64)
}

/// Classes whose exam score is undefined
pub fn undefined_classes(radii: &[Option<usize>]) -> Vec<usize> {
    radii
        .iter()
        .enumerate()
        .filter(|(_, r)| !matches!(r, Some(radius) if *radius > 0))
        .map(|(i, _)| i)
        .collect()
}

/// Winning class of one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileVerdict {
    /// Winning class, `None` if no class scored above zero
    pub class: Option<usize>,
    /// Winning score, 0.0 when unclassified
    pub score: f64,
}

impl TileVerdict {
    /// Attach the verdict to a tile region
    pub fn assign(self, rect: TileRect) -> TileAssignment {
        TileAssignment {
            rect,
            class: self.class,
            score: self.score,
        }
    }
}

/// Score a binary tile against every class and pick the winner
///
/// Classes with an undefined exam are skipped.
pub fn classify_binary(
    tile: &BinaryMatrix,
    vectors: &[ReferenceVector],
    radii: &[Option<usize>],
) -> RecogResult<TileVerdict> {
    if vectors.len() != radii.len() {
        return Err(RecogError::InvalidParameter(format!(
            "{} reference vectors but {} radii",
            vectors.len(),
            radii.len()
        )));
    }

    let mut verdict = TileVerdict {
        class: None,
        score: 0.0,
    };
    for (k, (vector, &radius)) in vectors.iter().zip(radii).enumerate() {
        let score = match exam(k, vector, radius, tile) {
            Ok(score) => score,
            Err(RecogError::ExamUndefined { .. }) => continue,
            Err(e) => return Err(e),
        };
        if score > verdict.score {
            verdict = TileVerdict {
                class: Some(k),
                score,
            };
        }
    }
    Ok(verdict)
}

/// Classification of every tile of an image
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    /// One assignment per tile, in scan order
    pub assignments: Vec<TileAssignment>,
    /// Classes excluded from scoring because their exam is undefined
    pub undefined_classes: Vec<usize>,
}

impl Classification {
    /// Number of tiles assigned to some class
    pub fn classified_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_classified()).count()
    }

    /// Number of tiles assigned to each of `class_count` classes
    pub fn class_histogram(&self, class_count: usize) -> Vec<usize> {
        let mut counts = vec![0; class_count];
        for class in self.assignments.iter().filter_map(|a| a.class) {
            if let Some(c) = counts.get_mut(class) {
                *c += 1;
            }
        }
        counts
    }
}
