//! Container radius optimization
//!
//! For each class `c` with nearest neighbor `n`, every candidate radius `r`
//! is rated by two error rates measured against `c`'s reference vector:
//!
//! - `alpha = 1 - (rows of c within distance r) / rows(c)`
//! - `beta = (rows of n within distance r) / rows(n)`
//!
//! The optimal radius is the one with the highest criterion among radii in
//! the working area. Radii are scanned upward and a later radius replaces
//! the current best when its value is greater than or equal to it, so the
//! larger radius wins ties.

use std::io::{self, Write};

use ieit_core::{BinaryMatrix, Error, ReferenceVector};
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::criterion::{CriterionEntry, WorkingArea, criterion};
use crate::options::{RADIUS_MAX_LIMIT, TrainOptions};
use crate::pairing::{NeighborPair, pair_classes};
use crate::par::map_ordered;
use crate::{RecogError, RecogResult};

/// Number of rows within each radius `0..=radius_max`
///
/// `distances` are row-to-vector Hamming distances; the result is the
/// cumulative histogram, clipped at `radius_max`.
fn cumulative_counts(distances: &[usize], radius_max: usize) -> Vec<usize> {
    let mut counts = vec![0usize; radius_max + 1];
    for &d in distances {
        if d <= radius_max {
            counts[d] += 1;
        }
    }
    for r in 1..counts.len() {
        counts[r] += counts[r - 1];
    }
    counts
}

/// Full radius sweep of one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSweep {
    /// Class index
    pub class: usize,
    /// Nearest neighbor the false-acceptance rate was measured against
    pub pair: NeighborPair,
    /// One entry per radius, in increasing radius order
    pub entries: Vec<CriterionEntry>,
}

impl ClassSweep {
    /// Optimal radius, `None` if no radius lies in the working area
    pub fn optimal_radius(&self) -> Option<usize> {
        select_radius(&self.entries)
    }

    /// Largest criterion over all radii
    pub fn max_criterion(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.value)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest criterion over working-area radii, `None` if there are none
    pub fn max_working_area_criterion(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter(|e| e.working_area)
            .map(|e| e.value)
            .reduce(f64::max)
    }
}

/// Pick the best working-area radius from an ordered sweep
///
/// Among equal criterion values the last (largest) radius wins.
pub fn select_radius(entries: &[CriterionEntry]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for entry in entries.iter().filter(|e| e.working_area) {
        match best {
            Some((_, value)) if entry.value < value => {}
            _ => best = Some((entry.radius, entry.value)),
        }
    }
    best.map(|(radius, _)| radius)
}

/// Sweep all candidate radii for one class
///
/// # Arguments
///
/// * `class` - Index of the class being rated
/// * `binaries` - Binary matrices of every class
/// * `vectors` - Reference vectors of every class
/// * `pair` - Nearest neighbor of `class`
/// * `radius_max` - Largest radius, inclusive
/// * `working_area` - Working-area thresholds
pub fn sweep_class(
    class: usize,
    binaries: &[BinaryMatrix],
    vectors: &[ReferenceVector],
    pair: NeighborPair,
    radius_max: usize,
    working_area: &WorkingArea,
) -> RecogResult<ClassSweep> {
    if radius_max > RADIUS_MAX_LIMIT {
        return Err(RecogError::InvalidParameter(format!(
            "radius_max {} exceeds {}",
            radius_max, RADIUS_MAX_LIMIT
        )));
    }
    let count = binaries.len();
    if class >= count || vectors.len() != count {
        return Err(Error::IndexOutOfBounds {
            index: class,
            len: count.min(vectors.len()),
        }
        .into());
    }
    if !pair.is_resolved(count) {
        return Err(RecogError::TooFewClasses { count });
    }

    let own = &binaries[class];
    let neighbor = &binaries[pair.neighbor];
    let vector = &vectors[class];

    let own_within = cumulative_counts(&own.distances_to(vector)?, radius_max);
    let neighbor_within = cumulative_counts(&neighbor.distances_to(vector)?, radius_max);
    let own_rows = own.rows() as f64;
    let neighbor_rows = neighbor.rows() as f64;

    let entries = (0..=radius_max)
        .map(|radius| {
            let detection = own_within[radius] as f64 / own_rows;
            let alpha = 1.0 - detection;
            let beta = neighbor_within[radius] as f64 / neighbor_rows;
            CriterionEntry {
                radius,
                value: criterion(alpha, beta),
                working_area: working_area.contains_rates(detection, beta),
            }
        })
        .collect();

    Ok(ClassSweep {
        class,
        pair,
        entries,
    })
}

/// Optimal radii and the per-class sweep tables they were chosen from
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusOptimization {
    /// Optimal radius per class, `None` where no working-area radius exists
    pub radii: Vec<Option<usize>>,
    /// Sweep table per class, in class order
    pub sweeps: Vec<ClassSweep>,
}

impl RadiusOptimization {
    /// Classes without a working-area radius
    pub fn unresolved_classes(&self) -> Vec<usize> {
        self.radii
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Write the sweep tables as whitespace-separated text
    ///
    /// Each class starts with a `class <index>` line, followed by one
    /// `<is_working_area> <radius> <criterion>` line per radius.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for sweep in &self.sweeps {
            writeln!(out, "class {}", sweep.class)?;
            for e in &sweep.entries {
                writeln!(out, "{} {} {}", e.working_area, e.radius, e.value)?;
            }
        }
        Ok(())
    }
}

/// Optimize the container radius of every class
///
/// Pairs the classes, sweeps `0..=radius_max` for each one, and selects
/// each class's optimal radius.
pub fn optimize_radii(
    binaries: &[BinaryMatrix],
    vectors: &[ReferenceVector],
    options: &TrainOptions,
    cancel: &CancelToken,
) -> RecogResult<RadiusOptimization> {
    options.validate()?;
    if binaries.len() < 2 {
        return Err(RecogError::TooFewClasses {
            count: binaries.len(),
        });
    }
    if vectors.len() != binaries.len() {
        return Err(RecogError::InvalidParameter(format!(
            "{} reference vectors for {} classes",
            vectors.len(),
            binaries.len()
        )));
    }

    let pairs = pair_classes(vectors)?;
    let classes: Vec<usize> = (0..binaries.len()).collect();
    let sweeps = map_ordered(&classes, options.parallel, |&class| {
        cancel.check("radius sweep", class)?;
        sweep_class(
            class,
            binaries,
            vectors,
            pairs[class],
            options.radius_max,
            &options.working_area,
        )
    })?;

    let radii: Vec<Option<usize>> = sweeps.iter().map(ClassSweep::optimal_radius).collect();
    for (class, radius) in radii.iter().enumerate() {
        if radius.is_none() {
            warn!(class, "no working-area radius found");
        }
    }
    info!(?radii, "optimal radii selected");

    Ok(RadiusOptimization { radii, sweeps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(radius: usize, value: f64, working_area: bool) -> CriterionEntry {
        CriterionEntry {
            radius,
            value,
            working_area,
        }
    }

    #[test]
    fn test_cumulative_counts() {
        assert_eq!(cumulative_counts(&[0, 2, 2, 5], 3), vec![1, 1, 3, 3]);
        assert_eq!(cumulative_counts(&[], 2), vec![0, 0, 0]);
    }

    #[test]
    fn test_select_radius_larger_wins_ties() {
        let entries = [
            entry(0, 0.2, true),
            entry(1, 0.7, true),
            entry(2, 0.7, true),
            entry(3, 0.9, false),
            entry(4, 0.5, true),
        ];
        assert_eq!(select_radius(&entries), Some(2));
    }

    #[test]
    fn test_select_radius_none_in_working_area() {
        let entries = [entry(0, 0.4, false), entry(1, 0.9, false)];
        assert_eq!(select_radius(&entries), None);
    }

    #[test]
    fn test_sweep_separated_classes() {
        let a = BinaryMatrix::from_rows(&[[1, 1, 1], [1, 1, 1], [1, 1, 0]]).unwrap();
        let b = BinaryMatrix::from_rows(&[[0, 0, 0], [0, 0, 0]]).unwrap();
        let va = ReferenceVector::new(vec![1, 1, 1]).unwrap();
        let vb = ReferenceVector::new(vec![0, 0, 0]).unwrap();
        let pair = NeighborPair {
            neighbor: 1,
            distance: 3,
        };

        let sweep = sweep_class(
            0,
            &[a, b],
            &[va, vb],
            pair,
            4,
            &WorkingArea::default(),
        )
        .unwrap();
        assert_eq!(sweep.entries.len(), 5);

        // radius 0: 2 of 3 own rows inside, no neighbor rows
        assert!(sweep.entries[0].working_area);
        assert!((sweep.entries[0].value - criterion(1.0 / 3.0, 0.0)).abs() < 1e-12);
        // radius 1..2: everything own, nothing foreign
        assert_eq!(sweep.entries[1].value, 1.0);
        assert_eq!(sweep.entries[2].value, 1.0);
        // radius 3: neighbor rows are inside too
        assert!(!sweep.entries[3].working_area);
        assert_eq!(sweep.optimal_radius(), Some(2));
        assert_eq!(sweep.max_criterion(), 1.0);
        assert_eq!(sweep.max_working_area_criterion(), Some(1.0));
    }

    #[test]
    fn test_sweep_rejects_oversized_radius() {
        let a = BinaryMatrix::from_rows(&[[1, 0]]).unwrap();
        let b = BinaryMatrix::from_rows(&[[0, 1]]).unwrap();
        let va = ReferenceVector::new(vec![1, 0]).unwrap();
        let vb = ReferenceVector::new(vec![0, 1]).unwrap();
        let pair = NeighborPair {
            neighbor: 1,
            distance: 2,
        };
        let result = sweep_class(
            0,
            &[a, b],
            &[va, vb],
            pair,
            usize::MAX,
            &WorkingArea::default(),
        );
        assert!(matches!(result, Err(RecogError::InvalidParameter(_))));
    }

    #[test]
    fn test_optimize_radii_requires_two_classes() {
        let a = BinaryMatrix::from_rows(&[[1, 0]]).unwrap();
        let va = ReferenceVector::new(vec![1, 0]).unwrap();
        let result = optimize_radii(&[a], &[va], &TrainOptions::default(), &CancelToken::new());
        assert!(matches!(result, Err(RecogError::TooFewClasses { count: 1 })));
    }

    #[test]
    fn test_optimize_radii_cancelled() {
        let a = BinaryMatrix::from_rows(&[[1, 0]]).unwrap();
        let b = BinaryMatrix::from_rows(&[[0, 1]]).unwrap();
        let va = ReferenceVector::new(vec![1, 0]).unwrap();
        let vb = ReferenceVector::new(vec![0, 1]).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = optimize_radii(&[a, b], &[va, vb], &TrainOptions::default(), &cancel);
        assert!(matches!(result, Err(RecogError::Cancelled { .. })));
    }
}
