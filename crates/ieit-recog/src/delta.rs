//! Delta optimization
//!
//! Every candidate delta is evaluated from scratch: all classes are encoded
//! against the class-0 limit vector, reference vectors and neighbor pairs
//! are rebuilt, and each class's full radius sweep is reduced to two
//! numbers, the best criterion over all radii and the best criterion over
//! working-area radii (or [`NO_WORKING_AREA_FLOOR`] when there is none).
//! The class averages of those numbers rate the delta.
//!
//! The optimal delta is the first one whose mean working-area criterion is
//! strictly greater than every earlier one and than zero.

use std::io::{self, Write};

use ieit_core::{Error, LimitVector, PixelMatrix};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::encode::{compute_limit_vector, encode};
use crate::options::TrainOptions;
use crate::pairing::pair_classes;
use crate::par::map_ordered;
use crate::radius::sweep_class;
use crate::reference::build_vector;
use crate::{RecogError, RecogResult};

/// Per-class working-area maximum used when a class has no working-area radius
pub const NO_WORKING_AREA_FLOOR: f64 = -10.0;

/// Reported in the sweep table when the mean working-area criterion is not positive
pub const NO_WORKING_AREA_SENTINEL: f64 = -1.0;

/// One row of the delta sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaSweepRow {
    /// Candidate delta
    pub delta: u32,
    /// Class average of each class's best criterion over all radii
    pub mean_criterion: f64,
    /// Class average of each class's best working-area criterion
    ///
    /// Classes without a working-area radius contribute
    /// [`NO_WORKING_AREA_FLOOR`].
    pub mean_working_area_criterion: f64,
}

impl DeltaSweepRow {
    /// Working-area value as reported: positive mean or `None`
    pub fn working_area_score(&self) -> Option<f64> {
        (self.mean_working_area_criterion > 0.0).then_some(self.mean_working_area_criterion)
    }

    /// Working-area value with the `-1` sentinel for non-positive means
    pub fn reported_working_area_criterion(&self) -> f64 {
        self.working_area_score()
            .unwrap_or(NO_WORKING_AREA_SENTINEL)
    }
}

/// Outcome of the delta sweep
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaOptimization {
    /// Selected delta
    pub optimal_delta: u32,
    /// Whether any delta reached a positive mean working-area criterion
    ///
    /// When `false`, `optimal_delta` is the first delta with the highest
    /// (non-positive) mean instead.
    pub found_working_area: bool,
    /// Sweep table in increasing delta order
    pub rows: Vec<DeltaSweepRow>,
}

impl DeltaOptimization {
    /// Row of the selected delta
    pub fn optimal_row(&self) -> Option<&DeltaSweepRow> {
        self.rows.iter().find(|r| r.delta == self.optimal_delta)
    }

    /// Write the sweep table as whitespace-separated text
    ///
    /// One `<delta> <mean criterion> <mean working-area criterion or -1>`
    /// line per delta.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in &self.rows {
            writeln!(
                out,
                "{} {} {}",
                row.delta,
                row.mean_criterion,
                row.reported_working_area_criterion()
            )?;
        }
        Ok(())
    }
}

/// Check that there are at least two classes of equal feature width
pub(crate) fn check_classes(classes: &[PixelMatrix]) -> RecogResult<()> {
    if classes.len() < 2 {
        return Err(RecogError::TooFewClasses {
            count: classes.len(),
        });
    }
    let cols = classes[0].cols();
    if let Some(m) = classes.iter().find(|m| m.cols() != cols) {
        return Err(Error::FeatureMismatch {
            expected: cols,
            actual: m.cols(),
        }
        .into());
    }
    Ok(())
}

/// Rate a single delta
///
/// The per-radius tables are reduced as soon as they are built and are
/// not returned.
pub fn evaluate_delta(
    classes: &[PixelMatrix],
    limit: &LimitVector,
    delta: u32,
    options: &TrainOptions,
) -> RecogResult<DeltaSweepRow> {
    check_classes(classes)?;

    let binaries = classes
        .iter()
        .map(|m| encode(m, limit, delta))
        .collect::<RecogResult<Vec<_>>>()?;
    let vectors = binaries
        .iter()
        .map(build_vector)
        .collect::<RecogResult<Vec<_>>>()?;
    let pairs = pair_classes(&vectors)?;

    let mut sum = 0.0;
    let mut sum_working_area = 0.0;
    for (class, &pair) in pairs.iter().enumerate() {
        let sweep = sweep_class(
            class,
            &binaries,
            &vectors,
            pair,
            options.radius_max,
            &options.working_area,
        )?;
        sum += sweep.max_criterion();
        sum_working_area += sweep
            .max_working_area_criterion()
            .unwrap_or(NO_WORKING_AREA_FLOOR);
    }

    let n = classes.len() as f64;
    Ok(DeltaSweepRow {
        delta,
        mean_criterion: sum / n,
        mean_working_area_criterion: sum_working_area / n,
    })
}

/// Pick the optimal delta from an ordered sweep table
///
/// Returns the delta and whether it has a positive working-area mean.
fn select_delta(rows: &[DeltaSweepRow]) -> Option<(u32, bool)> {
    let mut best: Option<(u32, f64)> = None;
    for row in rows {
        let value = row.mean_working_area_criterion;
        if value > best.map_or(0.0, |(_, v)| v) {
            best = Some((row.delta, value));
        }
    }
    if let Some((delta, _)) = best {
        return Some((delta, true));
    }

    let mut fallback: Option<(u32, f64)> = None;
    for row in rows {
        let value = row.mean_working_area_criterion;
        if fallback.is_none_or(|(_, v)| value > v) {
            fallback = Some((row.delta, value));
        }
    }
    fallback.map(|(delta, _)| (delta, false))
}

/// Sweep every candidate delta and select the optimum
///
/// # Arguments
///
/// * `classes` - Sample matrix per class; class 0 defines the limit vector
/// * `options` - Sweep ranges and thresholds
/// * `cancel` - Checked before each delta is evaluated
pub fn optimize_delta(
    classes: &[PixelMatrix],
    options: &TrainOptions,
    cancel: &CancelToken,
) -> RecogResult<DeltaOptimization> {
    options.validate()?;
    check_classes(classes)?;

    let limit = compute_limit_vector(&classes[0]);
    let deltas = options.deltas();
    let rows = map_ordered(&deltas, options.parallel, |&delta| {
        cancel.check("delta sweep", delta as usize)?;
        evaluate_delta(classes, &limit, delta, options)
    })?;

    for row in &rows {
        debug!(
            delta = row.delta,
            mean_criterion = row.mean_criterion,
            mean_working_area_criterion = row.reported_working_area_criterion(),
            "delta evaluated"
        );
    }

    let (optimal_delta, found_working_area) = select_delta(&rows).ok_or_else(|| {
        RecogError::InvalidParameter("delta range is empty".to_string())
    })?;
    if found_working_area {
        info!(optimal_delta, "optimal delta selected");
    } else {
        warn!(
            optimal_delta,
            "no delta reached a positive working-area criterion"
        );
    }

    Ok(DeltaOptimization {
        optimal_delta,
        found_working_area,
        rows,
    })
}
