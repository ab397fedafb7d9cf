//! Two-phase pipeline: train a model, then classify unseen images
//!
//! Training runs the delta sweep, re-encodes every class at the optimal
//! delta, and optimizes the per-class radii. The resulting [`Model`] holds
//! everything the exam needs, so classification never touches the class
//! samples again.

use ieit_core::{LimitVector, PixelMatrix, PixelSource, ReferenceVector, TileRect, tile_grid};
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::delta::{DeltaOptimization, check_classes, optimize_delta};
use crate::encode::{compute_limit_vector, encode};
use crate::exam::{Classification, TileVerdict, classify_binary, undefined_classes};
use crate::options::{ExamOptions, TrainOptions};
use crate::par::map_ordered;
use crate::radius::{RadiusOptimization, optimize_radii};
use crate::reference::build_vector;
use crate::{RecogError, RecogResult};

/// Delta and radius optimization tables of one training run
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Delta sweep and its optimum
    pub delta: DeltaOptimization,
    /// Radius sweeps at the optimal delta and their optima
    pub radius: RadiusOptimization,
}

impl OptimizationResult {
    /// Selected delta
    pub fn optimal_delta(&self) -> u32 {
        self.delta.optimal_delta
    }

    /// Selected radius per class
    pub fn optimal_radii(&self) -> &[Option<usize>] {
        &self.radius.radii
    }
}

/// Trained classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    limit: LimitVector,
    vectors: Vec<ReferenceVector>,
    result: OptimizationResult,
}

impl Model {
    /// Optimal delta
    pub fn delta(&self) -> u32 {
        self.result.optimal_delta()
    }

    /// Limit vector all encodings are relative to
    pub fn limit_vector(&self) -> &LimitVector {
        &self.limit
    }

    /// Reference vector per class at the optimal delta
    pub fn reference_vectors(&self) -> &[ReferenceVector] {
        &self.vectors
    }

    /// Optimal radius per class
    pub fn radii(&self) -> &[Option<usize>] {
        self.result.optimal_radii()
    }

    /// Optimization tables
    pub fn result(&self) -> &OptimizationResult {
        &self.result
    }

    /// Number of classes
    pub fn class_count(&self) -> usize {
        self.vectors.len()
    }

    /// Classes that cannot be scored by the exam
    pub fn undefined_classes(&self) -> Vec<usize> {
        undefined_classes(self.radii())
    }

    /// Number of features a sample row must have
    pub fn feature_count(&self) -> usize {
        self.limit.len()
    }

    /// Encode one tile and pick its class
    pub fn classify_matrix(&self, tile: &PixelMatrix) -> RecogResult<TileVerdict> {
        let binary = encode(tile, &self.limit, self.delta())?;
        classify_binary(&binary, &self.vectors, self.radii())
    }

    fn warn_undefined(&self) -> Vec<usize> {
        let undefined = self.undefined_classes();
        if !undefined.is_empty() {
            warn!(
                classes = ?undefined,
                "classes without a usable radius are excluded from the exam"
            );
        }
        undefined
    }

    /// Classify pre-cut tiles
    ///
    /// Assignments are returned in the order of `tiles`.
    pub fn classify_tiles(
        &self,
        tiles: &[(TileRect, PixelMatrix)],
        parallel: bool,
        cancel: &CancelToken,
    ) -> RecogResult<Classification> {
        let undefined_classes = self.warn_undefined();
        let indexed: Vec<(usize, &(TileRect, PixelMatrix))> = tiles.iter().enumerate().collect();
        let assignments = map_ordered(&indexed, parallel, |&(i, (rect, tile))| {
            cancel.check("exam", i)?;
            Ok(self.classify_matrix(tile)?.assign(*rect))
        })?;
        Ok(Classification {
            assignments,
            undefined_classes,
        })
    }

    /// Tile an image and classify every full tile
    ///
    /// Tiles are visited column by column and tiles that would cross the
    /// right or bottom edge are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if the image layout does not
    /// split into `options.channels` blocks or a tile's feature count
    /// differs from the model's.
    pub fn classify_image(
        &self,
        image: &PixelMatrix,
        options: &ExamOptions,
        cancel: &CancelToken,
    ) -> RecogResult<Classification> {
        options.validate()?;
        if options.tile_features() != self.feature_count() {
            return Err(RecogError::InvalidParameter(format!(
                "tiles of side {} with {} channels have {} features, model expects {}",
                options.area_size,
                options.channels,
                options.tile_features(),
                self.feature_count()
            )));
        }
        let width = image.image_width(options.channels).ok_or_else(|| {
            RecogError::InvalidParameter(format!(
                "{} columns cannot be split into {} channels",
                image.cols(),
                options.channels
            ))
        })?;

        let rects = tile_grid(width, image.rows(), options.area_size)?;
        let undefined_classes = self.warn_undefined();
        let indexed: Vec<(usize, TileRect)> = rects.into_iter().enumerate().collect();
        let assignments = map_ordered(&indexed, options.parallel, |&(i, rect)| {
            cancel.check("exam", i)?;
            let tile = image.crop_square(rect, options.channels)?;
            Ok(self.classify_matrix(&tile)?.assign(rect))
        })?;

        let classification = Classification {
            assignments,
            undefined_classes,
        };
        info!(
            tiles = classification.assignments.len(),
            classified = classification.classified_count(),
            "image classified"
        );
        Ok(classification)
    }
}

/// Train a model from per-class sample matrices
///
/// Class 0 defines the limit vector.
///
/// # Errors
///
/// Fails with [`RecogError::TooFewClasses`] for fewer than two classes,
/// a feature mismatch error when the classes differ in width, and
/// [`RecogError::Cancelled`] when `cancel` fires.
pub fn train_from_matrices(
    classes: &[PixelMatrix],
    options: &TrainOptions,
    cancel: &CancelToken,
) -> RecogResult<Model> {
    options.validate()?;
    check_classes(classes)?;

    let delta = optimize_delta(classes, options, cancel)?;

    let limit = compute_limit_vector(&classes[0]);
    let binaries = classes
        .iter()
        .map(|m| encode(m, &limit, delta.optimal_delta))
        .collect::<RecogResult<Vec<_>>>()?;
    let vectors = binaries
        .iter()
        .map(build_vector)
        .collect::<RecogResult<Vec<_>>>()?;

    let radius = optimize_radii(&binaries, &vectors, options, cancel)?;

    Ok(Model {
        limit,
        vectors,
        result: OptimizationResult { delta, radius },
    })
}

/// Fetch each class's samples from `source` and train a model
pub fn train<S, I>(
    source: &S,
    class_ids: &[I],
    options: &TrainOptions,
    cancel: &CancelToken,
) -> RecogResult<Model>
where
    S: PixelSource + ?Sized,
    I: AsRef<str>,
{
    let classes = class_ids
        .iter()
        .map(|id| -> RecogResult<PixelMatrix> {
            let matrix = source.fetch(id.as_ref())?;
            info!(
                id = id.as_ref(),
                rows = matrix.rows(),
                cols = matrix.cols(),
                "class samples loaded"
            );
            Ok(matrix)
        })
        .collect::<RecogResult<Vec<_>>>()?;
    train_from_matrices(&classes, options, cancel)
}

/// Output of a full train-then-classify run
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOutput {
    /// Trained model with its optimization tables
    pub model: Model,
    /// Tile assignments of the examined image
    pub classification: Classification,
}

/// Train on the class images and classify the examined image
///
/// # Arguments
///
/// * `source` - Supplies both the class samples and the examined image
/// * `image_id` - Identifier of the image to classify
/// * `class_ids` - Identifier of each class's sample image, class 0 first
pub fn launch<S, I>(
    source: &S,
    image_id: &str,
    class_ids: &[I],
    train_options: &TrainOptions,
    exam_options: &ExamOptions,
    cancel: &CancelToken,
) -> RecogResult<LaunchOutput>
where
    S: PixelSource + ?Sized,
    I: AsRef<str>,
{
    exam_options.validate()?;
    let model = train(source, class_ids, train_options, cancel)?;
    let image = source.fetch(image_id)?;
    let classification = model.classify_image(&image, exam_options, cancel)?;
    Ok(LaunchOutput {
        model,
        classification,
    })
}
