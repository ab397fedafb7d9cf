//! ieit-recog - Information-extreme classification
//!
//! This crate learns a binary encoding and per-class containers from
//! labeled sample images and uses them to classify square tiles of an
//! unseen image:
//!
//! - **Binary encoding**: threshold pixel values against the class-0 limit vector
//! - **Reference vectors**: per-class column majority of the binary matrix
//! - **Neighbor pairing**: nearest other class by Hamming distance
//! - **Criterion**: Kullback-derived separability of the two error rates
//! - **Radius optimization**: best working-area container radius per class
//! - **Delta optimization**: encoding band width maximizing the mean criterion
//! - **Exam**: score tiles against each container and pick the best class
//!
//! # Quick Start
//!
//! ```no_run
//! use ieit_core::MemoryPixelSource;
//! use ieit_recog::{CancelToken, ExamOptions, TrainOptions, launch};
//!
//! let source = MemoryPixelSource::new();
//! // ... register the class samples and the image to classify ...
//! let output = launch(
//!     &source,
//!     "scene",
//!     &["water", "forest", "field"],
//!     &TrainOptions::default(),
//!     &ExamOptions::default(),
//!     &CancelToken::new(),
//! )
//! .unwrap();
//! println!("optimal delta: {}", output.model.delta());
//! println!("radii: {:?}", output.model.radii());
//! ```
//!
//! # Modules
//!
//! - [`encode`]: Limit vector and binary encoding
//! - [`reference`]: Reference vector construction
//! - [`pairing`]: Nearest-neighbor pairing
//! - [`criterion`]: Criterion and working area
//! - [`radius`]: Radius optimization
//! - [`delta`]: Delta optimization
//! - [`exam`]: Tile exam and classification results
//! - [`model`]: Train/classify pipeline
//!
//! # Features
//!
//! - `rayon` (default): evaluate deltas, classes and tiles in parallel.
//!   Output is identical to the sequential path.

mod cancel;
pub mod criterion;
pub mod delta;
pub mod encode;
mod error;
pub mod exam;
pub mod model;
mod options;
pub mod pairing;
mod par;
pub mod radius;
pub mod reference;

pub use cancel::CancelToken;
pub use error::{RecogError, RecogResult};
pub use options::{
    DEFAULT_AREA_SIZE, DEFAULT_DELTA_MAX, DEFAULT_DELTA_MIN, DEFAULT_RADIUS_MAX, DELTA_MAX_LIMIT,
    ExamOptions, RADIUS_MAX_LIMIT, TrainOptions,
};

// Re-export commonly used types
pub use criterion::{CriterionEntry, WorkingArea, criterion, is_working_area, kullback};
pub use delta::{DeltaOptimization, DeltaSweepRow, optimize_delta};
pub use encode::{compute_limit_vector, encode};
pub use exam::{Classification, TileVerdict, exam};
pub use model::{LaunchOutput, Model, OptimizationResult, launch, train, train_from_matrices};
pub use pairing::{NeighborPair, pair_classes};
pub use radius::{ClassSweep, RadiusOptimization, optimize_radii};
pub use reference::build_vector;

// Re-export core for convenience
pub use ieit_core;
