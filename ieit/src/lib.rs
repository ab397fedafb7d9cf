//! ieit - Information-extreme image tile classifier
//!
//! Learns a binary encoding and a container per class from labeled sample
//! images, then labels the square tiles of an unseen image.
//!
//! # Overview
//!
//! - Pixel data model, tiling and the pixel source capability ([`ieit_core`])
//! - Image decoding and result rendering ([`io`])
//! - Delta and radius optimization, exam and the train/classify pipeline ([`recog`])
//!
//! # Example
//!
//! ```no_run
//! use ieit::recog::{CancelToken, ExamOptions, TrainOptions};
//!
//! let report = ieit::classify_to_file(
//!     "samples",
//!     "scene.png",
//!     &["water.png", "forest.png"],
//!     "scene-classified.png",
//!     &TrainOptions::default(),
//!     &ExamOptions::default(),
//!     &CancelToken::new(),
//! )
//! .unwrap();
//! println!("optimal delta: {}", report.model.delta());
//! ```

mod run;

// Re-export core types (primary data structures used everywhere)
pub use ieit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use ieit_io as io;
pub use ieit_recog as recog;

pub use run::{RunError, classify_to_file};
