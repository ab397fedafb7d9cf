//! ieit Core - Basic data structures for information-extreme classification
//!
//! This crate provides the fundamental data structures shared by the
//! classification engine and its I/O collaborators:
//!
//! - [`PixelMatrix`] - Real-valued samples in channel-concatenated layout
//! - [`LimitVector`] - Per-feature centre of the binarization band
//! - [`BinaryMatrix`] / [`ReferenceVector`] - 0/1 encodings and class prototypes
//! - [`TileRect`] / [`TileAssignment`] - Square regions of an unseen image
//! - [`PixelSource`] - Capability that turns an identifier into a matrix

pub mod binary;
pub mod error;
pub mod matrix;
pub mod source;
pub mod tile;

pub use binary::{BinaryMatrix, ReferenceVector, hamming_distance};
pub use error::{Error, Result};
pub use matrix::{LimitVector, PixelMatrix, RGB_CHANNELS};
pub use source::{MemoryPixelSource, PixelSource};
pub use tile::{TileAssignment, TileRect, tile_grid};
