//! Error types for ieit-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal layout details of the matrices involved.

use thiserror::Error;

/// ieit-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input data (empty matrix, ragged rows, mismatched features)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Feature count mismatch between two matrices or vectors
    #[error("feature count mismatch: expected {expected}, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    /// Region does not fit inside the matrix
    #[error("region {x},{y} size {size} exceeds image {width}x{height}")]
    RegionOutOfBounds {
        x: usize,
        y: usize,
        size: usize,
        width: usize,
        height: usize,
    },

    /// The pixel source has no image under the requested identifier
    #[error("image source not found: {0}")]
    SourceNotFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode error
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for ieit operations
pub type Result<T> = std::result::Result<T, Error>;
