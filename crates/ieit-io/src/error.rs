//! I/O error types
//!
//! Decoding, encoding and file errors from the `image` crate are kept in
//! their own variants so callers can tell a missing file from a corrupt
//! one. [`IoError`] converts into [`ieit_core::Error`] for use behind the
//! [`PixelSource`](ieit_core::PixelSource) trait.

use thiserror::Error;

/// Error type for image I/O and rendering
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension does not name a format enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The `image` crate failed to decode or encode
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid parameter value (empty palette, zero-sized tile)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An error from the core library (region out of bounds, bad layout)
    #[error("core error: {0}")]
    Core(#[from] ieit_core::Error),
}

/// Convenience alias for I/O results
pub type IoResult<T> = Result<T, IoError>;

impl From<IoError> for ieit_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Io(e) => ieit_core::Error::Io(e),
            IoError::Image(image::ImageError::IoError(e)) => ieit_core::Error::Io(e),
            IoError::Core(e) => e,
            IoError::InvalidParameter(msg) => ieit_core::Error::InvalidParameter(msg),
            other => ieit_core::Error::DecodeError(other.to_string()),
        }
    }
}
