//! PixelSource - Capability for obtaining sample matrices
//!
//! Decoding image files is not the engine's business. Anything that can
//! turn an identifier into a [`PixelMatrix`] implements [`PixelSource`] and
//! is passed explicitly to the training and classification entry points.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::matrix::PixelMatrix;

/// Supplier of pixel matrices by identifier
///
/// Every source used within one run must produce the same
/// channel-concatenated column layout.
pub trait PixelSource {
    /// Return the pixel matrix for `id`
    fn fetch(&self, id: &str) -> Result<PixelMatrix>;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn fetch(&self, id: &str) -> Result<PixelMatrix> {
        (**self).fetch(id)
    }
}

/// In-memory pixel source keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemoryPixelSource {
    images: HashMap<String, PixelMatrix>,
}

impl MemoryPixelSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a matrix under `id`, replacing any previous entry
    pub fn insert(&mut self, id: impl Into<String>, matrix: PixelMatrix) {
        self.images.insert(id.into(), matrix);
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, id: impl Into<String>, matrix: PixelMatrix) -> Self {
        self.insert(id, matrix);
        self
    }

    /// Number of registered images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Check if no images are registered
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl PixelSource for MemoryPixelSource {
    fn fetch(&self, id: &str) -> Result<PixelMatrix> {
        self.images
            .get(id)
            .cloned()
            .ok_or_else(|| Error::SourceNotFound(id.to_string()))
    }
}
