//! TileRect, TileAssignment - Square classification regions
//!
//! An unseen image is partitioned into non-overlapping square tiles of a
//! fixed side. Tiles are visited column by column (outer loop over `x`,
//! inner loop over `y`). Tiles that would extend past the right or bottom
//! edge are skipped rather than padded.

use crate::error::{Error, Result};

/// Square region of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    /// Left edge in pixels
    pub x: usize,
    /// Top edge in pixels
    pub y: usize,
    /// Side length in pixels
    pub size: usize,
}

impl TileRect {
    /// Create a new tile
    pub const fn new(x: usize, y: usize, size: usize) -> Self {
        Self { x, y, size }
    }

    /// Centre point, rounded down
    pub fn center(&self) -> (usize, usize) {
        (self.x + self.size / 2, self.y + self.size / 2)
    }
}

/// Enumerate the full tiles of a `width` x `height` image
///
/// # Arguments
///
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `area_size` - Tile side in pixels
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `area_size` is zero.
pub fn tile_grid(width: usize, height: usize, area_size: usize) -> Result<Vec<TileRect>> {
    if area_size == 0 {
        return Err(Error::InvalidParameter(
            "area_size must be positive".to_string(),
        ));
    }

    let nx = width / area_size;
    let ny = height / area_size;
    let mut tiles = Vec::with_capacity(nx * ny);
    for ix in 0..nx {
        for iy in 0..ny {
            tiles.push(TileRect::new(ix * area_size, iy * area_size, area_size));
        }
    }
    Ok(tiles)
}

/// Classification outcome for one tile
///
/// This is what the core hands to a rendering collaborator: the region,
/// the winning class (if any), and the winning exam score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileAssignment {
    /// Tile region
    pub rect: TileRect,
    /// Winning class index, `None` if no class scored above zero
    pub class: Option<usize>,
    /// Exam score of the winning class (0.0 when unclassified)
    pub score: f64,
}

impl TileAssignment {
    /// Check whether the tile was assigned to a class
    pub fn is_classified(&self) -> bool {
        self.class.is_some()
    }
}
