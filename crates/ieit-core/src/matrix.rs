//! PixelMatrix, LimitVector - Real-valued sample matrices
//!
//! A `PixelMatrix` holds one row per spatial sample (typically one image
//! row) and one column per feature. For RGB images the columns are laid
//! out channel by channel: all red values of the row, then all green
//! values, then all blue values.
//!
//! ```text
//!   column:  0 .. w-1 | w .. 2w-1 | 2w .. 3w-1
//!   channel:   red    |   green   |    blue
//! ```

use crate::error::{Error, Result};
use crate::tile::TileRect;

/// Number of colour channels in the channel-concatenated layout
pub const RGB_CHANNELS: usize = 3;

/// Matrix of per-pixel channel values
///
/// Invariants: at least one row, at least one column, every row has the
/// same length. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl PixelMatrix {
    /// Create a matrix from row slices
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there are no rows, the first row is
    /// empty, or the rows have different lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| Error::InvalidInput("pixel matrix has no rows".to_string()))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(Error::InvalidInput(
                "pixel matrix has no feature columns".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::InvalidInput(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Create a matrix from row-major data
    ///
    /// # Arguments
    ///
    /// * `data` - Row-major values, `rows * cols` long
    /// * `rows` - Number of samples
    /// * `cols` - Number of features per sample
    pub fn from_flat(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidInput(format!(
                "pixel matrix must be non-empty, got {}x{}",
                rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(Error::InvalidInput(format!(
                "data length {} does not match {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from interleaved 8-bit RGB pixels
    ///
    /// Converts `RGBRGB...` scanlines into the channel-concatenated layout,
    /// one matrix row per image row.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `rgb` - Interleaved pixel data, `width * height * 3` bytes
    pub fn from_interleaved_rgb(width: usize, height: usize, rgb: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "image must be non-empty, got {}x{}",
                width, height
            )));
        }
        let expected = width * height * RGB_CHANNELS;
        if rgb.len() != expected {
            return Err(Error::InvalidInput(format!(
                "rgb buffer has {} bytes, expected {}",
                rgb.len(),
                expected
            )));
        }

        let cols = width * RGB_CHANNELS;
        let mut data = vec![0.0; height * cols];
        for (y, scanline) in rgb.chunks_exact(width * RGB_CHANNELS).enumerate() {
            let row = &mut data[y * cols..(y + 1) * cols];
            for (x, px) in scanline.chunks_exact(RGB_CHANNELS).enumerate() {
                for (ch, &v) in px.iter().enumerate() {
                    row[ch * width + x] = v as f64;
                }
            }
        }

        Ok(Self {
            data,
            rows: height,
            cols,
        })
    }

    /// Number of samples (rows)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of features per sample (columns)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get a single value
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Get one sample row
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index < self.rows {
            Some(&self.data[index * self.cols..(index + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate over sample rows in order
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// Row-major view of all values
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Columnwise arithmetic mean
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for (s, &v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        let n = self.rows as f64;
        sums.iter().map(|s| s / n).collect()
    }

    /// Image width implied by the channel-concatenated layout
    ///
    /// Returns `None` if the column count is not a multiple of `channels`.
    pub fn image_width(&self, channels: usize) -> Option<usize> {
        if channels == 0 || self.cols % channels != 0 {
            None
        } else {
            Some(self.cols / channels)
        }
    }

    /// Extract a square region as a new matrix in the same layout
    ///
    /// The result has `rect.size` rows and `rect.size * channels` columns,
    /// each channel block cropped to the region's horizontal extent.
    pub fn crop_square(&self, rect: TileRect, channels: usize) -> Result<PixelMatrix> {
        let width = self.image_width(channels).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "{} columns cannot be split into {} channels",
                self.cols, channels
            ))
        })?;
        if rect.size == 0 {
            return Err(Error::InvalidParameter(
                "tile size must be positive".to_string(),
            ));
        }
        if rect.x + rect.size > width || rect.y + rect.size > self.rows {
            return Err(Error::RegionOutOfBounds {
                x: rect.x,
                y: rect.y,
                size: rect.size,
                width,
                height: self.rows,
            });
        }

        let cols = rect.size * channels;
        let mut data = Vec::with_capacity(rect.size * cols);
        for y in rect.y..rect.y + rect.size {
            let row = &self.data[y * self.cols..(y + 1) * self.cols];
            for ch in 0..channels {
                let start = ch * width + rect.x;
                data.extend_from_slice(&row[start..start + rect.size]);
            }
        }

        Ok(PixelMatrix {
            data,
            rows: rect.size,
            cols,
        })
    }
}

/// Per-feature centre of the binarization band
///
/// The columnwise mean profile of the designated reference class.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitVector {
    values: Vec<f64>,
}

impl LimitVector {
    /// Create a limit vector from explicit values
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidInput("limit vector is empty".to_string()));
        }
        Ok(Self { values })
    }

    /// Columnwise mean of a sample matrix
    pub fn from_samples(samples: &PixelMatrix) -> Self {
        Self {
            values: samples.column_means(),
        }
    }

    /// Number of features
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the vector has no features
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
