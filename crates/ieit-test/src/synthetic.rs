//! Deterministic synthetic sample data
//!
//! Regression tests need class samples whose statistics are known in
//! advance. Values here are a constant profile plus a bounded jitter that
//! depends only on the row and column index, so every run sees identical
//! data and the column means of a ten-row block equal the profile exactly
//! whenever the jitter period divides the row count.

use ieit_core::{PixelMatrix, RGB_CHANNELS};

use crate::error::{TestError, TestResult};

/// Jitter in `[-amplitude, amplitude]` for entry `(row, col)`
///
/// For a fixed column the jitter cycles through every value in the range
/// once per `2 * amplitude + 1` consecutive rows.
pub fn jitter(row: usize, col: usize, amplitude: usize) -> f64 {
    if amplitude == 0 {
        return 0.0;
    }
    let period = 2 * amplitude + 1;
    ((3 * row + 7 * col) % period) as f64 - amplitude as f64
}

/// Matrix of `rows` samples around a constant feature profile
///
/// # Arguments
///
/// * `name` - Label used in error messages
/// * `rows` - Number of samples
/// * `profile` - Centre value of each feature
/// * `amplitude` - Jitter amplitude
pub fn constant_profile(
    name: &str,
    rows: usize,
    profile: &[f64],
    amplitude: usize,
) -> TestResult<PixelMatrix> {
    let data: Vec<f64> = (0..rows)
        .flat_map(move |r| {
            profile
                .iter()
                .enumerate()
                .map(move |(c, &p)| p + jitter(r, c, amplitude))
        })
        .collect();
    PixelMatrix::from_flat(data, rows, profile.len()).map_err(|source| TestError::Synthetic {
        name: name.to_string(),
        source,
    })
}

/// Interleaved RGB bytes of a mosaic made of uniformly coloured cells
///
/// `layout[row][col]` is the colour of the cell in tile row `row` and tile
/// column `col`. Each cell is `cell_size` pixels square, and every channel
/// value is jittered by at most `amplitude` (clamped to `0..=255`).
///
/// # Returns
///
/// `(width, height, bytes)` with `bytes` in `RGBRGB...` scanline order.
pub fn mosaic_rgb(
    layout: &[Vec<[u8; 3]>],
    cell_size: usize,
    amplitude: usize,
) -> (usize, usize, Vec<u8>) {
    let tiles_down = layout.len();
    let tiles_across = layout.first().map(|r| r.len()).unwrap_or(0);
    let width = tiles_across * cell_size;
    let height = tiles_down * cell_size;

    let mut bytes = Vec::with_capacity(width * height * RGB_CHANNELS);
    for y in 0..height {
        for x in 0..width {
            let color = layout[y / cell_size][x / cell_size];
            for (ch, &base) in color.iter().enumerate() {
                let v = base as f64 + jitter(y, x * RGB_CHANNELS + ch, amplitude);
                bytes.push(v.clamp(0.0, 255.0) as u8);
            }
        }
    }
    (width, height, bytes)
}

/// Pixel matrix of a mosaic, see [`mosaic_rgb`]
pub fn mosaic(
    name: &str,
    layout: &[Vec<[u8; 3]>],
    cell_size: usize,
    amplitude: usize,
) -> TestResult<PixelMatrix> {
    let (width, height, bytes) = mosaic_rgb(layout, cell_size, amplitude);
    PixelMatrix::from_interleaved_rgb(width, height, &bytes).map_err(|source| {
        TestError::Synthetic {
            name: name.to_string(),
            source,
        }
    })
}

/// Pixel matrix of a single uniformly coloured square patch
pub fn rgb_patch(
    name: &str,
    size: usize,
    color: [u8; 3],
    amplitude: usize,
) -> TestResult<PixelMatrix> {
    mosaic(name, &[vec![color]], size, amplitude)
}
