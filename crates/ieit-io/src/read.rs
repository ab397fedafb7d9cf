//! Decoding images into pixel matrices
//!
//! Every decoded image is converted to 8-bit RGB and laid out with one
//! matrix row per image row and the three channels concatenated:
//! `[R(0..w), G(0..w), B(0..w)]`.

use std::path::{Path, PathBuf};

use ieit_core::{Error, PixelMatrix, PixelSource, TileRect};
use image::RgbImage;
use tracing::debug;

use crate::{IoError, IoResult};

/// Read any supported image file as 8-bit RGB
pub fn read_rgb<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgb8();
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image decoded"
    );
    Ok(image)
}

/// Convert an RGB image to the channel-concatenated layout
pub fn pixel_matrix_from_rgb(image: &RgbImage) -> IoResult<PixelMatrix> {
    Ok(PixelMatrix::from_interleaved_rgb(
        image.width() as usize,
        image.height() as usize,
        image.as_raw(),
    )?)
}

/// Cut a square tile out of an RGB image as a pixel matrix
///
/// # Errors
///
/// Returns [`Error::RegionOutOfBounds`] (wrapped in [`IoError::Core`]) if
/// the tile does not lie entirely inside the image.
pub fn crop_tile(image: &RgbImage, rect: TileRect) -> IoResult<PixelMatrix> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if rect.size == 0 {
        return Err(IoError::InvalidParameter(
            "tile size must be positive".to_string(),
        ));
    }
    if rect.x + rect.size > width || rect.y + rect.size > height {
        return Err(Error::RegionOutOfBounds {
            x: rect.x,
            y: rect.y,
            size: rect.size,
            width,
            height,
        }
        .into());
    }

    let size = rect.size as u32;
    let tile = image::imageops::crop_imm(image, rect.x as u32, rect.y as u32, size, size).to_image();
    pixel_matrix_from_rgb(&tile)
}

/// Pixel source reading image files below a root directory
///
/// Identifiers are file paths relative to the root.
#[derive(Debug, Clone)]
pub struct FilePixelSource {
    root: PathBuf,
}

impl FilePixelSource {
    /// Create a source rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of an identifier
    pub fn path_of(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    /// Decode the image of an identifier as RGB
    pub fn read(&self, id: &str) -> IoResult<RgbImage> {
        read_rgb(self.path_of(id))
    }
}

impl PixelSource for FilePixelSource {
    fn fetch(&self, id: &str) -> ieit_core::Result<PixelMatrix> {
        let path = self.path_of(id);
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.display().to_string()));
        }
        let image = read_rgb(&path)?;
        Ok(pixel_matrix_from_rgb(&image)?)
    }
}
