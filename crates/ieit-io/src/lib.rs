//! ieit-io - Image I/O for the ieit classifier
//!
//! The classification engine works on [`PixelMatrix`](ieit_core::PixelMatrix)
//! values only. This crate connects it to image files:
//!
//! - [`FilePixelSource`]: a [`PixelSource`](ieit_core::PixelSource) that
//!   decodes files below a root directory
//! - [`pixel_matrix_from_rgb`], [`crop_tile`]: conversions from `image` buffers
//! - [`annotate`], [`write_annotated`]: draw tile assignments and save the result
//!
//! # Supported Formats
//!
//! Decoding and encoding go through the `image` crate. Formats are enabled
//! with Cargo features:
//!
//! | Feature | Format |
//! |---------|--------|
//! | `bmp` (default) | BMP |
//! | `pnm` (default) | PBM/PGM/PPM |
//! | `png-format` (default) | PNG |
//! | `jpeg` (default) | JPEG |
//! | `gif-format` | GIF |
//! | `tiff-format` | TIFF |
//! | `webp-format` | WebP |

mod error;
pub mod read;
pub mod render;

pub use error::{IoError, IoResult};
pub use read::{FilePixelSource, crop_tile, pixel_matrix_from_rgb, read_rgb};
pub use render::{Color, Palette, annotate, draw_number, draw_square_outline, write_annotated};

// Re-export the image buffer type used throughout the API
pub use image::RgbImage;
