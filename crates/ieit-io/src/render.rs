//! Rendering classification results onto an image
//!
//! Each classified tile gets a 1-pixel outline in its class colour and the
//! class index drawn at the tile centre with a built-in 3x5 bitmap font.
//! Unclassified tiles are left untouched.

use std::path::Path;

use ieit_core::TileAssignment;
use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::{IoError, IoResult};

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Blue color
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    /// Orange color
    pub const ORANGE: Color = Color {
        r: 255,
        g: 165,
        b: 0,
    };

    fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

/// Class colours, indexed by class and cycling past the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    /// Blue, orange, red, black, white
    fn default() -> Self {
        Self {
            colors: vec![
                Color::BLUE,
                Color::ORANGE,
                Color::RED,
                Color::BLACK,
                Color::WHITE,
            ],
        }
    }
}

impl Palette {
    /// Create a palette from explicit colours
    pub fn new(colors: Vec<Color>) -> IoResult<Self> {
        if colors.is_empty() {
            return Err(IoError::InvalidParameter(
                "palette must have at least one color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Colour of a class
    pub fn color(&self, class: usize) -> Color {
        self.colors[class % self.colors.len()]
    }

    /// Number of distinct colours
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true, [`Palette::new`] rejects an empty colour list
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// 3x5 digit glyphs, one row per byte, bit 2 is the leftmost column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];
const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;

fn put_clipped(image: &mut RgbImage, x: usize, y: usize, color: Color) {
    if x < image.width() as usize && y < image.height() as usize {
        image.put_pixel(x as u32, y as u32, color.to_rgb());
    }
}

/// Draw a 1-pixel square outline with top-left corner `(x, y)`
///
/// Pixels outside the image are skipped.
pub fn draw_square_outline(image: &mut RgbImage, x: usize, y: usize, side: usize, color: Color) {
    if side == 0 {
        return;
    }
    let last = side - 1;
    for i in 0..side {
        put_clipped(image, x + i, y, color);
        put_clipped(image, x + i, y + last, color);
        put_clipped(image, x, y + i, color);
        put_clipped(image, x + last, y + i, color);
    }
}

/// Scale factor of the label glyphs for a tile side
pub fn glyph_scale(tile_size: usize) -> usize {
    (tile_size / 12).max(1)
}

/// Draw a decimal number centred on `(cx, cy)`
///
/// Digits are `3 * scale` pixels wide and `5 * scale` tall with one
/// `scale`-wide gap between them.
pub fn draw_number(
    image: &mut RgbImage,
    cx: usize,
    cy: usize,
    value: usize,
    scale: usize,
    color: Color,
) {
    let scale = scale.max(1);
    let digits: Vec<usize> = value
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();
    let advance = (GLYPH_WIDTH + 1) * scale;
    let total_width = digits.len() * advance - scale;
    let left = cx.saturating_sub(total_width / 2);
    let top = cy.saturating_sub(GLYPH_HEIGHT * scale / 2);

    for (n, &digit) in digits.iter().enumerate() {
        let origin = left + n * advance;
        for (row, bits) in DIGITS[digit].iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        put_clipped(
                            image,
                            origin + col * scale + dx,
                            top + row * scale + dy,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Mark every classified tile with its class colour and index
///
/// The outline is the `size - 1` square whose corner is one pixel inside
/// the tile's top-left corner, so it never reaches into neighboring tiles.
pub fn annotate(image: &mut RgbImage, assignments: &[TileAssignment], palette: &Palette) {
    let mut marked = 0usize;
    for assignment in assignments {
        let Some(class) = assignment.class else {
            continue;
        };
        let rect = assignment.rect;
        let color = palette.color(class);
        draw_square_outline(image, rect.x + 1, rect.y + 1, rect.size.saturating_sub(1), color);
        let (cx, cy) = rect.center();
        draw_number(image, cx, cy, class, glyph_scale(rect.size), color);
        marked += 1;
    }
    debug!(tiles = assignments.len(), marked, "tiles annotated");
}

/// Save an image, choosing the format from the file extension
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] if the extension is unknown.
pub fn write_annotated<P: AsRef<Path>>(image: &RgbImage, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)
        .map_err(|_| IoError::UnsupportedFormat(path.display().to_string()))?;
    image.save_with_format(path, format)?;
    debug!(path = %path.display(), ?format, "annotated image written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ieit_core::TileRect;

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
    }

    fn is(image: &RgbImage, x: u32, y: u32, color: Color) -> bool {
        *image.get_pixel(x, y) == color.to_rgb()
    }

    #[test]
    fn test_palette_cycles() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.color(0), Color::BLUE);
        assert_eq!(palette.color(1), Color::ORANGE);
        assert_eq!(palette.color(6), Color::ORANGE);
        assert!(Palette::new(vec![]).is_err());
        let single = Palette::new(vec![Color::WHITE]).unwrap();
        assert_eq!(single.len(), 1);
        assert!(!single.is_empty());
        assert_eq!(single.color(3), Color::WHITE);
    }

    #[test]
    fn test_square_outline() {
        let mut image = blank(6, 6);
        draw_square_outline(&mut image, 1, 1, 4, Color::RED);
        assert!(is(&image, 1, 1, Color::RED));
        assert!(is(&image, 4, 4, Color::RED));
        assert!(is(&image, 4, 1, Color::RED));
        assert!(!is(&image, 2, 2, Color::RED));
        assert!(!is(&image, 5, 5, Color::RED));
        assert!(!is(&image, 0, 0, Color::RED));
    }

    #[test]
    fn test_outline_clipped_at_edges() {
        let mut image = blank(3, 3);
        draw_square_outline(&mut image, 1, 1, 10, Color::BLUE);
        assert!(is(&image, 2, 1, Color::BLUE));
        assert!(!is(&image, 2, 2, Color::BLUE));
    }

    #[test]
    fn test_draw_digit_one() {
        let mut image = blank(3, 5);
        draw_number(&mut image, 1, 2, 1, 1, Color::BLACK);
        // middle column is fully set
        for y in 0..5 {
            assert!(is(&image, 1, y, Color::BLACK));
        }
        assert!(is(&image, 0, 1, Color::BLACK));
        assert!(!is(&image, 0, 0, Color::BLACK));
        assert!(!is(&image, 2, 2, Color::BLACK));
    }

    #[test]
    fn test_annotate_skips_unclassified() {
        let mut image = blank(20, 10);
        let assignments = [
            TileAssignment {
                rect: TileRect::new(0, 0, 10),
                class: Some(2),
                score: 0.5,
            },
            TileAssignment {
                rect: TileRect::new(10, 0, 10),
                class: None,
                score: 0.0,
            },
        ];
        annotate(&mut image, &assignments, &Palette::default());
        assert!(is(&image, 1, 1, Color::RED));
        assert!(is(&image, 9, 9, Color::RED));
        assert!(!is(&image, 0, 0, Color::RED));
        let untouched = (10..20).all(|x| (0..10).all(|y| *image.get_pixel(x, y) == Rgb([128, 128, 128])));
        assert!(untouched);
    }
}
