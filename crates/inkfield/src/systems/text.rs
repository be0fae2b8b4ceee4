//! Bitmap-font text rasterizer.
//!
//! A built-in 5×7 face scaled to the viewport's font size. Used by native
//! builds and tests, where no browser canvas exists; output is a pure
//! function of `(text, width, height)` so rebuilds are bit-identical.
//!
//! The face is uppercase-only: lowercase letters use the uppercase glyphs.
//! Characters without a glyph (emoji, most symbols) still advance the cursor
//! but leave no ink.

use crate::api::types::TextBounds;
use crate::core::raster::{font_size_for, Raster, RasterError, TextRasterizer};

/// Glyph width in cells.
pub const GLYPH_COLS: u32 = 5;
/// Glyph height in cells.
pub const GLYPH_ROWS: u32 = 7;

/// Style for the built-in face.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFont {
    /// Gap between glyphs, in cells.
    pub letter_spacing: u32,
    /// Ink colour. Must not be pure black, or nothing counts as ink.
    pub ink: [u8; 3],
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self {
            letter_spacing: 1,
            ink: [255, 255, 255],
        }
    }
}

impl BitmapFont {
    /// Set the ink colour.
    pub fn with_ink(mut self, ink: [u8; 3]) -> Self {
        self.ink = ink;
        self
    }

    /// Horizontal advance per character, in cells.
    pub fn advance(&self) -> u32 {
        GLYPH_COLS + self.letter_spacing
    }

    /// Pixel size of one glyph cell for a font size (at least 1 px).
    pub fn cell_size(&self, font_size: f32) -> u32 {
        ((font_size / GLYPH_ROWS as f32).floor() as u32).max(1)
    }

    /// Rendered width in pixels, without trailing spacing.
    pub fn measure(&self, text: &str, cell: u32) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        n * self.advance() * cell - self.letter_spacing * cell
    }
}

/// Row bitmaps for a character (bit 4 = leftmost column), or `None` if the
/// face has no glyph for it.
pub fn glyph(c: char) -> Option<&'static [u8; GLYPH_ROWS as usize]> {
    let g: &'static [u8; 7] = match c.to_ascii_uppercase() {
        ' ' => &[0, 0, 0, 0, 0, 0, 0],
        'A' => &[0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => &[0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => &[0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => &[0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => &[0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => &[0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => &[0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => &[0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => &[0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => &[0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => &[0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => &[0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => &[0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => &[0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => &[0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => &[0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => &[0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => &[0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => &[0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => &[0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => &[0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => &[0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        '!' => &[0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        '?' => &[0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100],
        '-' => &[0, 0, 0, 0b11111, 0, 0, 0],
        '_' => &[0, 0, 0, 0, 0, 0, 0b11111],
        '\'' => &[0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        ':' => &[0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        '/' => &[0, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0],
        _ => return None,
    };
    Some(g)
}

/// [`TextRasterizer`] backed by the built-in face.
#[derive(Debug, Clone, Default)]
pub struct BitmapRasterizer {
    pub font: BitmapFont,
}

impl BitmapRasterizer {
    pub fn new(font: BitmapFont) -> Self {
        Self { font }
    }
}

impl TextRasterizer for BitmapRasterizer {
    fn rasterize(
        &mut self,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<(Raster, TextBounds), RasterError> {
        if width == 0 || height == 0 {
            return Ok((Raster::empty(), TextBounds::ZERO));
        }

        let font_size = font_size_for(width, height);
        let cell = self.font.cell_size(font_size);
        let text_w = self.font.measure(text, cell);
        let text_h = GLYPH_ROWS * cell;
        let ink = [self.font.ink[0], self.font.ink[1], self.font.ink[2], 255];

        let mut raster = Raster::new(width, height);
        let left = ((width as f32 - text_w as f32) / 2.0).round() as i64;
        let top = ((height as f32 - text_h as f32) / 2.0).round() as i64;
        let step = (self.font.advance() * cell) as i64;

        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyph(c) else { continue };
            let origin_x = left + i as i64 * step;
            for (ry, &bits) in rows.iter().enumerate() {
                let bits = u32::from(bits);
                for rx in 0..GLYPH_COLS {
                    if bits & (1u32 << (GLYPH_COLS - 1 - rx)) == 0 {
                        continue;
                    }
                    raster.fill_rect(
                        origin_x + (rx * cell) as i64,
                        top + (ry as u32 * cell) as i64,
                        cell,
                        cell,
                        ink,
                    );
                }
            }
        }

        // Height follows the canvas convention: the font size, not the glyph box.
        let bounds = TextBounds::centered(text_w as f32, font_size, width, height);
        Ok((raster, bounds))
    }
}
