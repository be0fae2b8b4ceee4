//! Off-screen RGBA text raster and the rasterizer seam.
//!
//! The effect never draws text itself: a [`TextRasterizer`] (browser canvas,
//! or the built-in bitmap face for native builds and tests) fills a
//! [`Raster`] at viewport resolution and reports the text's bounding box.

use crate::api::types::TextBounds;

/// Bytes per pixel (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// Largest font size in pixels, whatever the viewport.
pub const MAX_FONT_SIZE: f32 = 120.0;

/// Errors that can occur while producing a raster.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Pixel buffer does not match `width × height × 4`.
    #[error("raster buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    /// The drawing backend (e.g. a 2D canvas context) was unavailable or failed.
    #[error("text backend failed: {0}")]
    Backend(String),
}

/// An RGBA8 image, row-major, origin top-left, y-down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Allocate a raster filled with opaque black (the "no ink" background).
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let pixels = [0u8, 0, 0, 255].repeat(len);
        Self { width, height, pixels }
    }

    /// A 0×0 raster. Produces no particles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap pixels produced elsewhere (e.g. `getImageData`).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RasterError::SizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Fill an axis-aligned rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, rgba: [u8; 4]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i64).min(self.width as i64);
        let y1 = (y + h as i64).min(self.height as i64);
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                let i = (row + px as usize) * BYTES_PER_PIXEL;
                self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
            }
        }
    }
}

/// Draws a string into an off-screen raster at viewport resolution.
///
/// Contract shared by all implementations:
/// - font size is [`font_size_for`]`(width, height)`;
/// - background is fully opaque black, ink is any non-black colour;
/// - text is centered on both axes;
/// - a zero-width or zero-height viewport yields [`Raster::empty`] and
///   [`TextBounds::ZERO`].
///
/// Must be a pure function of `(text, width, height)` so rebuilds are repeatable.
pub trait TextRasterizer {
    fn rasterize(
        &mut self,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<(Raster, TextBounds), RasterError>;
}

/// Font size for a viewport: `min(W/6, H/4, 120)`.
pub fn font_size_for(width: u32, height: u32) -> f32 {
    (width as f32 / 6.0).min(height as f32 / 4.0).min(MAX_FONT_SIZE)
}
