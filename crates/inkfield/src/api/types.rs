use glam::Vec2;

/// Bounding box of the rendered string, recomputed with every raster rebuild.
///
/// `x`/`y` are the top-left corner in raster pixels (top-left origin, y-down).
/// Because the text is always centered, hit testing works on the centered box
/// `[-width/2, width/2] × [-height/2, height/2]` in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl TextBounds {
    /// Zero-sized bounds, used for degenerate viewports.
    pub const ZERO: Self = Self { width: 0.0, height: 0.0, x: 0.0, y: 0.0 };

    /// Bounds of a `width × height` box centered in a `viewport_w × viewport_h` raster.
    pub fn centered(width: f32, height: f32, viewport_w: u32, viewport_h: u32) -> Self {
        Self {
            width,
            height,
            x: viewport_w as f32 / 2.0 - width / 2.0,
            y: viewport_h as f32 / 2.0 - height / 2.0,
        }
    }

    /// Hover test: is the world-space point inside the centered box grown by `padding`?
    ///
    /// Non-finite pointers (the "no input yet" sentinel) never hit.
    pub fn contains_padded(&self, point: Vec2, padding: f32) -> bool {
        let half_w = self.width / 2.0 + padding;
        let half_h = self.height / 2.0 + padding;
        point.x >= -half_w && point.x <= half_w && point.y >= -half_h && point.y <= half_h
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_records_top_left_corner() {
        let b = TextBounds::centered(200.0, 100.0, 800, 600);
        assert_eq!(b.x, 300.0);
        assert_eq!(b.y, 250.0);
    }

    #[test]
    fn contains_padded_grows_box() {
        let b = TextBounds::centered(200.0, 100.0, 800, 600);
        assert!(b.contains_padded(Vec2::new(0.0, 0.0), 0.0));
        assert!(!b.contains_padded(Vec2::new(120.0, 0.0), 0.0));
        assert!(b.contains_padded(Vec2::new(120.0, 0.0), 20.0));
        assert!(b.contains_padded(Vec2::new(-120.0, -70.0), 20.0));
    }

    #[test]
    fn infinite_sentinel_never_hovers() {
        let b = TextBounds::centered(200.0, 100.0, 800, 600);
        assert!(!b.contains_padded(Vec2::splat(f32::INFINITY), 1.0e6));
        assert!(!b.contains_padded(Vec2::splat(f32::NAN), 1.0e6));
    }

    #[test]
    fn zero_bounds_are_empty() {
        assert!(TextBounds::ZERO.is_empty());
    }
}
