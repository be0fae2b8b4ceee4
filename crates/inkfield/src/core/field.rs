//! Particle field: one particle per ink pixel of the text raster.
//!
//! Stored as a struct-of-arrays so the per-frame update walks two flat
//! position buffers (rest, current) and the renderer can read the current
//! positions as a contiguous `[f32]` without copying.

use glam::{Vec2, Vec3};

use super::raster::{Raster, BYTES_PER_PIXEL};

/// Constant forward z offset for every particle. Orders the point layer in
/// front of the text plane; not a physical depth.
pub const REST_Z: f32 = 0.1;

/// Snapshot of a single particle (copied out of the field).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub rest: Vec3,
    pub current: Vec3,
    pub color: [f32; 3],
}

/// The particle batch built from one raster snapshot.
///
/// Created in one go by [`ParticleField::from_raster`] and replaced wholesale
/// on rebuild; particles are never added or removed individually.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    rest: Vec<Vec3>,
    current: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
}

/// Is this RGBA pixel part of the glyphs? Fully opaque and not pure black.
#[inline]
pub fn is_ink(rgba: [u8; 4]) -> bool {
    rgba[3] == 255 && (rgba[0] > 0 || rgba[1] > 0 || rgba[2] > 0)
}

/// Raster pixel (origin top-left, y-down) to world (origin center, y-up).
#[inline]
pub fn raster_to_world(px: u32, py: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        px as f32 - width as f32 / 2.0,
        height as f32 / 2.0 - py as f32,
    )
}

impl ParticleField {
    /// An empty field (zero particles).
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the raster row-major and emit a particle per ink pixel.
    ///
    /// With `use_color` the particle takes the pixel's normalized RGB;
    /// otherwise every particle is white.
    pub fn from_raster(raster: &Raster, use_color: bool) -> Self {
        let mut field = Self::new();
        if raster.is_empty() {
            return field;
        }

        let (w, h) = (raster.width(), raster.height());
        for (i, px) in raster.pixels().chunks_exact(BYTES_PER_PIXEL).enumerate() {
            let rgba = [px[0], px[1], px[2], px[3]];
            if !is_ink(rgba) {
                continue;
            }
            let x = (i % w as usize) as u32;
            let y = (i / w as usize) as u32;
            let pos = raster_to_world(x, y, w, h).extend(REST_Z);
            let color = if use_color {
                [
                    rgba[0] as f32 / 255.0,
                    rgba[1] as f32 / 255.0,
                    rgba[2] as f32 / 255.0,
                ]
            } else {
                [1.0, 1.0, 1.0]
            };
            field.rest.push(pos);
            field.current.push(pos);
            field.colors.push(color);
        }
        field
    }

    pub fn len(&self) -> usize {
        self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Copy out particle `i`.
    pub fn particle(&self, i: usize) -> Option<Particle> {
        Some(Particle {
            rest: *self.rest.get(i)?,
            current: *self.current.get(i)?,
            color: *self.colors.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        self.rest
            .iter()
            .zip(&self.current)
            .zip(&self.colors)
            .map(|((&rest, &current), &color)| Particle { rest, current, color })
    }

    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Current positions as a flat `[x, y, z, x, y, z, ...]` buffer.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.current.as_slice())
    }

    /// Colours as a flat `[r, g, b, r, g, b, ...]` buffer.
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.colors.as_slice())
    }

    /// Rest positions (read) and current positions (write), for the simulator.
    pub(crate) fn rest_and_current_mut(&mut self) -> (&[Vec3], &mut [Vec3]) {
        (&self.rest, &mut self.current)
    }

    /// Largest `|current.xy - rest.xy|` across the field (0 for an empty field).
    pub fn max_displacement(&self) -> f32 {
        self.rest
            .iter()
            .zip(&self.current)
            .map(|(r, c)| r.truncate().distance(c.truncate()))
            .fold(0.0, f32::max)
    }
}
