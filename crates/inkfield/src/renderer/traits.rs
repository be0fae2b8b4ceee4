//! Render backend seam.
//!
//! The effect never draws. Each frame it pushes state into a [`RenderBackend`]:
//! the browser bridge copies it into buffers JS reads, tests record it.

use crate::core::raster::Raster;

/// The two cross-faded layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The solid-text plane textured with the current raster.
    Text,
    /// The point cloud.
    Particles,
}

/// Receiver of per-frame render state.
///
/// Slices are flat `f32` views: positions and colours carry 3 floats per
/// particle, creature points and food items 2 floats each.
pub trait RenderBackend {
    /// Viewport changed (also sent once after init).
    fn set_viewport_size(&mut self, width: u32, height: u32);

    /// Column-major projection matrix for the current viewport.
    fn set_projection(&mut self, projection: [[f32; 4]; 4]);

    /// New texture for the solid-text plane. Sent after every rebuild.
    fn update_text_layer(&mut self, raster: &Raster);

    /// Per-particle colours. Sent after every rebuild.
    fn update_colors(&mut self, colors: &[f32]);

    /// Current particle positions. Sent every frame.
    fn update_positions(&mut self, positions: &[f32]);

    fn set_layer_opacity(&mut self, layer: Layer, opacity: f32);

    fn set_point_size(&mut self, size: f32);

    /// Worm body and food positions.
    fn update_creature(&mut self, _worm: &[f32], _food: &[f32]) {}
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Backend that remembers the last value of everything it was sent.
    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        pub viewport: Option<(u32, u32)>,
        pub projection: Option<[[f32; 4]; 4]>,
        pub text_layer: Option<(u32, u32)>,
        pub text_layer_uploads: usize,
        pub colors: Vec<f32>,
        pub positions: Vec<f32>,
        pub text_opacity: Option<f32>,
        pub particle_opacity: Option<f32>,
        pub point_size: Option<f32>,
        pub worm: Vec<f32>,
        pub food: Vec<f32>,
    }

    impl RenderBackend for RecordingBackend {
        fn set_viewport_size(&mut self, width: u32, height: u32) {
            self.viewport = Some((width, height));
        }

        fn set_projection(&mut self, projection: [[f32; 4]; 4]) {
            self.projection = Some(projection);
        }

        fn update_text_layer(&mut self, raster: &Raster) {
            self.text_layer = Some((raster.width(), raster.height()));
            self.text_layer_uploads += 1;
        }

        fn update_colors(&mut self, colors: &[f32]) {
            self.colors = colors.to_vec();
        }

        fn update_positions(&mut self, positions: &[f32]) {
            self.positions = positions.to_vec();
        }

        fn set_layer_opacity(&mut self, layer: Layer, opacity: f32) {
            match layer {
                Layer::Text => self.text_opacity = Some(opacity),
                Layer::Particles => self.particle_opacity = Some(opacity),
            }
        }

        fn set_point_size(&mut self, size: f32) {
            self.point_size = Some(size);
        }

        fn update_creature(&mut self, worm: &[f32], food: &[f32]) {
            self.worm = worm.to_vec();
            self.food = food.to_vec();
        }
    }
}
