use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Near plane of the effect's projection.
pub const NEAR: f32 = 1.0;
/// Far plane of the effect's projection.
pub const FAR: f32 = 1000.0;

/// Orthographic camera centered on the world origin.
/// One world unit is one CSS pixel; the visible area is `[-W/2, W/2] × [-H/2, H/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

impl OrthoCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            near: NEAR,
            far: FAR,
        }
    }

    /// Build an orthographic projection matrix.
    /// Origin at center, Y-up.
    pub fn projection_matrix(&self) -> Mat4 {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Resize the camera to a new viewport. No aspect fitting: world units stay pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }

    /// Convert client coordinates (top-left origin, y-down) to world space.
    pub fn client_to_world(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x - self.width / 2.0, self.height / 2.0 - y)
    }
}
