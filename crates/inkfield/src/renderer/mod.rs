pub mod camera;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{OrthoCamera, CameraUniform};
pub use traits::{RenderBackend, Layer};
