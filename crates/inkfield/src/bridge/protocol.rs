/// Per-frame header shared with JS.
/// Must stay in sync with the page script that reads it.
///
/// Layout (all values f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// ```
/// Bulk data (positions, colours, raster, worm, food) lives in separate
/// buffers exposed through ptr/len accessors; the header carries their
/// counts and a generation that bumps on every rebuild so JS knows when to
/// re-upload colours and the text texture.

use bytemuck::{Pod, Zeroable};

/// Number of floats in the header.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_GENERATION: usize = 2;
pub const HEADER_PARTICLE_COUNT: usize = 3;
pub const HEADER_TEXT_OPACITY: usize = 4;
pub const HEADER_PARTICLE_OPACITY: usize = 5;
pub const HEADER_POINT_SIZE: usize = 6;
pub const HEADER_VIEWPORT_WIDTH: usize = 7;
pub const HEADER_VIEWPORT_HEIGHT: usize = 8;
pub const HEADER_HOVERING: usize = 9;
pub const HEADER_WORM_LEN: usize = 10;
pub const HEADER_FOOD_LEN: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per particle position or colour (wire format, fixed).
pub const PARTICLE_FLOATS: usize = 3;

/// Floats per worm point or food item: x, y (wire format, fixed).
pub const POINT_FLOATS: usize = 2;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub protocol_version: f32,
    pub frame_counter: f32,
    pub generation: f32,
    pub particle_count: f32,
    pub text_opacity: f32,
    pub particle_opacity: f32,
    pub point_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// 1.0 while the pointer is over the text.
    pub hovering: f32,
    /// Worm points (not floats).
    pub worm_len: f32,
    /// Food items (not floats).
    pub food_len: f32,
}

impl FrameHeader {
    pub fn new() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            text_opacity: 1.0,
            ..Self::zeroed()
        }
    }

    /// Flat view in header-index order.
    pub fn as_floats(&self) -> &[f32; HEADER_FLOATS] {
        bytemuck::cast_ref(self)
    }
}

impl Default for FrameHeader {
    fn default() -> Self {
        Self::new()
    }
}
