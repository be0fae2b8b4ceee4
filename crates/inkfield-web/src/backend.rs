use inkfield::{Layer, Raster, RenderBackend};

/// Render backend that copies every frame into buffers JS reads through
/// pointer/length exports.
#[derive(Debug, Default)]
pub struct SharedBackend {
    positions: Vec<f32>,
    colors: Vec<f32>,
    raster: Vec<u8>,
    raster_size: (u32, u32),
    worm: Vec<f32>,
    food: Vec<f32>,
    viewport: (u32, u32),
    projection: [[f32; 4]; 4],
    text_opacity: f32,
    particle_opacity: f32,
    point_size: f32,
}

impl SharedBackend {
    pub fn new() -> Self {
        Self {
            text_opacity: 1.0,
            point_size: 1.0,
            ..Self::default()
        }
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn positions_len(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.colors.as_ptr()
    }

    pub fn colors_len(&self) -> u32 {
        self.colors.len() as u32
    }

    pub fn raster_ptr(&self) -> *const u8 {
        self.raster.as_ptr()
    }

    pub fn raster_len(&self) -> u32 {
        self.raster.len() as u32
    }

    pub fn raster_size(&self) -> (u32, u32) {
        self.raster_size
    }

    pub fn worm_ptr(&self) -> *const f32 {
        self.worm.as_ptr()
    }

    pub fn worm_len(&self) -> u32 {
        self.worm.len() as u32
    }

    pub fn food_ptr(&self) -> *const f32 {
        self.food.as_ptr()
    }

    pub fn food_len(&self) -> u32 {
        self.food.len() as u32
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.projection.as_ptr() as *const f32
    }

    pub fn text_opacity(&self) -> f32 {
        self.text_opacity
    }

    pub fn particle_opacity(&self) -> f32 {
        self.particle_opacity
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }
}

fn copy_into<T: Copy>(dst: &mut Vec<T>, src: &[T]) {
    dst.clear();
    dst.extend_from_slice(src);
}

impl RenderBackend for SharedBackend {
    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn set_projection(&mut self, projection: [[f32; 4]; 4]) {
        self.projection = projection;
    }

    fn update_text_layer(&mut self, raster: &Raster) {
        copy_into(&mut self.raster, raster.pixels());
        self.raster_size = (raster.width(), raster.height());
    }

    fn update_colors(&mut self, colors: &[f32]) {
        copy_into(&mut self.colors, colors);
    }

    fn update_positions(&mut self, positions: &[f32]) {
        copy_into(&mut self.positions, positions);
    }

    fn set_layer_opacity(&mut self, layer: Layer, opacity: f32) {
        match layer {
            Layer::Text => self.text_opacity = opacity,
            Layer::Particles => self.particle_opacity = opacity,
        }
    }

    fn set_point_size(&mut self, size: f32) {
        self.point_size = size;
    }

    fn update_creature(&mut self, worm: &[f32], food: &[f32]) {
        copy_into(&mut self.worm, worm);
        copy_into(&mut self.food, food);
    }
}
