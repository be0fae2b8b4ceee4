use inkfield::{
    EffectConfig, FrameHeader, InputEvent, InputQueue, TextEffect, TextRasterizer,
    MarqueeFrame,
};

use crate::backend::SharedBackend;

/// Generic effect runner that wires the effect to its shared buffers.
///
/// Each page variant (e.g., `zeo-lol`) creates a `thread_local!` EffectRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct EffectRunner<R: TextRasterizer> {
    effect: TextEffect<R>,
    input: InputQueue,
    backend: SharedBackend,
    header: FrameHeader,
}

impl<R: TextRasterizer> EffectRunner<R> {
    pub fn new(config: EffectConfig, rasterizer: R, width: u32, height: u32) -> Self {
        let mut runner = Self {
            effect: TextEffect::new(config, rasterizer, width, height),
            input: InputQueue::new(),
            backend: SharedBackend::new(),
            header: FrameHeader::new(),
        };
        runner.publish();
        runner
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply input, simulate, publish buffers.
    pub fn tick(&mut self, dt: f32) {
        self.effect.tick(dt, &self.input);

        // Drain input after update
        self.input.drain();

        self.publish();
    }

    /// Apply a resize right away so no frame sees stale buffers.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.effect.on_resize(width, height);
        self.publish();
    }

    pub fn set_mobile(&mut self, is_mobile: bool) {
        self.effect.set_mobile(is_mobile);
        self.publish();
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.effect.on_visibility(hidden);
    }

    pub fn set_marquee_letter_width(&mut self, width: f32) {
        self.effect.set_marquee_letter_width(width);
    }

    /// Replace the configuration from JSON. A bad document keeps the current one.
    pub fn load_config(&mut self, json: &str) {
        match EffectConfig::from_json(json) {
            Ok(config) => {
                self.effect.apply_config(config);
                self.publish();
            }
            Err(e) => log::warn!("ignoring config: {}", e),
        }
    }

    #[cfg(feature = "creature")]
    pub fn attach_signal(&mut self, signal: Box<dyn inkfield::SignalSource>) {
        self.effect.attach_signal(signal);
    }

    fn publish(&mut self) {
        self.effect.render(&mut self.backend);
        self.header = self.effect.header();
    }

    /// One marquee step, driven by the host's 50 ms timer rather than by frames.
    pub fn marquee_update(&mut self) -> MarqueeFrame {
        self.effect.marquee_update()
    }

    pub fn effect(&self) -> &TextEffect<R> {
        &self.effect
    }

    pub fn backend(&self) -> &SharedBackend {
        &self.backend
    }

    // ---- Pointer accessors for JS reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_floats().as_ptr()
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.backend.positions_ptr()
    }

    pub fn colors_ptr(&self) -> *const f32 {
        self.backend.colors_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.effect.field().len() as u32
    }

    pub fn raster_ptr(&self) -> *const u8 {
        self.backend.raster_ptr()
    }

    pub fn raster_len(&self) -> u32 {
        self.backend.raster_len()
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.backend.projection_ptr()
    }

    pub fn creature_ptr(&self) -> *const f32 {
        self.backend.worm_ptr()
    }

    /// Worm points (2 floats each).
    pub fn creature_len(&self) -> u32 {
        self.backend.worm_len() / 2
    }

    pub fn food_ptr(&self) -> *const f32 {
        self.backend.food_ptr()
    }

    /// Food items (2 floats each).
    pub fn food_len(&self) -> u32 {
        self.backend.food_len() / 2
    }

    pub fn text_opacity(&self) -> f32 {
        self.backend.text_opacity()
    }

    pub fn particle_opacity(&self) -> f32 {
        self.backend.particle_opacity()
    }

    pub fn point_size(&self) -> f32 {
        self.backend.point_size()
    }

    pub fn generation(&self) -> u32 {
        self.effect.generation()
    }

    pub fn is_hovering(&self) -> bool {
        self.effect.is_hovering()
    }
}
