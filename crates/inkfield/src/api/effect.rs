use glam::Vec2;

use crate::api::config::EffectConfig;
use crate::api::types::TextBounds;
use crate::bridge::protocol::FrameHeader;
use crate::core::field::ParticleField;
use crate::core::params::SimulationParams;
use crate::core::raster::{Raster, TextRasterizer};
use crate::core::rng::Rng;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::OrthoCamera;
use crate::renderer::traits::{Layer, RenderBackend};
use crate::systems::crossfade::Crossfade;
use crate::systems::marquee::{Marquee, MarqueeFrame};
use crate::systems::repulsion::ProximitySimulator;
use crate::systems::schedule::TextSchedule;
#[cfg(feature = "creature")]
use crate::creature::{Creature, SignalSource};

/// The whole effect: one owner for every piece of state.
///
/// The host drives it through event methods (`on_resize`, `on_pointer_move`,
/// ...) or an [`InputQueue`], calls [`TextEffect::tick`] once per animation
/// frame, then [`TextEffect::render`] to push the frame to a backend.
/// The title/favicon marquee runs on its own host timer through
/// [`TextEffect::marquee_update`], since animation frames stop in hidden tabs.
pub struct TextEffect<R: TextRasterizer> {
    config: EffectConfig,
    rasterizer: R,
    width: u32,
    height: u32,
    params: SimulationParams,
    camera: OrthoCamera,
    raster: Raster,
    bounds: TextBounds,
    field: ParticleField,
    simulator: ProximitySimulator,
    fade: Crossfade,
    /// World-space pointer. Infinite until the first move event.
    pointer: Vec2,
    hovering: bool,
    schedule: TextSchedule,
    marquee: Marquee,
    rng: Rng,
    #[cfg(feature = "creature")]
    creature: Option<Creature>,
    is_mobile: bool,
    /// Viewport, texture or colours changed since the last render.
    dirty: bool,
    generation: u32,
    frame: u64,
}

impl<R: TextRasterizer> TextEffect<R> {
    pub fn new(config: EffectConfig, rasterizer: R, width: u32, height: u32) -> Self {
        let mut rng = Rng::new(config.seed_or_default());
        let schedule = Self::make_schedule(&config, &mut rng);

        let mut effect = Self {
            simulator: ProximitySimulator::new(),
            marquee: Marquee::new(&config.marquee_text),
            rasterizer,
            width,
            height,
            params: SimulationParams::for_viewport(width, height),
            camera: OrthoCamera::new(width, height),
            raster: Raster::empty(),
            bounds: TextBounds::ZERO,
            field: ParticleField::new(),
            fade: Crossfade::new(),
            pointer: Vec2::splat(f32::INFINITY),
            hovering: false,
            schedule,
            rng,
            #[cfg(feature = "creature")]
            creature: None,
            is_mobile: false,
            dirty: true,
            generation: 0,
            frame: 0,
            config,
        };
        effect.sync_creature();
        effect.rebuild();
        log::info!(
            "effect ready: {}x{}, {} particles",
            width,
            height,
            effect.field.len()
        );
        effect
    }

    fn make_schedule(config: &EffectConfig, rng: &mut Rng) -> TextSchedule {
        TextSchedule::with_secret(
            config.text.as_str(),
            config.secret_phrases.as_slice(),
            config.secret_chance,
            config.secret_duration,
            rng,
        )
    }

    /// Create or drop the creature to match the config.
    #[cfg(feature = "creature")]
    fn sync_creature(&mut self) {
        match (self.config.enable_creature, self.creature.is_some()) {
            (true, false) => {
                let rng = self.rng.fork();
                self.creature = Some(Creature::new(self.width, self.height, rng));
            }
            (false, true) => self.creature = None,
            _ => {}
        }
    }

    #[cfg(not(feature = "creature"))]
    fn sync_creature(&mut self) {
        if self.config.enable_creature {
            log::warn!("creature requested but the `creature` feature is disabled");
        }
    }

    /// Re-derive parameters, re-rasterize and rebuild the field from scratch.
    fn rebuild(&mut self) {
        self.params = SimulationParams::for_viewport(self.width, self.height);
        self.camera.resize(self.width, self.height);

        let (raster, bounds) =
            match self.rasterizer.rasterize(self.schedule.current(), self.width, self.height) {
                Ok(out) => out,
                Err(e) => {
                    log::warn!("text rasterization failed, showing nothing: {}", e);
                    (Raster::empty(), TextBounds::ZERO)
                }
            };
        self.field = ParticleField::from_raster(&raster, self.config.use_color);
        self.raster = raster;
        self.bounds = bounds;
        self.generation = self.generation.wrapping_add(1);
        self.dirty = true;

        log::debug!(
            "rebuilt {:?} at {}x{}: {} particles, R={}, strength={}",
            self.schedule.current(),
            self.width,
            self.height,
            self.field.len(),
            self.params.radius,
            self.params.strength
        );
    }

    // ---- Event ports ----

    /// Viewport changed: full rebuild.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        #[cfg(feature = "creature")]
        if let Some(creature) = self.creature.as_mut() {
            creature.on_resize(width, height);
        }
        self.rebuild();
    }

    /// Pointer moved, in client pixels (top-left origin, y-down).
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = self.camera.client_to_world(x, y);
    }

    pub fn set_pointer_world(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Click in client pixels. Drops food when the creature is active.
    #[cfg(feature = "creature")]
    pub fn on_click(&mut self, x: f32, y: f32) {
        let world = self.camera.client_to_world(x, y);
        if let Some(creature) = self.creature.as_mut() {
            creature.on_click(world);
        }
    }

    #[cfg(not(feature = "creature"))]
    pub fn on_click(&mut self, _x: f32, _y: f32) {}

    pub fn on_visibility(&mut self, hidden: bool) {
        self.marquee.set_hidden(hidden);
    }

    /// Replace the main text and rebuild.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.config.text = text.clone();
        self.schedule.set_main(text);
        self.rebuild();
    }

    pub fn set_mobile(&mut self, is_mobile: bool) {
        if self.is_mobile != is_mobile {
            self.is_mobile = is_mobile;
            self.dirty = true;
        }
    }

    /// Host-measured advance of one favicon letter.
    pub fn set_marquee_letter_width(&mut self, width: f32) {
        self.marquee.set_letter_width(width);
    }

    /// Swap in a new configuration and rebuild.
    ///
    /// The text restarts on the new main text; no new secret is drawn.
    pub fn apply_config(&mut self, config: EffectConfig) {
        if config.marquee_text != self.config.marquee_text {
            let hidden = self.marquee.is_hidden();
            self.marquee = Marquee::new(&config.marquee_text);
            self.marquee.set_hidden(hidden);
        }
        self.schedule.set_main(config.text.as_str());
        self.config = config;
        self.sync_creature();
        self.rebuild();
        log::info!("config applied");
    }

    /// Hand the creature its signal source. Ignored when the creature is off.
    #[cfg(feature = "creature")]
    pub fn attach_signal(&mut self, signal: Box<dyn SignalSource>) {
        match self.creature.as_mut() {
            Some(creature) => creature.attach_signal(signal),
            None => log::debug!("signal source ignored: creature disabled"),
        }
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                self.on_pointer_move(x, y)
            }
            InputEvent::Click { x, y } => self.on_click(x, y),
            InputEvent::Resize { width, height } => {
                if (width, height) != (self.width, self.height) {
                    self.on_resize(width, height);
                }
            }
            InputEvent::Visibility { hidden } => self.on_visibility(hidden),
        }
    }

    // ---- Frame ----

    /// Advance one frame. Queued input is applied first, in order.
    pub fn tick(&mut self, dt: f32, input: &InputQueue) {
        for event in input.iter() {
            self.apply_input(*event);
        }

        if self.schedule.advance(dt) {
            log::info!("text reverted to {:?}", self.schedule.current());
            self.rebuild();
        }

        #[cfg(feature = "creature")]
        if let Some(creature) = self.creature.as_mut() {
            creature.tick(dt);
        }

        self.hovering = !self.field.is_empty()
            && self.bounds.contains_padded(self.pointer, self.params.padding());
        self.simulator
            .step(&mut self.field, self.pointer, self.hovering, &self.params);
        self.fade.update(self.hovering);
        self.frame += 1;
    }

    /// Push the current frame to `backend`. Rebuild data goes out only when it changed.
    pub fn render<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) {
        if self.dirty {
            backend.set_viewport_size(self.width, self.height);
            backend.set_projection(self.camera.uniform().projection);
            backend.update_text_layer(&self.raster);
            backend.update_colors(self.field.colors_flat());
            backend.set_point_size(self.point_size());
            self.dirty = false;
        }

        backend.update_positions(self.field.positions_flat());
        backend.set_layer_opacity(Layer::Text, self.fade.text_opacity());
        backend.set_layer_opacity(Layer::Particles, self.fade.particle_opacity());

        #[cfg(feature = "creature")]
        if let Some(creature) = self.creature.as_ref() {
            backend.update_creature(
                creature.worm().points_flat(),
                creature.food().positions_flat(),
            );
        }
    }

    /// Advance the title/favicon marquee one step. The host calls this every
    /// `MARQUEE_PERIOD`, visible or not.
    pub fn marquee_update(&mut self) -> MarqueeFrame {
        self.marquee.update()
    }

    /// Snapshot of the per-frame scalars for JS.
    pub fn header(&self) -> FrameHeader {
        #[cfg(feature = "creature")]
        let (worm_len, food_len) = self
            .creature
            .as_ref()
            .map_or((0, 0), |c| (c.worm().points().len(), c.food().len()));
        #[cfg(not(feature = "creature"))]
        let (worm_len, food_len) = (0usize, 0usize);

        FrameHeader {
            frame_counter: self.frame as f32,
            generation: self.generation as f32,
            particle_count: self.field.len() as f32,
            text_opacity: self.fade.text_opacity(),
            particle_opacity: self.fade.particle_opacity(),
            point_size: self.point_size(),
            viewport_width: self.width as f32,
            viewport_height: self.height as f32,
            hovering: if self.hovering { 1.0 } else { 0.0 },
            worm_len: worm_len as f32,
            food_len: food_len as f32,
            ..FrameHeader::new()
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn bounds(&self) -> TextBounds {
        self.bounds
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    pub fn fade(&self) -> &Crossfade {
        &self.fade
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn current_text(&self) -> &str {
        self.schedule.current()
    }

    pub fn point_size(&self) -> f32 {
        self.config.point_size_for(self.is_mobile)
    }

    /// Bumps on every rebuild.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[cfg(feature = "creature")]
    pub fn creature(&self) -> Option<&Creature> {
        self.creature.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::RasterError;
    use crate::renderer::traits::recording::RecordingBackend;
    use crate::systems::text::BitmapRasterizer;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> EffectConfig {
        EffectConfig::default()
            .with_text("zeo.lol")
            .with_secret_chance(0.0)
            .with_seed(1)
    }

    fn effect(width: u32, height: u32) -> TextEffect<BitmapRasterizer> {
        TextEffect::new(config(), BitmapRasterizer::default(), width, height)
    }

    fn idle(e: &mut TextEffect<BitmapRasterizer>, ticks: usize) {
        let q = InputQueue::new();
        for _ in 0..ticks {
            e.tick(DT, &q);
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut e = effect(800, 600);
        e.on_resize(800, 600);
        let first = e.field().clone();
        let first_bounds = e.bounds();
        e.on_resize(800, 600);
        assert!(!first.is_empty());
        assert_eq!(*e.field(), first);
        assert_eq!(e.bounds(), first_bounds);
    }

    #[test]
    fn fade_layers_always_sum_to_one() {
        let mut e = effect(800, 600);
        let q = InputQueue::new();
        for i in 0..300 {
            if (i / 25) % 2 == 0 {
                e.on_pointer_move(400.0, 300.0);
            } else {
                e.on_pointer_move(-5000.0, -5000.0);
            }
            e.tick(DT, &q);
            let sum = e.fade().text_opacity() + e.fade().particle_opacity();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn far_pointer_causes_no_drift() {
        let mut e = effect(800, 600);
        e.set_pointer_world(Vec2::new(1.0e5, 1.0e5));
        for _ in 0..600 {
            idle(&mut e, 1);
            assert!(e.field().max_displacement() < 1e-5);
        }
        assert!(!e.is_hovering());
    }

    #[test]
    fn sentinel_pointer_never_hovers() {
        let mut e = effect(800, 600);
        idle(&mut e, 10);
        assert!(!e.is_hovering());
        assert_eq!(e.fade().text_opacity(), 1.0);
    }

    #[test]
    fn pointer_over_text_displaces_within_strength() {
        let mut e = effect(800, 600);
        e.on_pointer_move(400.0, 300.0);
        idle(&mut e, 120);
        assert!(e.is_hovering());
        let d = e.field().max_displacement();
        assert!(d > 1.0);
        assert!(d <= e.params().strength + 1e-3);
        assert!(e.fade().particle_opacity() > 0.99);
    }

    #[test]
    fn relaxation_after_hover_is_monotonic() {
        let mut e = effect(800, 600);
        e.on_pointer_move(400.0, 300.0);
        idle(&mut e, 60);
        e.on_pointer_move(-1.0e5, -1.0e5);
        idle(&mut e, 1);
        assert!(!e.is_hovering());

        let mut last = e.field().max_displacement();
        for _ in 0..400 {
            idle(&mut e, 1);
            let d = e.field().max_displacement();
            assert!(d <= last + 1e-4);
            last = d;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn resize_rebuilds_for_smaller_viewport() {
        let mut e = effect(800, 600);
        assert!(!e.field().is_empty());
        e.on_resize(400, 300);
        assert!(e.bounds().width <= 400.0);
        assert!(!e.field().is_empty());
        assert_eq!(e.params().radius, 300.0 * 0.4);

        e.on_resize(0, 300);
        assert!(e.field().is_empty());
        assert_eq!(e.bounds(), TextBounds::ZERO);
        idle(&mut e, 5);

        e.on_resize(400, 0);
        assert!(e.field().is_empty());
    }

    #[test]
    fn square_viewport_is_landscape() {
        let mut e = effect(800, 600);
        e.on_resize(500, 500);
        assert_eq!(e.params().r_ratio, 0.4);
        assert_eq!(e.params().strength_ratio, 0.6);
        e.on_resize(500, 501);
        assert_eq!(e.params().r_ratio, 0.05);
    }

    #[test]
    fn queued_input_is_converted_to_world() {
        let mut e = effect(800, 600);
        let mut q = InputQueue::new();
        q.push(InputEvent::TouchMove { x: 500.0, y: 100.0 });
        e.tick(DT, &q);
        assert_eq!(e.pointer(), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn queued_resize_uses_new_viewport_for_later_moves() {
        let mut e = effect(800, 600);
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 400, height: 400 });
        q.push(InputEvent::PointerMove { x: 200.0, y: 200.0 });
        e.tick(DT, &q);
        assert_eq!(e.viewport(), (400, 400));
        assert_eq!(e.pointer(), Vec2::ZERO);
    }

    #[test]
    fn secret_phrase_reverts_and_rebuilds() {
        let cfg = config()
            .with_secret_phrases(["HI"])
            .with_secret_chance(1.0);
        let mut e = TextEffect::new(cfg, BitmapRasterizer::default(), 800, 600);
        assert_eq!(e.current_text(), "HI");
        let generation = e.generation();
        let secret_count = e.field().len();

        let q = InputQueue::new();
        e.tick(5.1, &q);
        assert_eq!(e.current_text(), "zeo.lol");
        assert_eq!(e.generation(), generation + 1);
        assert_ne!(e.field().len(), secret_count);
    }

    #[test]
    fn fixed_white_variant_ignores_colour() {
        let cfg = config().with_use_color(false);
        let font = crate::systems::text::BitmapFont::default().with_ink([255, 0, 0]);
        let rasterizer = BitmapRasterizer::new(font);
        let e = TextEffect::new(cfg, rasterizer, 800, 600);
        assert!(e.field().colors().iter().all(|c| *c == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn render_sends_rebuild_data_once() {
        let mut e = effect(800, 600);
        let mut backend = RecordingBackend::default();
        idle(&mut e, 1);
        e.render(&mut backend);
        e.render(&mut backend);
        assert_eq!(backend.viewport, Some((800, 600)));
        assert_eq!(backend.text_layer, Some((800, 600)));
        assert_eq!(backend.text_layer_uploads, 1);
        assert_eq!(backend.positions.len(), e.field().len() * 3);
        assert_eq!(backend.colors.len(), e.field().len() * 3);
        assert_eq!(backend.point_size, Some(1.0));

        e.on_resize(400, 300);
        e.render(&mut backend);
        assert_eq!(backend.text_layer_uploads, 2);
        assert_eq!(backend.viewport, Some((400, 300)));
    }

    #[test]
    fn mobile_switch_updates_point_size() {
        let cfg = config().with_point_size(1.0, 3.0);
        let mut e = TextEffect::new(cfg, BitmapRasterizer::default(), 800, 600);
        let mut backend = RecordingBackend::default();
        e.render(&mut backend);
        assert_eq!(backend.point_size, Some(1.0));
        e.set_mobile(true);
        e.render(&mut backend);
        assert_eq!(backend.point_size, Some(3.0));
        assert_eq!(e.header().point_size, 3.0);
    }

    #[test]
    fn marquee_runs_without_frames() {
        let mut e = effect(800, 600);
        assert_eq!(e.marquee_update().title, "zeo.lol       ");
        assert_eq!(e.frame(), 0);
    }

    #[test]
    fn hidden_page_marquee_scrolls_on_next_update() {
        let mut e = effect(800, 600);
        e.on_visibility(true);
        assert_eq!(e.marquee_update().title, "zeo.lol       ");
        assert_eq!(e.marquee_update().title, "eo.lol       z");
        e.on_visibility(false);
        // visible step is 0.3 characters
        assert_eq!(e.marquee_update().title, "o.lol       ze");
        assert_eq!(e.marquee_update().title, "o.lol       ze");
    }

    #[test]
    fn empty_field_never_hovers() {
        let mut e = effect(800, 600);
        e.on_resize(0, 300);
        assert!(e.field().is_empty());
        assert!(e.params().padding() > 0.0);
        e.set_pointer_world(Vec2::ZERO);
        idle(&mut e, 30);
        assert!(!e.is_hovering());
        assert_eq!(e.fade().text_opacity(), 1.0);
        assert_eq!(e.header().hovering, 0.0);
    }

    #[test]
    fn header_reflects_state() {
        let mut e = effect(800, 600);
        idle(&mut e, 3);
        let h = e.header();
        assert_eq!(h.frame_counter, 3.0);
        assert_eq!(h.particle_count, e.field().len() as f32);
        assert_eq!(h.viewport_width, 800.0);
        assert_eq!(h.hovering, 0.0);
        assert!((h.text_opacity + h.particle_opacity - 1.0).abs() < 1e-6);
    }

    struct BrokenRasterizer;

    impl TextRasterizer for BrokenRasterizer {
        fn rasterize(&mut self, _: &str, _: u32, _: u32) -> Result<(Raster, TextBounds), RasterError> {
            Err(RasterError::Backend("no 2d context".to_string()))
        }
    }

    #[test]
    fn rasterizer_failure_degrades_to_empty_field() {
        let mut e = TextEffect::new(config(), BrokenRasterizer, 800, 600);
        assert!(e.field().is_empty());
        e.set_pointer_world(Vec2::ZERO);
        let q = InputQueue::new();
        e.tick(DT, &q);
        let mut backend = RecordingBackend::default();
        e.render(&mut backend);
        assert!(backend.positions.is_empty());
    }

    #[test]
    fn apply_config_rebuilds_with_new_text() {
        let mut e = effect(800, 600);
        let before = e.field().len();
        e.apply_config(config().with_text("I"));
        assert_eq!(e.current_text(), "I");
        assert!(e.field().len() < before);
    }

    #[cfg(feature = "creature")]
    #[test]
    fn creature_variant_exposes_worm_and_food() {
        let cfg = config().with_creature(true);
        let mut e = TextEffect::new(cfg, BitmapRasterizer::default(), 800, 600);
        assert!(e.creature().is_some());
        let mut q = InputQueue::new();
        q.push(InputEvent::Click { x: 400.0, y: 300.0 });
        let food_before = e.creature().map(|c| c.food().len()).unwrap();
        e.tick(DT, &q);
        assert_eq!(e.creature().map(|c| c.food().len()).unwrap(), food_before + 1);

        let mut backend = RecordingBackend::default();
        e.render(&mut backend);
        assert_eq!(backend.worm.len(), crate::creature::worm::SEGMENTS * 2);
        assert_eq!(backend.food.len(), (food_before + 1) * 2);
        assert_eq!(e.header().worm_len, crate::creature::worm::SEGMENTS as f32);

        e.apply_config(config());
        assert!(e.creature().is_none());
    }
}
