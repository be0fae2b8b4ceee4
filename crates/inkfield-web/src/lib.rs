pub mod backend;
#[cfg(feature = "creature")]
pub mod brain;
pub mod canvas;
pub mod dom;
pub mod runner;

pub use inkfield;
pub use backend::SharedBackend;
pub use canvas::CanvasRasterizer;
pub use runner::EffectRunner;

/// Seed drawn from `Math.random()`, so each page load differs.
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

/// Hand the page's `BRAIN` to the runner when the creature is enabled.
///
/// A missing `BRAIN` is not an error: the worm simply stays still.
#[cfg(feature = "creature")]
pub fn attach_page_signal<R: inkfield::TextRasterizer>(runner: &mut EffectRunner<R>) {
    if !runner.effect().config().enable_creature {
        return;
    }
    match brain::JsSignalSource::detect() {
        Some(source) => runner.attach_signal(Box::new(source)),
        None => log::warn!("BRAIN not defined - connectome script may not be loaded"),
    }
}

#[cfg(not(feature = "creature"))]
pub fn attach_page_signal<R: inkfield::TextRasterizer>(_runner: &mut EffectRunner<R>) {}

/// Generate all `#[wasm_bindgen]` exports for a page variant.
///
/// Generates:
/// - `thread_local!` storage for the EffectRunner and the marquee painter
/// - `with_runner()` helper function, `None` until `effect_init` succeeds
/// - All wasm-bindgen exports (effect_init, effect_tick, effect_marquee_tick,
///   input handlers, data accessors)
///
/// Before a successful `effect_init` every export is a no-op that returns
/// null or zero, so a page without a usable canvas keeps running.
///
/// The host calls `effect_tick(dt)` from `requestAnimationFrame` and
/// `effect_marquee_tick()` from `setInterval` every `get_marquee_period_ms()`,
/// which keeps the title and favicon moving in background tabs.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod variant;
///
/// inkfield_web::export_effect!(variant::config(), "zeo-lol");
/// ```
///
/// # Arguments
///
/// - `$config`: An expression evaluating to `inkfield::EffectConfig`
/// - `$name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_effect {
    ($config:expr, $name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::EffectRunner<$crate::CanvasRasterizer>>> = RefCell::new(None);
            static PAINTER: RefCell<Option<$crate::dom::MarqueePainter>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::EffectRunner<$crate::CanvasRasterizer>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        #[wasm_bindgen]
        pub fn effect_init(width: u32, height: u32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let rasterizer = match $crate::CanvasRasterizer::new() {
                Ok(r) => r,
                Err(e) => {
                    log::error!("{}: cannot rasterize text: {}", $name, e);
                    return;
                }
            };
            let mut config: $crate::inkfield::EffectConfig = $config;
            if config.seed.is_none() {
                config.seed = Some($crate::random_seed());
            }
            let mut runner = $crate::EffectRunner::new(config, rasterizer, width, height);
            runner.set_mobile($crate::dom::detect_mobile());
            runner.set_hidden($crate::dom::is_hidden());
            $crate::attach_page_signal(&mut runner);

            match $crate::dom::MarqueePainter::new() {
                Ok(painter) => {
                    runner.set_marquee_letter_width(painter.letter_width());
                    PAINTER.with(|cell| *cell.borrow_mut() = Some(painter));
                }
                Err(e) => log::warn!("{}: favicon disabled: {}", $name, e),
            }

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            log::info!("{}: initialized", $name);
        }

        #[wasm_bindgen]
        pub fn effect_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn effect_marquee_tick() {
            if let Some(frame) = with_runner(|r| r.marquee_update()) {
                PAINTER.with(|cell| {
                    if let Some(painter) = cell.borrow().as_ref() {
                        if let Err(e) = painter.paint(&frame) {
                            log::warn!("{}: marquee paint failed: {}", $name, e);
                        }
                    }
                });
            }
        }

        #[wasm_bindgen]
        pub fn effect_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::inkfield::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn effect_touch_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::inkfield::InputEvent::TouchMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn effect_click(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::inkfield::InputEvent::Click { x, y }));
        }

        #[wasm_bindgen]
        pub fn effect_resize(width: u32, height: u32) {
            with_runner(|r| {
                r.resize(width, height);
                r.set_mobile($crate::dom::detect_mobile());
            });
        }

        #[wasm_bindgen]
        pub fn effect_visibility(hidden: bool) {
            with_runner(|r| r.set_hidden(hidden));
        }

        #[wasm_bindgen]
        pub fn effect_load_config(json: &str) {
            with_runner(|r| r.load_config(json));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_marquee_period_ms() -> u32 {
            ($crate::inkfield::MARQUEE_PERIOD * 1000.0).round() as u32
        }

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_positions_ptr() -> *const f32 {
            with_runner(|r| r.positions_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_colors_ptr() -> *const f32 {
            with_runner(|r| r.colors_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_particle_count() -> u32 {
            with_runner(|r| r.particle_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_text_opacity() -> f32 {
            with_runner(|r| r.text_opacity()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_particle_opacity() -> f32 {
            with_runner(|r| r.particle_opacity()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_point_size() -> f32 {
            with_runner(|r| r.point_size()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_generation() -> u32 {
            with_runner(|r| r.generation()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_projection_ptr() -> *const f32 {
            with_runner(|r| r.projection_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_raster_ptr() -> *const u8 {
            with_runner(|r| r.raster_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_raster_len() -> u32 {
            with_runner(|r| r.raster_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_creature_ptr() -> *const f32 {
            with_runner(|r| r.creature_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_creature_len() -> u32 {
            with_runner(|r| r.creature_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_food_ptr() -> *const f32 {
            with_runner(|r| r.food_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_food_len() -> u32 {
            with_runner(|r| r.food_len()).unwrap_or(0)
        }
    };
}
