pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
#[cfg(feature = "creature")]
pub mod creature;

// Re-export key types at crate root for convenience
pub use api::effect::TextEffect;
pub use api::config::{EffectConfig, ConfigError};
pub use api::types::TextBounds;
pub use core::raster::{Raster, RasterError, TextRasterizer, font_size_for};
pub use core::field::{ParticleField, Particle, REST_Z};
pub use core::params::{SimulationParams, Orientation};
pub use core::rng::Rng;
pub use core::time::Interval;
pub use systems::repulsion::{ProximitySimulator, repelled_target, EASE_GAIN};
pub use systems::crossfade::{Crossfade, update_fade, FADE_GAIN};
pub use systems::text::{BitmapRasterizer, BitmapFont};
pub use systems::marquee::{
    Marquee, MarqueeFrame, TitleMarquee, FaviconMarquee, FaviconFrame,
    LetterPlacement, GradientStop, FAVICON_SIZE, MARQUEE_PERIOD,
};
pub use systems::schedule::{TextSchedule, SECRET_PHRASES};
pub use renderer::camera::{OrthoCamera, CameraUniform};
pub use renderer::traits::{RenderBackend, Layer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{FrameHeader, PROTOCOL_VERSION};

#[cfg(feature = "creature")]
pub use creature::{
    Creature, SignalSource, SignalSnapshot, Stimuli,
    Worm, FoodField,
};

// Extensions: small math helpers shared by the systems
pub use extensions::{lerp, lerp_vec2, approach, approach_vec2};
