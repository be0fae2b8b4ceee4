// extensions/mod.rs
//
// Small stateless helpers shared by the systems.
// No dependencies on the particle field or the effect controller. Just math.

pub mod easing;

pub use easing::{lerp, lerp_vec2, approach, approach_vec2};
