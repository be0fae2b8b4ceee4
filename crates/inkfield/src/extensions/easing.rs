// extensions/easing.rs
//
// Fixed-gain exponential easing: `x += (target - x) * gain`, applied once per tick.
// Converges geometrically toward the target and never overshoots for gain in (0, 1).

use glam::Vec2;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Move `current` a fixed fraction `gain` of the way toward `target`.
///
/// This is one tick of an exponential low-pass filter. After `n` ticks the
/// remaining distance is `(1 - gain)^n` of the initial gap.
#[inline]
pub fn approach(current: f32, target: f32, gain: f32) -> f32 {
    lerp(current, target, gain)
}

/// Per-axis [`approach`] for 2D positions.
#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, gain: f32) -> Vec2 {
    lerp_vec2(current, target, gain)
}
