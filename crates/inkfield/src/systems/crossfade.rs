//! Cross-fade between the solid-text layer and the particle layer.
//!
//! A single scalar eases toward 0 while hovering and 1 otherwise. The text
//! layer shows `fade`, the particles show `1 - fade`, so the pair always sums
//! to one.

use crate::extensions::easing::approach;

/// Fraction of the remaining gap closed per tick.
pub const FADE_GAIN: f32 = 0.2;

/// One cross-fade tick: ease `previous` toward 0 (hovering) or 1.
#[inline]
pub fn update_fade(hovering: bool, previous: f32) -> f32 {
    let target = if hovering { 0.0 } else { 1.0 };
    approach(previous, target, FADE_GAIN)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossfade {
    value: f32,
}

impl Crossfade {
    /// Starts fully on the solid text.
    pub fn new() -> Self {
        Self { value: 1.0 }
    }

    /// Advance one tick and return the new fade value.
    pub fn update(&mut self, hovering: bool) -> f32 {
        self.value = update_fade(hovering, self.value);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn text_opacity(&self) -> f32 {
        self.value
    }

    pub fn particle_opacity(&self) -> f32 {
        1.0 - self.value
    }
}

impl Default for Crossfade {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_text() {
        let f = Crossfade::new();
        assert_eq!(f.text_opacity(), 1.0);
        assert_eq!(f.particle_opacity(), 0.0);
    }

    #[test]
    fn single_step_values() {
        assert!((update_fade(true, 1.0) - 0.8).abs() < 1e-6);
        assert!((update_fade(false, 0.0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn opacities_always_sum_to_one() {
        let mut f = Crossfade::new();
        for i in 0..200 {
            let hovering = (i / 17) % 2 == 0;
            f.update(hovering);
            let sum = f.text_opacity() + f.particle_opacity();
            assert!((sum - 1.0).abs() < 1e-6, "sum was {}", sum);
            assert!((0.0..=1.0).contains(&f.value()));
        }
    }

    #[test]
    fn converges_toward_target() {
        let mut f = Crossfade::new();
        for _ in 0..100 {
            f.update(true);
        }
        assert!(f.value() < 1e-6);
        for _ in 0..100 {
            f.update(false);
        }
        assert!((f.value() - 1.0).abs() < 1e-6);
    }
}
