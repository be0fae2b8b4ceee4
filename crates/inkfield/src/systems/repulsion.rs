//! Proximity force simulator: the per-frame O(N) pass over the particle field.
//!
//! Each particle eases toward a target: its rest position pushed radially
//! away from the pointer while hovering, or the rest position itself.

use glam::Vec2;

use crate::core::field::{ParticleField, REST_Z};
use crate::core::params::SimulationParams;
use crate::extensions::easing::approach_vec2;

/// Fraction of the remaining gap closed per tick.
pub const EASE_GAIN: f32 = 0.1;

/// Where a particle resting at `rest` wants to be, given the pointer.
///
/// Inside the radius (`0 < d < R`) the push is `strength * (1 - d/R)` along
/// `rest - pointer`. A pointer exactly on the rest point, or anywhere at or
/// beyond `R`, exerts no force.
#[inline]
pub fn repelled_target(rest: Vec2, pointer: Vec2, params: &SimulationParams) -> Vec2 {
    let offset = rest - pointer;
    let d = offset.length();
    if d > 0.0 && d < params.radius {
        let direction = offset / d;
        let force = (1.0 - d / params.radius) * params.strength;
        rest + direction * force
    } else {
        rest
    }
}

/// Sole writer of the field's current positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximitySimulator;

impl ProximitySimulator {
    pub fn new() -> Self {
        Self
    }

    /// Advance every particle one tick. A zero-length field is a no-op.
    ///
    /// Without hover every particle eases back to rest on every call, so the
    /// field always returns to its text shape.
    pub fn step(
        &self,
        field: &mut ParticleField,
        pointer: Vec2,
        hovering: bool,
        params: &SimulationParams,
    ) {
        let (rest, current) = field.rest_and_current_mut();
        for (r, c) in rest.iter().zip(current.iter_mut()) {
            let rest_xy = r.truncate();
            let target = if hovering {
                repelled_target(rest_xy, pointer, params)
            } else {
                rest_xy
            };
            let next = approach_vec2(c.truncate(), target, EASE_GAIN);
            *c = next.extend(REST_Z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::Raster;

    fn params() -> SimulationParams {
        SimulationParams::for_viewport(800, 600) // R = 240, strength = 360
    }

    fn block_field() -> ParticleField {
        let mut r = Raster::new(40, 40);
        r.fill_rect(10, 10, 20, 20, [255, 255, 255, 255]);
        ParticleField::from_raster(&r, true)
    }

    #[test]
    fn target_is_rest_outside_radius() {
        let p = params();
        let rest = Vec2::new(0.0, 0.0);
        assert_eq!(repelled_target(rest, Vec2::new(300.0, 0.0), &p), rest);
        assert_eq!(repelled_target(rest, Vec2::new(240.0, 0.0), &p), rest);
    }

    #[test]
    fn coincident_pointer_exerts_no_force() {
        let p = params();
        let rest = Vec2::new(5.0, 5.0);
        let t = repelled_target(rest, rest, &p);
        assert_eq!(t, rest);
        assert!(t.is_finite());
    }

    #[test]
    fn push_points_away_and_decays_linearly() {
        let p = params();
        let rest = Vec2::new(0.0, 0.0);
        // pointer at half the radius to the left → push right by strength / 2
        let t = repelled_target(rest, Vec2::new(-120.0, 0.0), &p);
        assert!((t.x - 180.0).abs() < 1e-3, "got {:?}", t);
        assert!(t.y.abs() < 1e-6);
    }

    #[test]
    fn push_never_exceeds_strength() {
        let p = params();
        let rest = Vec2::ZERO;
        for i in 1..2400 {
            let d = i as f32 * 0.1;
            let t = repelled_target(rest, Vec2::new(d, 0.0), &p);
            assert!(t.length() <= p.strength + 1e-3);
        }
        let near = repelled_target(rest, Vec2::new(1e-3, 0.0), &p);
        assert!((near.length() - p.strength).abs() < 0.01);
    }

    #[test]
    fn step_eases_by_fixed_gain_and_pins_z() {
        let p = params();
        let mut field = block_field();
        let sim = ProximitySimulator::new();
        let pointer = Vec2::new(-20.0, 10.0);
        let before = field.particle(0).unwrap();
        let target = repelled_target(before.rest.truncate(), pointer, &p);

        sim.step(&mut field, pointer, true, &p);

        let after = field.particle(0).unwrap();
        let expected = before.current.truncate() + (target - before.current.truncate()) * 0.1;
        assert!((after.current.truncate() - expected).length() < 1e-4);
        assert_eq!(after.current.z, REST_Z);
    }

    #[test]
    fn at_rest_with_far_pointer_has_no_drift() {
        let p = params();
        let mut field = block_field();
        let sim = ProximitySimulator::new();
        for _ in 0..1000 {
            sim.step(&mut field, Vec2::new(1.0e6, 1.0e6), false, &p);
            assert!(field.max_displacement() < 1e-5);
        }
    }

    #[test]
    fn relaxation_is_monotonic_after_hover_ends() {
        let p = params();
        let mut field = block_field();
        let sim = ProximitySimulator::new();
        for _ in 0..60 {
            sim.step(&mut field, Vec2::new(0.0, 0.0), true, &p);
        }
        let mut last = field.max_displacement();
        assert!(last > 1.0, "hover should displace the field");

        for _ in 0..400 {
            sim.step(&mut field, Vec2::splat(f32::INFINITY), false, &p);
            let d = field.max_displacement();
            assert!(d <= last + 1e-4, "displacement grew: {} -> {}", last, d);
            last = d;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn empty_field_is_noop() {
        let mut field = ParticleField::new();
        let sim = ProximitySimulator::new();
        sim.step(&mut field, Vec2::ZERO, true, &params());
        assert!(field.is_empty());
    }
}
