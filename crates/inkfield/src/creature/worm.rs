//! Kinematic worm: a steered head dragging a chain of points.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::signal::{SignalSnapshot, Stimuli};
use crate::core::rng::Rng;

pub const SEGMENTS: usize = 200;
/// Body radius in world units.
pub const RADIUS: f32 = 2.0;
/// Body length relative to the shorter viewport side at creation.
pub const LENGTH_RATIO: f32 = 0.6;
/// Max heading change per tick.
pub const MAX_TURN_RATE: f32 = PI / 60.0;
/// Distance from an edge at which the nose counts as touching it.
pub const BOUNDARY_THRESHOLD: f32 = 20.0;
pub const TURN_SENSITIVITY: f32 = 0.015;
/// Speed used when the signal source has no usable reading.
pub const DEFAULT_SPEED: f32 = 0.8;
pub const MIN_SPEED: f32 = 0.3;
pub const MAX_SPEED: f32 = 2.5;

const BOUNCE_DAMPING: f32 = -0.5;
const IK_STIFFNESS: f32 = 0.8;

/// Wrap an angle into [-π, π).
pub fn wrap_angle(a: f32) -> f32 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Clamp into `[-limit, limit]`; a non-positive limit collapses to 0.
pub(crate) fn clamp_symmetric(v: f32, limit: f32) -> f32 {
    if limit > 0.0 {
        v.clamp(-limit, limit)
    } else {
        0.0
    }
}

/// Speed for a valid reading.
pub fn speed_for(snapshot: &SignalSnapshot) -> f32 {
    (0.6 + snapshot.activity() / 150.0).clamp(MIN_SPEED, MAX_SPEED)
}

#[derive(Debug, Clone)]
pub struct Worm {
    /// Tail first, head last.
    points: Vec<Vec2>,
    position: Vec2,
    velocity: Vec2,
    direction: f32,
    target_direction: f32,
    speed: f32,
    segment_length: f32,
}

impl Worm {
    /// Vertical worm centred on the origin, sized for the viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let length = width.min(height) as f32 * LENGTH_RATIO;
        let points = (0..SEGMENTS)
            .map(|i| Vec2::new(0.0, (i as f32 / SEGMENTS as f32 - 0.5) * length))
            .collect();
        Self {
            points,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            direction: 0.0,
            target_direction: 0.0,
            speed: DEFAULT_SPEED,
            segment_length: length / SEGMENTS as f32,
        }
    }

    pub fn head(&self) -> Vec2 {
        self.points[SEGMENTS - 1]
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn points_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.points.as_slice())
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn target_direction(&self) -> f32 {
        self.target_direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Bounce off edges the head is near. Returns true on nose touch.
    ///
    /// Each axis moving toward its near edge has its velocity damped and
    /// reversed, and the heading snaps to a randomised direction within
    /// ±π/4 of the bounced velocity.
    pub fn bounce(&mut self, half: Vec2, rng: &mut Rng) -> bool {
        let head = self.head();
        let lo = -half + Vec2::splat(BOUNDARY_THRESHOLD);
        let hi = half - Vec2::splat(BOUNDARY_THRESHOLD);
        let touching = head.x < lo.x || head.x > hi.x || head.y < lo.y || head.y > hi.y;
        if !touching {
            return false;
        }

        if (head.x < lo.x && self.velocity.x < 0.0) || (head.x > hi.x && self.velocity.x > 0.0) {
            self.velocity.x *= BOUNCE_DAMPING;
            self.target_direction = self.bounced_heading(rng);
        }
        if (head.y < lo.y && self.velocity.y < 0.0) || (head.y > hi.y && self.velocity.y > 0.0) {
            self.velocity.y *= BOUNCE_DAMPING;
            self.target_direction = self.bounced_heading(rng);
        }
        self.direction = self.target_direction;
        true
    }

    fn bounced_heading(&self, rng: &mut Rng) -> f32 {
        self.velocity.y.atan2(self.velocity.x) + (rng.next_f32() - 0.5) * PI / 2.0
    }

    /// Turn toward the signal's muscle difference and pick a speed.
    pub fn steer(&mut self, snapshot: Option<SignalSnapshot>, stimuli: Stimuli) {
        match snapshot.filter(SignalSnapshot::is_valid) {
            Some(s) => {
                let mut sensitivity = TURN_SENSITIVITY;
                if stimuli.nose_touch {
                    sensitivity *= 2.0;
                }
                if stimuli.food_sense {
                    sensitivity *= 1.5;
                }
                self.target_direction += s.muscle_diff() * sensitivity;
                self.speed = speed_for(&s);
            }
            None => self.speed = DEFAULT_SPEED,
        }
    }

    /// Turn at most [`MAX_TURN_RATE`], move, clamp into the viewport and drag the body.
    pub fn advance(&mut self, half: Vec2) {
        let delta = wrap_angle(self.target_direction - self.direction);
        let delta = delta.clamp(-MAX_TURN_RATE, MAX_TURN_RATE);
        self.direction = wrap_angle(self.direction + delta);

        self.velocity = Vec2::from_angle(self.direction) * self.speed;
        self.position += self.velocity;
        self.position.x = clamp_symmetric(self.position.x, half.x - RADIUS);
        self.position.y = clamp_symmetric(self.position.y, half.y - RADIUS);

        if self.segment_length.is_nan() || self.segment_length <= 1e-6 {
            log::error!("invalid worm segment length {}", self.segment_length);
            return;
        }

        self.points[SEGMENTS - 1] = self.position;
        for i in (0..SEGMENTS - 1).rev() {
            let next = self.points[i + 1];
            let current = self.points[i];
            let desired = next + (current - next).normalize_or_zero() * self.segment_length;
            self.points[i] = current.lerp(desired, IK_STIFFNESS);
        }
    }
}
