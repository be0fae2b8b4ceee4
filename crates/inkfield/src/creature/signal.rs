//! Seam to the external neural-signal source that steers the worm.

/// Stimulus flags pushed to the source each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stimuli {
    /// Head is within the boundary threshold of an edge.
    pub nose_touch: bool,
    /// Some food item is within sensing range of the head.
    pub food_sense: bool,
    pub hunger: bool,
}

/// Left/right muscle accumulators read back from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSnapshot {
    pub accum_left: f32,
    pub accum_right: f32,
}

impl SignalSnapshot {
    pub fn new(accum_left: f32, accum_right: f32) -> Self {
        Self { accum_left, accum_right }
    }

    /// NaN or infinite accumulators are unusable; the worm falls back to its default speed.
    pub fn is_valid(&self) -> bool {
        self.accum_left.is_finite() && self.accum_right.is_finite()
    }

    /// Steering input: positive turns left.
    pub fn muscle_diff(&self) -> f32 {
        self.accum_left - self.accum_right
    }

    /// Sum of absolute muscle activity.
    pub fn activity(&self) -> f32 {
        self.accum_left.abs() + self.accum_right.abs()
    }
}

/// A polled neural simulation.
///
/// The creature calls `update` once per tick before reading, pushes the
/// stimuli it observed during the tick with `set_stimuli`, and reads the
/// accumulators with `poll`. What the source does internally is its own
/// business.
pub trait SignalSource {
    /// One-time initialisation (seed and excite the network).
    fn setup(&mut self) {}

    /// Advance the simulation one step.
    fn update(&mut self);

    fn set_stimuli(&mut self, stimuli: Stimuli);

    /// Current accumulators, or `None` when the source has nothing to report.
    fn poll(&self) -> Option<SignalSnapshot>;
}
