/// Repeating interval driven by variable frame deltas.
///
/// Replaces host timers (`setInterval`) for work that runs on a fixed period
/// inside the frame loop, such as food spawning (3 s). Fires at most once per
/// call, so a long stall doesn't burst.
#[derive(Debug, Clone)]
pub struct Interval {
    /// Period in seconds.
    period: f32,
    /// Time carried over from previous frames.
    accumulator: f32,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns how many times the interval fired.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if self.period <= 0.0 || !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        let due = (self.accumulator / self.period) as u32;
        let fired = due.min(1);
        self.accumulator -= due as f32 * self.period;
        fired
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut iv = Interval::new(0.05);
        assert_eq!(iv.accumulate(0.03), 0);
        assert_eq!(iv.accumulate(0.03), 1);
        assert_eq!(iv.accumulate(0.03), 0);
    }

    #[test]
    fn stall_is_capped() {
        let mut iv = Interval::new(0.05);
        assert_eq!(iv.accumulate(10.0), 1);
        // overdue periods are dropped, not replayed
        assert_eq!(iv.accumulate(0.0), 0);
    }

    #[test]
    fn degenerate_inputs_never_fire() {
        let mut iv = Interval::new(0.0);
        assert_eq!(iv.accumulate(1.0), 0);
        let mut iv = Interval::new(1.0);
        assert_eq!(iv.accumulate(f32::NAN), 0);
        assert_eq!(iv.accumulate(-3.0), 0);
    }
}
