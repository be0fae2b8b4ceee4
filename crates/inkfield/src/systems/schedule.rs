//! Which string the effect shows right now.
//!
//! Normally the main text. On start-up a secret phrase may take its place
//! for a few seconds; when it reverts, the effect rebuilds its particles.

use crate::core::rng::Rng;

/// Default pool of secret phrases.
pub const SECRET_PHRASES: &[&str] = &[
    "lol.zeo",
    "meow",
    "🐱",
    "🐶",
    "🐕",
    "🐈",
    "owo.whats.this",
    "rawr.xd",
    "💀👍",
    "👽🛸",
    "🦖🌋",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TextSchedule {
    main: String,
    current: String,
    /// Seconds until `current` reverts to `main`.
    revert_in: Option<f32>,
}

impl TextSchedule {
    /// Always show `main`.
    pub fn fixed(main: impl Into<String>) -> Self {
        let main = main.into();
        Self {
            current: main.clone(),
            main,
            revert_in: None,
        }
    }

    /// With probability `chance`, start on a random phrase that reverts to
    /// `main` after `duration` seconds.
    pub fn with_secret<S: AsRef<str>>(
        main: impl Into<String>,
        phrases: &[S],
        chance: f32,
        duration: f32,
        rng: &mut Rng,
    ) -> Self {
        let mut schedule = Self::fixed(main);
        if phrases.is_empty() || !rng.chance(chance) {
            return schedule;
        }
        let pick = rng.next_int(phrases.len() as u32) as usize;
        schedule.current = phrases[pick].as_ref().to_string();
        schedule.revert_in = Some(duration.max(0.0));
        log::info!("showing secret phrase {:?} for {}s", schedule.current, duration);
        schedule
    }

    /// Text to rasterize.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn main(&self) -> &str {
        &self.main
    }

    /// Replace the main text (and cancel any pending secret).
    pub fn set_main(&mut self, main: impl Into<String>) {
        self.main = main.into();
        self.current = self.main.clone();
        self.revert_in = None;
    }

    pub fn is_secret(&self) -> bool {
        self.revert_in.is_some()
    }

    /// Advance the clock. Returns true when the displayed text changed.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.revert_in.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }
        self.revert_in = None;
        let changed = self.current != self.main;
        self.current = self.main.clone();
        changed
    }
}
