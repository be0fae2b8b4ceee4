//! The worm variant: a creature steered by an external signal source,
//! wandering the viewport and eating food.

pub mod food;
pub mod signal;
pub mod worm;

pub use food::{FoodField, Interaction};
pub use signal::{SignalSnapshot, SignalSource, Stimuli};
pub use worm::Worm;

use glam::Vec2;

use crate::core::rng::Rng;
use crate::core::time::Interval;

/// Seconds without eating before a burst of food appears near the head.
pub const HUNGER_TIMEOUT: f32 = 5.0;
pub const HUNGER_BURST: usize = 10;
pub const INITIAL_FAR_FOOD: usize = 40;
pub const INITIAL_NEAR_FOOD: usize = 20;
/// Chance of a replacement spawn after eating.
pub const RESPAWN_CHANCE: f32 = 0.5;

pub struct Creature {
    worm: Worm,
    food: FoodField,
    signal: Option<Box<dyn SignalSource>>,
    rng: Rng,
    spawn_timer: Interval,
    since_eaten: f32,
    half: Vec2,
    warned_missing: bool,
}

impl Creature {
    /// New worm at the centre with the initial food scatter.
    pub fn new(width: u32, height: u32, mut rng: Rng) -> Self {
        let half = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        let worm = Worm::new(width, height);
        let mut food = FoodField::new();
        for _ in 0..INITIAL_FAR_FOOD {
            food.spawn(None, half, &mut rng);
        }
        for _ in 0..INITIAL_NEAR_FOOD {
            food.spawn(Some(worm.head()), half, &mut rng);
        }
        log::info!("creature spawned with {} food items", food.len());
        Self {
            worm,
            food,
            signal: None,
            rng,
            spawn_timer: Interval::new(food::SPAWN_INTERVAL),
            since_eaten: 0.0,
            half,
            warned_missing: false,
        }
    }

    /// Attach and initialise the signal source.
    pub fn attach_signal(&mut self, mut signal: Box<dyn SignalSource>) {
        signal.setup();
        self.signal = Some(signal);
        log::info!("creature signal source attached");
    }

    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }

    pub fn worm(&self) -> &Worm {
        &self.worm
    }

    pub fn food(&self) -> &FoodField {
        &self.food
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.half = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        self.food.clamp_into(self.half);
    }

    /// Drop food at a world position.
    pub fn on_click(&mut self, world: Vec2) {
        self.food.spawn_at(world, self.half);
    }

    /// One frame: timed spawns always run; the worm only moves with a signal source.
    pub fn tick(&mut self, dt: f32) {
        if self.spawn_timer.accumulate(dt) > 0 {
            self.food.spawn(None, self.half, &mut self.rng);
        }

        let Some(signal) = self.signal.as_mut() else {
            if !self.warned_missing {
                log::warn!("no signal source attached; worm stays still");
                self.warned_missing = true;
            }
            return;
        };
        signal.update();

        if dt.is_finite() && dt > 0.0 {
            self.since_eaten += dt;
        }
        if self.since_eaten > HUNGER_TIMEOUT {
            self.since_eaten = 0.0;
            let head = self.worm.head();
            for _ in 0..HUNGER_BURST {
                self.food.spawn(Some(head), self.half, &mut self.rng);
            }
        }

        let nose_touch = self.worm.bounce(self.half, &mut self.rng);
        let found = self.food.interact(self.worm.head());
        if found.eaten {
            self.since_eaten = 0.0;
            if self.rng.chance(RESPAWN_CHANCE) {
                self.food.spawn(None, self.half, &mut self.rng);
            }
        }

        let stimuli = Stimuli {
            nose_touch,
            food_sense: found.sensed,
            hunger: true,
        };
        signal.set_stimuli(stimuli);
        self.worm.steer(signal.poll(), stimuli);
        self.worm.advance(self.half);
    }
}
