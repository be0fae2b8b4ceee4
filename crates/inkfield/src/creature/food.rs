//! Food pellets: spawning, sensing and eating.

use glam::Vec2;

use super::worm::{clamp_symmetric, RADIUS as WORM_RADIUS};
use crate::core::rng::Rng;

pub const MAX_FOOD: usize = 200;
/// Seconds between timed spawns.
pub const SPAWN_INTERVAL: f32 = 3.0;
pub const FOOD_RADIUS: f32 = 5.0;
/// Distance at which the head senses food.
pub const SENSE_RADIUS: f32 = 60.0;
/// Distance at which the head eats food (before adding the body radius).
pub const EAT_RADIUS: f32 = 15.0;
/// Half-extent of the square around the head used for near spawns.
pub const NEAR_SPAWN_RANGE: f32 = SENSE_RADIUS * 4.0;
/// Fraction of each viewport side kept clear by far spawns.
pub const SPAWN_MARGIN: f32 = 0.1;

/// What the head found this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub sensed: bool,
    pub eaten: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FoodField {
    items: Vec<Vec2>,
}

impl FoodField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Vec2] {
        &self.items
    }

    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.items.as_slice())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop food at `pos`, pulled inside the viewport. Ignores the cap.
    pub fn spawn_at(&mut self, pos: Vec2, half: Vec2) {
        self.items.push(Self::clamp_to(pos, half));
    }

    /// Spawn one item near `head` (when given) or anywhere inside the margin.
    ///
    /// Nothing happens at the cap, and portrait viewports skip half of all
    /// spawns. Returns whether an item was added.
    pub fn spawn(&mut self, head: Option<Vec2>, half: Vec2, rng: &mut Rng) -> bool {
        if self.items.len() >= MAX_FOOD {
            return false;
        }
        if half.y > half.x && rng.chance(0.5) {
            return false;
        }
        let target = match head {
            Some(h) => Vec2::new(
                h.x + rng.range(-NEAR_SPAWN_RANGE, NEAR_SPAWN_RANGE),
                h.y + rng.range(-NEAR_SPAWN_RANGE, NEAR_SPAWN_RANGE),
            ),
            None => {
                let inner = half * (1.0 - 2.0 * SPAWN_MARGIN);
                Vec2::new(rng.range(-inner.x, inner.x), rng.range(-inner.y, inner.y))
            }
        };
        self.spawn_at(target, half);
        true
    }

    /// Sense food near `head` and eat at most one item.
    pub fn interact(&mut self, head: Vec2) -> Interaction {
        let mut result = Interaction::default();
        for i in (0..self.items.len()).rev() {
            let d = head.distance(self.items[i]);
            if d < SENSE_RADIUS {
                result.sensed = true;
                if d < EAT_RADIUS + WORM_RADIUS {
                    self.items.remove(i);
                    result.eaten = true;
                    break;
                }
            }
        }
        result
    }

    /// Pull every item back inside a resized viewport.
    pub fn clamp_into(&mut self, half: Vec2) {
        for item in &mut self.items {
            *item = Self::clamp_to(*item, half);
        }
    }

    fn clamp_to(pos: Vec2, half: Vec2) -> Vec2 {
        let margin = FOOD_RADIUS * 2.0;
        Vec2::new(
            clamp_symmetric(pos.x, half.x - margin),
            clamp_symmetric(pos.y, half.y - margin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape() -> Vec2 {
        Vec2::new(400.0, 300.0)
    }

    #[test]
    fn spawn_at_clamps_inside_margin() {
        let mut f = FoodField::new();
        f.spawn_at(Vec2::new(1000.0, -1000.0), landscape());
        assert_eq!(f.items()[0], Vec2::new(390.0, -290.0));
    }

    #[test]
    fn far_spawns_respect_margin() {
        let mut f = FoodField::new();
        let mut rng = Rng::new(9);
        for _ in 0..100 {
            assert!(f.spawn(None, landscape(), &mut rng));
        }
        for p in f.items() {
            assert!(p.x.abs() <= 320.0 && p.y.abs() <= 240.0, "{:?}", p);
        }
    }

    #[test]
    fn near_spawns_surround_head() {
        let mut f = FoodField::new();
        let mut rng = Rng::new(9);
        let head = Vec2::new(50.0, 20.0);
        for _ in 0..50 {
            f.spawn(Some(head), landscape(), &mut rng);
        }
        for p in f.items() {
            assert!((p.x - head.x).abs() <= NEAR_SPAWN_RANGE);
            assert!((p.y - head.y).abs() <= NEAR_SPAWN_RANGE);
        }
    }

    #[test]
    fn spawn_stops_at_cap() {
        let mut f = FoodField::new();
        let mut rng = Rng::new(1);
        for _ in 0..MAX_FOOD + 20 {
            f.spawn(None, landscape(), &mut rng);
        }
        assert_eq!(f.len(), MAX_FOOD);
    }

    #[test]
    fn portrait_skips_some_spawns() {
        let mut f = FoodField::new();
        let mut rng = Rng::new(5);
        let added = (0..100)
            .filter(|_| f.spawn(None, Vec2::new(200.0, 400.0), &mut rng))
            .count();
        assert!(added > 20 && added < 80, "added {}", added);
    }

    #[test]
    fn senses_without_eating_between_radii() {
        let mut f = FoodField::new();
        f.spawn_at(Vec2::new(40.0, 0.0), landscape());
        let r = f.interact(Vec2::ZERO);
        assert_eq!(r, Interaction { sensed: true, eaten: false });
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn eats_one_item_per_call() {
        let mut f = FoodField::new();
        f.spawn_at(Vec2::new(5.0, 0.0), landscape());
        f.spawn_at(Vec2::new(-5.0, 0.0), landscape());
        let r = f.interact(Vec2::ZERO);
        assert!(r.eaten && r.sensed);
        assert_eq!(f.len(), 1);
        assert!(f.interact(Vec2::ZERO).eaten);
        assert!(f.is_empty());
        assert_eq!(f.interact(Vec2::ZERO), Interaction::default());
    }

    #[test]
    fn resize_pulls_items_inside() {
        let mut f = FoodField::new();
        f.spawn_at(Vec2::new(300.0, 200.0), landscape());
        f.clamp_into(Vec2::new(100.0, 100.0));
        assert_eq!(f.items()[0], Vec2::new(90.0, 90.0));
        assert_eq!(f.positions_flat(), &[90.0, 90.0]);
    }
}
