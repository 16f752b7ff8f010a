//! Enemies: spawn outside an edge, chase the player, shoot on a timer

use glam::Vec2;
use rand::RngCore;

use super::draw::{Surface, palette};
use super::entity::{Entity, World};
use super::projectile::{Projectile, Team};
use super::rng;
use crate::consts::*;
use crate::direction_to;

/// An enemy entity
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick, fixed for the enemy's life
    pub speed: f32,
    pub health: i32,
    pub last_shot_ms: f64,
    pub shoot_interval_ms: f64,
    pub marked_for_deletion: bool,
}

impl Enemy {
    /// Spawn just outside a random edge of the viewport
    pub fn spawn(rng: &mut dyn RngCore, bounds: Vec2, now_ms: f64) -> Self {
        let pos = if rng::chance(rng, 0.5) {
            let x = if rng::chance(rng, 0.5) {
                -ENEMY_SPAWN_MARGIN
            } else {
                bounds.x + ENEMY_SPAWN_MARGIN
            };
            Vec2::new(x, rng::unit(rng) * bounds.y)
        } else {
            let x = rng::unit(rng) * bounds.x;
            let y = if rng::chance(rng, 0.5) {
                -ENEMY_SPAWN_MARGIN
            } else {
                bounds.y + ENEMY_SPAWN_MARGIN
            };
            Vec2::new(x, y)
        };

        let speed = rng::range(rng, ENEMY_MIN_SPEED, ENEMY_SPEED_SPREAD);
        let shoot_interval_ms =
            ENEMY_SHOT_INTERVAL_MIN_MS + rng::unit(rng) as f64 * ENEMY_SHOT_INTERVAL_SPREAD_MS;

        Self::new(pos, speed, shoot_interval_ms, now_ms)
    }

    pub fn new(pos: Vec2, speed: f32, shoot_interval_ms: f64, now_ms: f64) -> Self {
        Self {
            pos,
            radius: ENEMY_RADIUS,
            speed,
            health: ENEMY_HEALTH,
            last_shot_ms: now_ms,
            shoot_interval_ms,
            marked_for_deletion: false,
        }
    }

    /// Fire at `target` if the shot interval has elapsed
    pub fn try_fire(&mut self, target: Vec2, now_ms: f64) -> Option<Projectile> {
        if now_ms - self.last_shot_ms > self.shoot_interval_ms {
            self.last_shot_ms = now_ms;
            Some(Projectile::new(self.pos, target, Team::Hostile))
        } else {
            None
        }
    }

    /// Apply a hit; returns true when this hit killed the enemy
    pub fn hit(&mut self, damage: u32) -> bool {
        self.health -= damage as i32;
        if self.health <= 0 {
            self.marked_for_deletion = true;
            true
        } else {
            false
        }
    }
}

impl Entity for Enemy {
    /// Step straight at the player's current position
    fn update(&mut self, world: &World<'_>) {
        self.pos += direction_to(self.pos, world.player_pos) * self.speed;
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, palette::ENEMY);
    }

    fn is_expired(&self) -> bool {
        self.marked_for_deletion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::TickInput;
    use crate::sim::rng::{FixedRng, seeded};

    #[test]
    fn test_spawn_outside_an_edge() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut rng = seeded(3);
        for _ in 0..200 {
            let e = Enemy::spawn(rng.as_mut(), bounds, 0.0);
            let on_vertical_edge = (e.pos.x == -ENEMY_SPAWN_MARGIN
                || e.pos.x == bounds.x + ENEMY_SPAWN_MARGIN)
                && (0.0..bounds.y).contains(&e.pos.y);
            let on_horizontal_edge = (e.pos.y == -ENEMY_SPAWN_MARGIN
                || e.pos.y == bounds.y + ENEMY_SPAWN_MARGIN)
                && (0.0..bounds.x).contains(&e.pos.x);
            assert!(on_vertical_edge || on_horizontal_edge, "bad spawn {:?}", e.pos);
            assert!((1.0..2.0).contains(&e.speed));
            assert!((2000.0..4000.0).contains(&e.shoot_interval_ms));
            assert_eq!(e.health, ENEMY_HEALTH);
        }
    }

    #[test]
    fn test_spawn_low_draws_left_edge() {
        let e = Enemy::spawn(&mut FixedRng::LOW, Vec2::new(800.0, 600.0), 5.0);
        assert_eq!(e.pos, Vec2::new(-ENEMY_SPAWN_MARGIN, 0.0));
        assert_eq!(e.speed, 1.0);
        assert_eq!(e.shoot_interval_ms, 2000.0);
        assert_eq!(e.last_shot_ms, 5.0);
    }

    #[test]
    fn test_spawn_high_draws_stay_below_max_speed() {
        let bounds = Vec2::new(800.0, 600.0);
        let e = Enemy::spawn(&mut FixedRng::HIGH, bounds, 0.0);
        assert!(e.speed < ENEMY_MIN_SPEED + ENEMY_SPEED_SPREAD, "speed {}", e.speed);
        assert!(e.speed > 1.999);
        assert!(e.shoot_interval_ms < 4000.0);
        // Bottom edge, right end
        assert_eq!(e.pos.y, bounds.y + ENEMY_SPAWN_MARGIN);
        assert!(e.pos.x < bounds.x);
    }

    #[test]
    fn test_pursues_player() {
        let input = TickInput::default();
        let mut e = Enemy::new(Vec2::new(0.0, 0.0), 2.0, 3000.0, 0.0);
        let mut world = World {
            input: &input,
            bounds: Vec2::new(800.0, 600.0),
            player_pos: Vec2::new(100.0, 0.0),
        };
        e.update(&world);
        assert!((e.pos - Vec2::new(2.0, 0.0)).length() < 1e-5);

        // Re-aims every tick
        world.player_pos = Vec2::new(2.0, 50.0);
        e.update(&world);
        assert!((e.pos - Vec2::new(2.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_fire_interval() {
        let mut e = Enemy::new(Vec2::ZERO, 1.0, 2500.0, 1000.0);
        assert!(e.try_fire(Vec2::new(10.0, 0.0), 3500.0).is_none(), "needs strictly more");
        let shot = e.try_fire(Vec2::new(10.0, 0.0), 3501.0).expect("interval elapsed");
        assert_eq!(shot.team, Team::Hostile);
        assert_eq!(shot.vel, Vec2::new(PROJECTILE_SPEED, 0.0));
        assert_eq!(e.last_shot_ms, 3501.0);
        assert!(e.try_fire(Vec2::new(10.0, 0.0), 4000.0).is_none());
    }

    #[test]
    fn test_three_hits_kill() {
        let mut e = Enemy::new(Vec2::ZERO, 1.0, 2500.0, 0.0);
        assert!(!e.hit(10));
        assert!(!e.hit(10));
        assert!(e.hit(10));
        assert_eq!(e.health, 0);
        assert!(e.is_expired());
    }
}
