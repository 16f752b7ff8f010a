//! The player avatar

use glam::Vec2;
use rand::RngCore;

use super::draw::{Surface, palette};
use super::entity::{Entity, World};
use super::particle::ParticlePool;
use super::projectile::{Projectile, Team};
use crate::clamp_inside;
use crate::consts::*;

/// Particles emitted per bandage use and per damage event
const HEAL_PARTICLES: usize = 10;
const DAMAGE_PARTICLES: usize = 5;
const PLAYER_PARTICLE_SPREAD: f32 = 5.0;

/// The player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub bandages: u32,
    /// None until the first shot
    pub last_shot_ms: Option<f64>,
    /// Gun angle (radians), follows the aim
    pub facing: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            bandages: PLAYER_START_BANDAGES,
            last_shot_ms: None,
            facing: 0.0,
        }
    }

    /// Spend a bandage if one is available and the player is hurt
    ///
    /// Returns true when a bandage was used.
    pub fn use_bandage(&mut self, particles: &mut ParticlePool, rng: &mut dyn RngCore) -> bool {
        if self.bandages == 0 || !self.is_hurt() {
            return false;
        }
        self.bandages -= 1;
        self.health = (self.health + BANDAGE_HEAL).min(self.max_health);
        particles.burst(
            rng,
            self.pos,
            palette::HEAL,
            HEAL_PARTICLES,
            PLAYER_PARTICLE_SPREAD,
        );
        true
    }

    /// Lose `amount` health, never below zero
    ///
    /// Returns true when health is zero afterwards.
    pub fn take_damage(
        &mut self,
        amount: u32,
        particles: &mut ParticlePool,
        rng: &mut dyn RngCore,
    ) -> bool {
        self.health = self.health.saturating_sub(amount);
        particles.burst(
            rng,
            self.pos,
            palette::BLOOD,
            DAMAGE_PARTICLES,
            PLAYER_PARTICLE_SPREAD,
        );
        self.health == 0
    }

    /// Fire toward `target` unless the cooldown is still running
    pub fn try_fire(&mut self, target: Vec2, now_ms: f64) -> Option<Projectile> {
        if let Some(last) = self.last_shot_ms {
            if now_ms - last <= FIRE_COOLDOWN_MS {
                return None;
            }
        }
        self.last_shot_ms = Some(now_ms);
        Some(Projectile::new(self.pos, target, Team::Friendly))
    }

    pub fn is_hurt(&self) -> bool {
        self.health < self.max_health
    }
}

impl Entity for Player {
    fn update(&mut self, world: &World<'_>) {
        let input = world.input;
        let mut dir = input.movement;

        // Keyboard diagonals would otherwise move ~1.41x faster
        if !input.movement_from_stick && dir.x != 0.0 && dir.y != 0.0 {
            dir = dir.normalize();
        }
        self.pos += dir * self.speed;
        self.pos = clamp_inside(self.pos, world.bounds, self.radius);

        self.facing = input.aim.angle_from(self.pos);
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, palette::PLAYER);
        surface.fill_rotated_rect(
            self.pos,
            self.facing,
            Vec2::new(0.0, -GUN_WIDTH / 2.0),
            Vec2::new(GUN_LENGTH, GUN_WIDTH),
            palette::GUN,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{Aim, TickInput};
    use crate::sim::rng::FixedRng;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn step(player: &mut Player, input: &TickInput) {
        player.update(&World {
            input,
            bounds: BOUNDS,
            player_pos: player.pos,
        });
    }

    #[test]
    fn test_keyboard_diagonal_is_normalized() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let input = TickInput {
            movement: Vec2::new(1.0, -1.0),
            ..Default::default()
        };
        step(&mut player, &input);
        let moved = player.pos - Vec2::new(400.0, 300.0);
        assert!((moved.length() - PLAYER_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_stick_movement_is_not_renormalized() {
        let mut player = Player::new(Vec2::new(400.0, 300.0));
        let input = TickInput {
            movement: Vec2::new(0.3, 0.4),
            movement_from_stick: true,
            ..Default::default()
        };
        step(&mut player, &input);
        assert!((player.pos - Vec2::new(401.5, 302.0)).length() < 1e-4);
    }

    #[test]
    fn test_clamped_to_bounds() {
        let mut player = Player::new(Vec2::new(22.0, 598.0));
        let input = TickInput {
            movement: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        step(&mut player, &input);
        assert_eq!(player.pos, Vec2::new(PLAYER_RADIUS, BOUNDS.y - PLAYER_RADIUS));
    }

    #[test]
    fn test_facing_follows_aim() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let input = TickInput {
            aim: Aim::Pointer(Vec2::new(100.0, 200.0)),
            ..Default::default()
        };
        step(&mut player, &input);
        assert!((player.facing - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let input = TickInput {
            aim: Aim::Stick(Vec2::new(-1.0, 0.0)),
            ..Default::default()
        };
        step(&mut player, &input);
        assert!((player.facing.abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_use_bandage() {
        let mut particles = ParticlePool::new(256);
        let mut player = Player::new(Vec2::ZERO);

        // Full health: no-op
        assert!(!player.use_bandage(&mut particles, &mut FixedRng::LOW));
        assert_eq!(player.bandages, PLAYER_START_BANDAGES);
        assert!(particles.is_empty());

        player.health = 90;
        assert!(player.use_bandage(&mut particles, &mut FixedRng::LOW));
        assert_eq!(player.health, 100, "heal is capped at max");
        assert_eq!(player.bandages, 1);
        assert_eq!(particles.len(), HEAL_PARTICLES);

        player.health = 40;
        assert!(player.use_bandage(&mut particles, &mut FixedRng::LOW));
        assert_eq!(player.health, 65);
        assert_eq!(player.bandages, 0);

        // Out of bandages: no-op
        player.health = 10;
        assert!(!player.use_bandage(&mut particles, &mut FixedRng::LOW));
        assert_eq!(player.health, 10);
        assert_eq!(player.bandages, 0);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut particles = ParticlePool::new(256);
        let mut player = Player::new(Vec2::ZERO);
        assert!(!player.take_damage(30, &mut particles, &mut FixedRng::LOW));
        assert_eq!(player.health, 70);
        assert_eq!(particles.len(), DAMAGE_PARTICLES);

        assert!(player.take_damage(500, &mut particles, &mut FixedRng::LOW));
        assert_eq!(player.health, 0);
        assert_eq!(particles.len(), 2 * DAMAGE_PARTICLES);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        let target = Vec2::new(200.0, 100.0);
        assert!(player.try_fire(target, 0.0).is_some());
        assert!(player.try_fire(target, 150.0).is_none());
        assert!(player.try_fire(target, 200.0).is_none());
        assert!(player.try_fire(target, 210.0).is_some());
        assert_eq!(player.last_shot_ms, Some(210.0));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Damage(u32),
        Heal,
        Pickup,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..60).prop_map(Op::Damage),
            Just(Op::Heal),
            Just(Op::Pickup),
        ]
    }

    proptest! {
        #[test]
        fn health_and_bandages_stay_in_range(ops in prop::collection::vec(op(), 0..64)) {
            let mut particles = ParticlePool::new(64);
            let mut player = Player::new(Vec2::ZERO);
            for op in ops {
                let before = player.clone();
                match op {
                    Op::Damage(amount) => {
                        player.take_damage(amount, &mut particles, &mut FixedRng::HIGH);
                    }
                    Op::Heal => {
                        if player.use_bandage(&mut particles, &mut FixedRng::HIGH) {
                            prop_assert_eq!(player.bandages, before.bandages - 1);
                            prop_assert_eq!(
                                player.health - before.health,
                                BANDAGE_HEAL.min(before.max_health - before.health)
                            );
                        } else {
                            prop_assert_eq!(&player, &before);
                        }
                    }
                    Op::Pickup => player.bandages += 1,
                }
                prop_assert!(player.health <= player.max_health);
            }
        }
    }
}
