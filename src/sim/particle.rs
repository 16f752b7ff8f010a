//! Decorative particles: friction, drift and fade-out

use glam::Vec2;
use rand::RngCore;

use super::draw::{Rgba, Surface, with_alpha};
use super::entity::{Entity, World};
use super::rng;
use crate::consts::*;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    /// 1.0 at birth, removed once it reaches 0
    pub opacity: f32,
    pub friction: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Rgba) -> Self {
        Self {
            pos,
            vel,
            color,
            opacity: 1.0,
            friction: PARTICLE_FRICTION,
        }
    }

    /// One tick of decay, usable without a world
    pub fn step(&mut self) {
        self.vel *= self.friction;
        self.pos += self.vel;
        self.opacity = (self.opacity - PARTICLE_FADE).max(0.0);
    }
}

impl Entity for Particle {
    fn update(&mut self, _world: &World<'_>) {
        self.step();
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, PARTICLE_RADIUS, with_alpha(self.color, self.opacity));
    }

    fn is_expired(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Live particles plus the cap from settings
#[derive(Debug, Clone, PartialEq)]
pub struct ParticlePool {
    items: Vec<Particle>,
    cap: usize,
}

impl ParticlePool {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.items.truncate(cap);
    }

    /// Emit `count` particles at `origin`, each velocity axis uniform in
    /// `[-spread / 2, spread / 2)`
    ///
    /// Emission stops silently at the cap.
    pub fn burst(
        &mut self,
        rng: &mut dyn RngCore,
        origin: Vec2,
        color: Rgba,
        count: usize,
        spread: f32,
    ) {
        for _ in 0..count {
            if self.items.len() >= self.cap {
                break;
            }
            let vel = Vec2::new(rng::centered(rng, spread), rng::centered(rng, spread));
            self.items.push(Particle::new(origin, vel, color));
        }
    }

    /// Decay every particle and drop the faded ones
    pub fn update(&mut self, world: &World<'_>) {
        super::entity::update_all(&mut self.items, world);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::draw::palette;
    use crate::sim::input::TickInput;
    use crate::sim::rng::FixedRng;

    fn world(input: &TickInput) -> World<'_> {
        World {
            input,
            bounds: Vec2::new(800.0, 600.0),
            player_pos: Vec2::ZERO,
        }
    }

    #[test]
    fn test_particle_decay() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(10.0, 0.0), palette::SPARK);
        p.step();
        assert!((p.vel.x - 9.8).abs() < 1e-5);
        assert!((p.pos.x - 9.8).abs() < 1e-5);
        assert!((p.opacity - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_particle_lifespan() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ONE, palette::SPARK);
        let mut ticks = 0;
        while !p.is_expired() {
            p.step();
            ticks += 1;
            assert!(ticks <= 51, "particle outlived its fade");
        }
        assert!(ticks >= 50);
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn test_burst_and_cap() {
        let mut pool = ParticlePool::new(12);
        pool.burst(&mut FixedRng::LOW, Vec2::new(5.0, 5.0), palette::HEAL, 10, 5.0);
        assert_eq!(pool.len(), 10);
        // FixedRng::LOW draws 0.0, the low end of the spread
        assert!(pool.iter().all(|p| p.vel == Vec2::splat(-2.5)));

        pool.burst(&mut FixedRng::LOW, Vec2::ZERO, palette::HEAL, 10, 5.0);
        assert_eq!(pool.len(), 12);
    }

    #[test]
    fn test_pool_drops_faded() {
        let input = TickInput::default();
        let mut pool = ParticlePool::new(64);
        pool.burst(&mut FixedRng::HIGH, Vec2::ZERO, palette::BLOOD, 5, 5.0);
        for _ in 0..60 {
            pool.update(&world(&input));
        }
        assert!(pool.is_empty());
    }
}
