//! Straight-line projectiles

use glam::Vec2;

use super::draw::{Surface, palette};
use super::entity::{Entity, World};
use crate::consts::*;
use crate::direction_to;

/// Which side fired the projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    /// Fired by the player, hurts enemies
    Friendly,
    /// Fired by an enemy, hurts the player
    Hostile,
}

/// A projectile entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub team: Team,
    pub marked_for_deletion: bool,
}

impl Projectile {
    /// Launch from `origin` toward `target`; the velocity never changes afterwards
    pub fn new(origin: Vec2, target: Vec2, team: Team) -> Self {
        Self {
            pos: origin,
            vel: direction_to(origin, target) * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            team,
            marked_for_deletion: false,
        }
    }

    fn out_of_bounds(&self, bounds: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y
    }
}

impl Entity for Projectile {
    fn update(&mut self, world: &World<'_>) {
        self.pos += self.vel;
        if self.out_of_bounds(world.bounds) {
            self.marked_for_deletion = true;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let color = match self.team {
            Team::Friendly => palette::FRIENDLY_SHOT,
            Team::Hostile => palette::HOSTILE_SHOT,
        };
        surface.fill_circle(self.pos, self.radius, color);
    }

    fn is_expired(&self) -> bool {
        self.marked_for_deletion
    }
}
