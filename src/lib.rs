//! Edge Siege - a top-down arena survival shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, tick order, session lifecycle)
//! - `game`: Fixed-timestep driver gating the loop through a frame scheduler
//! - `renderer`: WebGPU rendering of the 2D draw list
//! - `platform`: Frame scheduling abstraction (animation frames on web)
//! - `settings`: Presentation preferences

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Distances are in CSS pixels, speeds in pixels per tick.
pub mod consts {
    /// Simulation rate. Every per-tick quantity below assumes it.
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed to the accumulator (tab switches, hitches)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_START_BANDAGES: u32 = 2;
    /// Health restored by one bandage
    pub const BANDAGE_HEAL: u32 = 25;
    /// Minimum wall-clock gap between player shots
    pub const FIRE_COOLDOWN_MS: f64 = 200.0;
    /// Distance of the aim point from the player when aiming with the stick
    pub const AIM_STICK_REACH: f32 = 100.0;
    /// Gun barrel drawn from the player center along the aim
    pub const GUN_LENGTH: f32 = 35.0;
    pub const GUN_WIDTH: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_HEALTH: i32 = 30;
    pub const ENEMY_MIN_SPEED: f32 = 1.0;
    pub const ENEMY_SPEED_SPREAD: f32 = 1.0;
    pub const ENEMY_SHOT_INTERVAL_MIN_MS: f64 = 2000.0;
    pub const ENEMY_SHOT_INTERVAL_SPREAD_MS: f64 = 2000.0;
    /// How far outside the viewport enemies appear
    pub const ENEMY_SPAWN_MARGIN: f32 = 30.0;
    /// One enemy every this many ticks (~1.7 s at 60 Hz)
    pub const SPAWN_INTERVAL_TICKS: u64 = 100;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Damage a projectile deals to whatever it hits
    pub const PROJECTILE_DAMAGE: u32 = 10;
    /// Damage per tick while an enemy touches the player
    pub const CONTACT_DAMAGE: u32 = 1;
    /// Circles closer than this (edge to edge) count as touching
    pub const HIT_EPSILON: f32 = 1.0;

    /// Scoring
    pub const KILL_SCORE: u64 = 100;
    pub const BANDAGE_DROP_CHANCE: f32 = 0.2;

    /// Particle defaults
    pub const PARTICLE_RADIUS: f32 = 3.0;
    pub const PARTICLE_FRICTION: f32 = 0.98;
    pub const PARTICLE_FADE: f32 = 0.02;
}

/// Angle (radians) of the ray from `from` toward `to`; 0 when the points coincide
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Unit vector from `from` toward `to`
///
/// Coincident points yield +X, matching `atan2(0, 0) == 0`.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// Clamp a point into `[margin, size - margin]` on both axes
///
/// Viewports narrower than two margins pin the point to the low edge
/// instead of panicking like `Vec2::clamp`.
#[inline]
pub fn clamp_inside(pos: Vec2, size: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        pos.x.min(size.x - margin).max(margin),
        pos.y.min(size.y - margin).max(margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_direction_to() {
        let dir = direction_to(Vec2::new(10.0, 10.0), Vec2::new(10.0, 30.0));
        assert!((dir - Vec2::Y).length() < 1e-6);

        // Coincident points fall back to +X
        assert_eq!(direction_to(Vec2::ONE, Vec2::ONE), Vec2::X);
    }

    #[test]
    fn test_angle_to() {
        assert!((angle_to(Vec2::ZERO, Vec2::new(0.0, 5.0)) - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(angle_to(Vec2::ONE, Vec2::ONE), 0.0);
    }

    #[test]
    fn test_clamp_inside() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(
            clamp_inside(Vec2::new(-50.0, 900.0), size, 20.0),
            Vec2::new(20.0, 580.0)
        );
        // Degenerate viewport pins to the margin
        assert_eq!(
            clamp_inside(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0), 20.0),
            Vec2::new(20.0, 20.0)
        );
    }
}
