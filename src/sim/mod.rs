//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM or
//! the GPU:
//! - One call to [`tick`] advances exactly one fixed step
//! - Randomness comes from the session's injected generator
//! - Entities are stored in insertion order and processed in that order

pub mod collision;
pub mod draw;
pub mod enemy;
pub mod entity;
pub mod input;
pub mod particle;
pub mod player;
pub mod projectile;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{circles_touch, resolve_collisions};
pub use draw::{Rgba, Surface, draw_scene, palette};
pub use enemy::Enemy;
pub use entity::{Entity, World};
pub use input::{Aim, Command, InputState, TickInput};
pub use particle::{Particle, ParticlePool};
pub use player::Player;
pub use projectile::{Projectile, Team};
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::tick;
