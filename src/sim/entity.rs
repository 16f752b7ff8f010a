//! Shared capability of every simulated object

use glam::Vec2;

use super::draw::Surface;
use super::input::TickInput;

/// Read-only view of the world handed to entities during a tick
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    pub input: &'a TickInput,
    /// Viewport size; the playable area is `[0, bounds]`
    pub bounds: Vec2,
    /// Player position at the start of the entity pass
    pub player_pos: Vec2,
}

/// Something the tick loop advances and the renderer draws
pub trait Entity {
    /// Advance by one tick
    fn update(&mut self, world: &World<'_>);

    /// Describe the entity on a drawing surface
    fn render(&self, surface: &mut dyn Surface);

    /// Whether the entity should be removed at the next sweep
    fn is_expired(&self) -> bool {
        false
    }
}

/// Advance every entity, then drop the expired ones
pub fn update_all<E: Entity>(entities: &mut Vec<E>, world: &World<'_>) {
    for entity in entities.iter_mut() {
        entity.update(world);
    }
    entities.retain(|e| !e.is_expired());
}
