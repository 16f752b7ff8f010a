//! Fixed-step simulation tick
//!
//! Advances the session by one tick in a fixed order: player, firing,
//! projectiles, spawner, enemies, particles, collisions, sweep.

use super::collision::resolve_collisions;
use super::entity::{Entity, World, update_all};
use super::input::TickInput;
use super::state::GameState;
use crate::consts::SPAWN_INTERVAL_TICKS;

/// Advance the game state by one tick
///
/// Does nothing unless the session is active.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_active() {
        return;
    }

    let now_ms = input.now_ms;
    let mut world = World {
        input,
        bounds: state.bounds,
        player_pos: state.player.pos,
    };

    // Player
    state.player.update(&world);
    world.player_pos = state.player.pos;
    if input.heal {
        state.use_bandage();
    }

    // Firing
    if input.firing {
        let target = input.aim.target_from(state.player.pos);
        if let Some(shot) = state.player.try_fire(target, now_ms) {
            state.projectiles.push(shot);
        }
    }

    // Projectiles
    update_all(&mut state.projectiles, &world);

    // Spawner
    state.time_ticks += 1;
    if state.time_ticks % SPAWN_INTERVAL_TICKS == 0 {
        state.spawn_enemy(now_ms);
    }

    // Enemies move, then shoot from where they ended up
    for enemy in &mut state.enemies {
        enemy.update(&world);
        if let Some(shot) = enemy.try_fire(world.player_pos, now_ms) {
            state.projectiles.push(shot);
        }
    }
    state.enemies.retain(|e| !e.is_expired());

    // Particles
    state.particles.update(&world);

    resolve_collisions(state);
    state.sweep();
}
