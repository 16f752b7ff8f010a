//! Circle-circle collision between projectiles, enemies and the player
//!
//! Everything in the arena is a circle, so one overlap rule covers every
//! pair: centers closer than the radius sum plus `HIT_EPSILON`.

use glam::Vec2;

use super::draw::palette;
use super::projectile::Team;
use super::rng;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Impact sparks per projectile hit and debris per kill
const IMPACT_PARTICLES: usize = 3;
const IMPACT_SPREAD: f32 = 8.0;
const EXPLOSION_PARTICLES: usize = 15;
const EXPLOSION_SPREAD: f32 = 10.0;

/// Whether two circles touch, treating a gap under `HIT_EPSILON` as contact
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) - ra - rb < HIT_EPSILON
}

/// Run every collision check for this tick
pub fn resolve_collisions(state: &mut GameState) {
    projectile_hits(state);
    contact_damage(state);
}

/// Projectiles against their targets; each projectile hits at most once
fn projectile_hits(state: &mut GameState) {
    for i in 0..state.projectiles.len() {
        let proj = state.projectiles[i];
        if proj.marked_for_deletion {
            continue;
        }

        match proj.team {
            Team::Friendly => {
                let Some(j) = state.enemies.iter().position(|e| {
                    !e.marked_for_deletion && circles_touch(proj.pos, proj.radius, e.pos, e.radius)
                }) else {
                    continue;
                };
                state.projectiles[i].marked_for_deletion = true;
                hit_enemy(state, j, proj.pos);
            }
            Team::Hostile => {
                let player = &state.player;
                if circles_touch(proj.pos, proj.radius, player.pos, player.radius) {
                    state.projectiles[i].marked_for_deletion = true;
                    state.damage_player(PROJECTILE_DAMAGE);
                }
            }
        }
    }
}

fn hit_enemy(state: &mut GameState, index: usize, impact: Vec2) {
    state.particles.burst(
        state.rng.as_mut(),
        impact,
        palette::SPARK,
        IMPACT_PARTICLES,
        IMPACT_SPREAD,
    );

    let enemy = &mut state.enemies[index];
    if !enemy.hit(PROJECTILE_DAMAGE) {
        return;
    }
    let pos = enemy.pos;

    state.score += KILL_SCORE;
    state.events.push(GameEvent::HudChanged);
    state.particles.burst(
        state.rng.as_mut(),
        pos,
        palette::ENEMY,
        EXPLOSION_PARTICLES,
        EXPLOSION_SPREAD,
    );
    log::debug!("Enemy destroyed, score {}", state.score);

    if rng::chance(state.rng.as_mut(), BANDAGE_DROP_CHANCE) {
        state.player.bandages += 1;
        state.events.push(GameEvent::HudChanged);
        log::debug!("Bandage dropped, now {}", state.player.bandages);
    }
}

/// Enemies touching the player drain health every tick
fn contact_damage(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let touching = state
        .enemies
        .iter()
        .filter(|e| !e.marked_for_deletion && circles_touch(e.pos, e.radius, player_pos, player_radius))
        .count();
    for _ in 0..touching {
        state.damage_player(CONTACT_DAMAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::sim::projectile::Projectile;
    use crate::sim::rng::FixedRng;
    use crate::sim::state::GamePhase;

    fn state_with(rng: FixedRng) -> GameState {
        let mut state = GameState::with_rng(Vec2::new(800.0, 600.0), Box::new(rng));
        state.drain_events();
        state
    }

    fn enemy_at(pos: Vec2) -> Enemy {
        Enemy::new(pos, 1.0, 3000.0, 0.0)
    }

    /// Projectile sitting still at `pos`
    fn shot_at(pos: Vec2, team: Team) -> Projectile {
        let mut p = Projectile::new(pos, pos + Vec2::X, team);
        p.vel = Vec2::ZERO;
        p
    }

    #[test]
    fn test_hit_threshold_boundaries() {
        let a = Vec2::ZERO;
        let (ra, rb) = (20.0, 5.0);
        // Edge gaps of 0.999 and 1.001
        assert!(circles_touch(a, ra, Vec2::new(25.999, 0.0), rb));
        assert!(!circles_touch(a, ra, Vec2::new(26.001, 0.0), rb));
        // Overlapping and far apart
        assert!(circles_touch(a, ra, Vec2::new(10.0, 0.0), rb));
        assert!(!circles_touch(a, ra, Vec2::new(100.0, 0.0), rb));
    }

    #[test]
    fn test_friendly_hit_damages_enemy() {
        let mut state = state_with(FixedRng::HIGH);
        state.enemies.push(enemy_at(Vec2::new(100.0, 100.0)));
        state
            .projectiles
            .push(shot_at(Vec2::new(120.0, 100.0), Team::Friendly));

        resolve_collisions(&mut state);
        assert_eq!(state.enemies[0].health, ENEMY_HEALTH - 10);
        assert!(state.projectiles[0].marked_for_deletion);
        assert_eq!(state.particles.len(), IMPACT_PARTICLES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_projectile_hits_only_first_enemy() {
        let mut state = state_with(FixedRng::HIGH);
        state.enemies.push(enemy_at(Vec2::new(100.0, 100.0)));
        state.enemies.push(enemy_at(Vec2::new(110.0, 100.0)));
        state
            .projectiles
            .push(shot_at(Vec2::new(105.0, 100.0), Team::Friendly));

        resolve_collisions(&mut state);
        assert_eq!(state.enemies[0].health, ENEMY_HEALTH - 10);
        assert_eq!(state.enemies[1].health, ENEMY_HEALTH);
    }

    #[test]
    fn test_friendly_shots_ignore_player() {
        let mut state = state_with(FixedRng::HIGH);
        let pos = state.player.pos;
        state.projectiles.push(shot_at(pos, Team::Friendly));
        resolve_collisions(&mut state);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert!(!state.projectiles[0].marked_for_deletion);
    }

    #[test]
    fn test_hostile_hit_damages_player() {
        let mut state = state_with(FixedRng::HIGH);
        let pos = state.player.pos + Vec2::new(24.0, 0.0);
        state.projectiles.push(shot_at(pos, Team::Hostile));
        // Hostile shots pass through enemies
        state.enemies.push(enemy_at(Vec2::new(700.0, 500.0)));
        state.projectiles.push(shot_at(Vec2::new(700.0, 500.0), Team::Hostile));

        resolve_collisions(&mut state);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 10);
        assert!(state.projectiles[0].marked_for_deletion);
        assert!(!state.projectiles[1].marked_for_deletion);
        assert_eq!(state.enemies[0].health, ENEMY_HEALTH);
        assert!(state.drain_events().contains(&GameEvent::HudChanged));
    }

    fn kill_enemy(rng: FixedRng) -> GameState {
        let mut state = state_with(rng);
        state.enemies.push(enemy_at(Vec2::new(100.0, 100.0)));
        for _ in 0..3 {
            state
                .projectiles
                .push(shot_at(Vec2::new(100.0, 100.0), Team::Friendly));
            resolve_collisions(&mut state);
            state.sweep();
        }
        state
    }

    #[test]
    fn test_kill_with_bandage_drop() {
        // Every draw is 0.0, below the 0.2 drop chance
        let state = kill_enemy(FixedRng::LOW);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, KILL_SCORE);
        assert_eq!(state.player.bandages, PLAYER_START_BANDAGES + 1);
        assert_eq!(
            state.particles.len(),
            3 * IMPACT_PARTICLES + EXPLOSION_PARTICLES
        );
    }

    #[test]
    fn test_kill_without_bandage_drop() {
        // Every draw is just under 1.0, above the drop chance
        let state = kill_enemy(FixedRng::HIGH);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, KILL_SCORE);
        assert_eq!(state.player.bandages, PLAYER_START_BANDAGES);
    }

    #[test]
    fn test_dead_enemy_is_not_scored_twice() {
        let mut state = state_with(FixedRng::HIGH);
        let mut enemy = enemy_at(Vec2::new(100.0, 100.0));
        enemy.health = 10;
        state.enemies.push(enemy);
        state
            .projectiles
            .push(shot_at(Vec2::new(100.0, 100.0), Team::Friendly));
        state
            .projectiles
            .push(shot_at(Vec2::new(100.0, 100.0), Team::Friendly));

        resolve_collisions(&mut state);
        assert_eq!(state.score, KILL_SCORE);
        assert!(state.projectiles[0].marked_for_deletion);
        assert!(!state.projectiles[1].marked_for_deletion);
    }

    #[test]
    fn test_contact_damage_per_enemy_per_tick() {
        let mut state = state_with(FixedRng::HIGH);
        let pos = state.player.pos;
        state.enemies.push(enemy_at(pos + Vec2::new(30.0, 0.0)));
        state.enemies.push(enemy_at(pos - Vec2::new(30.0, 0.0)));
        state.enemies.push(enemy_at(pos + Vec2::new(0.0, 200.0)));

        for _ in 0..5 {
            resolve_collisions(&mut state);
        }
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH - 10);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_fatal_contact_ends_game() {
        let mut state = state_with(FixedRng::HIGH);
        state.player.health = 1;
        let pos = state.player.pos;
        state.enemies.push(enemy_at(pos));
        resolve_collisions(&mut state);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver { score: 0 }));
    }
}
