//! Game session state and lifecycle transitions
//!
//! One `GameState` spans a run: it is reset in place on restart.

use glam::Vec2;
use rand::RngCore;

use super::enemy::Enemy;
use super::particle::ParticlePool;
use super::player::Player;
use super::projectile::Projectile;
use super::rng;

/// Particle cap used until settings say otherwise
pub const DEFAULT_MAX_PARTICLES: usize = 512;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Loop running
    Active,
    /// Loop suspended by the player
    Paused,
    /// Player died; waits for a restart
    GameOver,
}

/// Notifications for the UI layer, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Health, bandages or score changed
    HudChanged,
    Paused,
    Resumed,
    GameOver { score: u64 },
    Restarted,
}

/// Numbers the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub health: u32,
    pub bandages: u32,
    pub score: u64,
}

/// Complete session state
pub struct GameState {
    pub phase: GamePhase,
    pub score: u64,
    /// Viewport size in CSS pixels
    pub bounds: Vec2,
    /// Simulation tick counter, drives the spawner
    pub time_ticks: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    /// Pending UI notifications
    pub events: Vec<GameEvent>,
    pub rng: Box<dyn RngCore>,
}

impl GameState {
    /// Create a new session with a seeded generator
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self::with_rng(bounds, rng::seeded(seed))
    }

    /// Create a new session drawing randomness from `rng`
    pub fn with_rng(bounds: Vec2, rng: Box<dyn RngCore>) -> Self {
        let bounds = sanitize_bounds(bounds);
        Self {
            phase: GamePhase::Active,
            score: 0,
            bounds,
            time_ticks: 0,
            player: Player::new(bounds / 2.0),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: ParticlePool::new(DEFAULT_MAX_PARTICLES),
            events: vec![GameEvent::HudChanged],
            rng,
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            health: self.player.health,
            bandages: self.player.bandages,
            score: self.score,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Take all pending UI notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Track a viewport resize
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = sanitize_bounds(bounds);
    }

    /// Active <-> Paused; ignored after game over
    pub fn toggle_pause(&mut self) -> Option<GamePhase> {
        match self.phase {
            GamePhase::Active => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused at tick {}", self.time_ticks);
                Some(self.phase)
            }
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => None,
        }
    }

    /// Paused -> Active; no-op otherwise
    pub fn resume(&mut self) -> Option<GamePhase> {
        if self.phase != GamePhase::Paused {
            return None;
        }
        self.phase = GamePhase::Active;
        self.events.push(GameEvent::Resumed);
        log::info!("Resumed at tick {}", self.time_ticks);
        Some(self.phase)
    }

    /// Fresh run in the same viewport, keeping the generator
    pub fn restart(&mut self) {
        self.phase = GamePhase::Active;
        self.score = 0;
        self.time_ticks = 0;
        self.player = Player::new(self.bounds / 2.0);
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.events.clear();
        self.events.push(GameEvent::Restarted);
        self.events.push(GameEvent::HudChanged);
        log::info!("Session restarted");
    }

    /// Spawn one enemy just outside the viewport
    pub fn spawn_enemy(&mut self, now_ms: f64) {
        let enemy = Enemy::spawn(self.rng.as_mut(), self.bounds, now_ms);
        log::debug!("Enemy spawned at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
        self.enemies.push(enemy);
    }

    /// Use a bandage on request
    pub fn use_bandage(&mut self) -> bool {
        let used = self
            .player
            .use_bandage(&mut self.particles, self.rng.as_mut());
        if used {
            self.events.push(GameEvent::HudChanged);
        }
        used
    }

    /// Damage the player, ending the run when health reaches zero
    pub fn damage_player(&mut self, amount: u32) {
        let dead = self
            .player
            .take_damage(amount, &mut self.particles, self.rng.as_mut());
        self.events.push(GameEvent::HudChanged);
        if dead {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over with score {}", self.score);
    }

    /// Purge every deletion-flagged projectile and enemy
    pub fn sweep(&mut self) {
        self.projectiles.retain(|p| !p.marked_for_deletion);
        self.enemies.retain(|e| !e.marked_for_deletion);
    }
}

fn sanitize_bounds(bounds: Vec2) -> Vec2 {
    Vec2::new(
        if bounds.x.is_finite() { bounds.x.max(1.0) } else { 1.0 },
        if bounds.y.is_finite() { bounds.y.max(1.0) } else { 1.0 },
    )
}
