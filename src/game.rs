//! Fixed-timestep game driver
//!
//! Owns one session plus the live input and runs simulation ticks from
//! frame callbacks. The loop only keeps going while the session is active:
//! every frame re-requests the next one, and pause or game over simply stop
//! asking.

use glam::Vec2;

use crate::consts::*;
use crate::platform::Scheduler;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GamePhase, GameState, InputState, tick};

/// A running game
pub struct Game<S: Scheduler> {
    pub state: GameState,
    pub input: InputState,
    settings: Settings,
    scheduler: S,
    /// Unsimulated time carried between frames
    accumulator: f64,
    /// Timestamp of the previous frame; None right after (re)starting
    last_time: Option<f64>,
}

impl<S: Scheduler> Game<S> {
    pub fn new(seed: u64, bounds: Vec2, settings: Settings, scheduler: S) -> Self {
        let mut state = GameState::new(seed, bounds);
        state.particles.set_cap(settings.max_particles());
        Self {
            state,
            input: InputState::new(),
            settings,
            scheduler,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Kick off the frame loop
    pub fn start(&mut self) {
        log::info!(
            "Starting session in a {}x{} viewport",
            self.state.bounds.x,
            self.state.bounds.y
        );
        self.scheduler.request_frame();
    }

    /// Frame callback: run the ticks owed since the previous frame
    ///
    /// Returns how many ticks ran.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        self.scheduler.frame_started();
        if !self.state.is_active() {
            return 0;
        }

        let dt = match self.last_time {
            Some(last) => (time_ms - last).clamp(0.0, MAX_FRAME_DT_MS),
            None => SIM_DT_MS,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            // Taking the snapshot clears one-shot requests after the first substep
            let input = self.input.take_tick_input(time_ms);
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            if !self.state.is_active() {
                break;
            }
        }
        // Drop the backlog a stalled device could not catch up on
        if self.accumulator >= SIM_DT_MS {
            self.accumulator %= SIM_DT_MS;
        }

        if self.state.is_active() {
            self.scheduler.request_frame();
        } else {
            self.halt();
        }
        substeps
    }

    /// Route a key press, acting on lifecycle commands
    pub fn key_down(&mut self, key: &str, repeat: bool) {
        if let Some(Command::TogglePause) = self.input.key_down(key, repeat) {
            self.toggle_pause();
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Active <-> Paused; ignored after game over
    pub fn toggle_pause(&mut self) {
        match self.state.toggle_pause() {
            Some(GamePhase::Paused) => self.halt(),
            Some(GamePhase::Active) => self.resubmit(),
            _ => {}
        }
    }

    /// Leave the pause screen
    pub fn resume(&mut self) {
        if self.state.resume().is_some() {
            self.resubmit();
        }
    }

    /// Throw the session away and start over in the same viewport
    pub fn restart(&mut self) {
        self.halt();
        self.state.restart();
        self.resubmit();
    }

    /// Track a viewport resize
    pub fn resize(&mut self, bounds: Vec2) {
        self.state.set_bounds(bounds);
        log::debug!("Viewport resized to {}x{}", self.state.bounds.x, self.state.bounds.y);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap presentation settings, applying the particle cap immediately
    pub fn apply_settings(&mut self, settings: Settings) {
        self.state.particles.set_cap(settings.max_particles());
        self.settings = settings;
    }

    /// Take all pending UI notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn halt(&mut self) {
        self.scheduler.cancel();
        self.accumulator = 0.0;
        self.last_time = None;
    }

    fn resubmit(&mut self) {
        self.last_time = None;
        self.scheduler.request_frame();
    }
}
