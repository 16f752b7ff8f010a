//! Input state written by device handlers and the per-tick snapshot
//!
//! Handlers mutate [`InputState`] between frames; the simulation only ever
//! sees an immutable [`TickInput`] taken once per frame.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::AIM_STICK_REACH;

/// Lifecycle requests produced by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
}

/// Mouse/pen pointer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub pos: Vec2,
    pub down: bool,
}

/// One virtual joystick of the touch controls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stick {
    /// Offset from the zone center divided by the zone radius, at most unit length
    pub dir: Vec2,
    pub active: bool,
}

impl Stick {
    /// Track a touch at `touch` inside a zone centered at `center` with radius `max_dist`
    pub fn engage(&mut self, touch: Vec2, center: Vec2, max_dist: f32) {
        if max_dist <= 0.0 {
            return;
        }
        let offset = touch - center;
        self.dir = if offset.length() > max_dist {
            offset.try_normalize().unwrap_or(Vec2::X)
        } else {
            offset / max_dist
        };
        self.active = true;
    }

    pub fn release(&mut self) {
        *self = Self::default();
    }
}

/// Touch controls: move stick, aim stick, fire while the aim stick is held
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchSticks {
    pub movement: Stick,
    pub aim: Stick,
    pub shooting: bool,
}

/// Where the player is aiming this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Absolute pointer position
    Pointer(Vec2),
    /// Direction from the aim stick, relative to the player
    Stick(Vec2),
}

impl Default for Aim {
    fn default() -> Self {
        Aim::Pointer(Vec2::ZERO)
    }
}

impl Aim {
    /// World-space point to fire at from `origin`
    pub fn target_from(&self, origin: Vec2) -> Vec2 {
        match *self {
            Aim::Pointer(pos) => pos,
            Aim::Stick(dir) => origin + dir * AIM_STICK_REACH,
        }
    }

    /// Facing angle (radians) for an avatar at `origin`
    pub fn angle_from(&self, origin: Vec2) -> f32 {
        match *self {
            Aim::Pointer(pos) => crate::angle_to(origin, pos),
            Aim::Stick(dir) => dir.y.atan2(dir.x),
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Desired movement; keyboard gives axis steps of -1/0/1
    pub movement: Vec2,
    /// Movement came from the move stick and is already normalized
    pub movement_from_stick: bool,
    pub aim: Aim,
    /// Fire button held (pointer down or aim stick engaged)
    pub firing: bool,
    /// Use a bandage (one-shot)
    pub heal: bool,
    /// Wall-clock timestamp for cooldowns
    pub now_ms: f64,
}

/// Live input assembled by device handlers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<String>,
    pub pointer: Pointer,
    pub touch: TouchSticks,
    heal_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press
    ///
    /// Escape toggles pause on the initial press only; auto-repeat is ignored.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<Command> {
        let key = key.to_lowercase();
        if key.is_empty() {
            return None;
        }
        if !repeat && key == "e" {
            self.heal_requested = true;
        }
        let command = (!repeat && key == "escape").then_some(Command::TogglePause);
        self.keys.insert(key);
        command
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Heal button on the touch controls
    pub fn request_heal(&mut self) {
        self.heal_requested = true;
    }

    /// Forget everything held (restart, focus loss)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Keyboard movement: axis steps of -1, 0 or 1 from WASD/arrows
    fn keyboard_movement(&self) -> Vec2 {
        let held = |a: &str, b: &str| self.is_pressed(a) || self.is_pressed(b);
        let mut dir = Vec2::ZERO;
        if held("w", "arrowup") {
            dir.y -= 1.0;
        }
        if held("s", "arrowdown") {
            dir.y += 1.0;
        }
        if held("a", "arrowleft") {
            dir.x -= 1.0;
        }
        if held("d", "arrowright") {
            dir.x += 1.0;
        }
        dir
    }

    /// Snapshot for the next tick, consuming one-shot requests
    pub fn take_tick_input(&mut self, now_ms: f64) -> TickInput {
        let stick = self.touch.movement;
        let (movement, movement_from_stick) = if stick.active {
            (stick.dir, true)
        } else {
            (self.keyboard_movement(), false)
        };

        let aim = if self.touch.aim.active {
            Aim::Stick(self.touch.aim.dir)
        } else {
            Aim::Pointer(self.pointer.pos)
        };

        TickInput {
            movement,
            movement_from_stick,
            aim,
            firing: self.pointer.down || self.touch.shooting,
            heal: std::mem::take(&mut self.heal_requested),
            now_ms,
        }
    }
}
