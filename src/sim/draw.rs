//! Drawing interface between the simulation and a renderer
//!
//! Entities describe themselves with a handful of 2D primitives; the
//! renderer decides how those become pixels.

use glam::Vec2;

use super::entity::Entity;
use super::state::GameState;

/// Linear RGBA color
pub type Rgba = [f32; 4];

/// Build an opaque color from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> Rgba {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
pub const fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod palette {
    use super::{Rgba, hex, with_alpha};

    pub const PLAYER: Rgba = hex(0x4a90e2);
    pub const GUN: Rgba = hex(0x333333);
    pub const ENEMY: Rgba = hex(0xff4444);
    pub const FRIENDLY_SHOT: Rgba = hex(0xffff00);
    pub const HOSTILE_SHOT: Rgba = hex(0xff4444);
    pub const HEAL: Rgba = hex(0x00ff00);
    pub const BLOOD: Rgba = hex(0xff0000);
    pub const SPARK: Rgba = hex(0xff4444);
    /// Per-frame overlay; low alpha leaves motion trails
    pub const TRAIL_OVERLAY: Rgba = with_alpha(hex(0x1e1e1e), 0.3);
    pub const BACKGROUND: Rgba = hex(0x1e1e1e);
}

/// A 2D drawing target that persists between frames
pub trait Surface {
    /// Blend `color` over the whole surface
    fn fade(&mut self, color: Rgba);
    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Filled rectangle in a frame translated to `origin` and rotated by `angle`
    ///
    /// `min` and `size` are expressed in that local frame.
    fn fill_rotated_rect(&mut self, origin: Vec2, angle: f32, min: Vec2, size: Vec2, color: Rgba);
}

/// Draw one frame: overlay first, then player, projectiles, enemies, particles
pub fn draw_scene(state: &GameState, surface: &mut dyn Surface, overlay: Rgba) {
    surface.fade(overlay);

    state.player.render(surface);
    for projectile in &state.projectiles {
        projectile.render(surface);
    }
    for enemy in &state.enemies {
        enemy.render(surface);
    }
    for particle in state.particles.iter() {
        particle.render(surface);
    }
}

/// Surface that records every call, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fade(Rgba),
    Circle { center: Vec2, radius: f32, color: Rgba },
    Rect { origin: Vec2, angle: f32, color: Rgba },
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn fade(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Fade(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rotated_rect(&mut self, origin: Vec2, angle: f32, _min: Vec2, _size: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Rect {
            origin,
            angle,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::projectile::{Projectile, Team};
    use crate::sim::rng::FixedRng;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(with_alpha(hex(0x0000ff), 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_draw_order() {
        let mut state = GameState::with_rng(Vec2::new(800.0, 600.0), Box::new(FixedRng::LOW));
        state.projectiles.push(Projectile::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(200.0, 100.0),
            Team::Friendly,
        ));
        state.spawn_enemy(0.0);
        let pos = state.player.pos;
        state.particles.burst(&mut FixedRng::LOW, pos, palette::HEAL, 2, 5.0);

        let mut surface = RecordingSurface::default();
        draw_scene(&state, &mut surface, palette::TRAIL_OVERLAY);

        let kinds: Vec<_> = surface
            .calls
            .iter()
            .map(|c| match c {
                DrawCall::Fade(_) => "fade",
                DrawCall::Rect { .. } => "gun",
                DrawCall::Circle { radius, color, .. } => {
                    if *radius == PLAYER_RADIUS && *color == palette::PLAYER {
                        "player"
                    } else if *radius == PROJECTILE_RADIUS {
                        "projectile"
                    } else if *radius == ENEMY_RADIUS {
                        "enemy"
                    } else {
                        "particle"
                    }
                }
            })
            .collect();
        assert_eq!(
            kinds,
            ["fade", "player", "gun", "projectile", "enemy", "particle", "particle"]
        );
    }
}
