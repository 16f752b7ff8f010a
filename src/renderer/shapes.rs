//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::{Rgba, Surface};

/// Segment count for a circle of `radius` pixels
fn segments_for(radius: f32) -> u32 {
    (radius * 1.5).clamp(8.0, 48.0) as u32
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + radius * Vec2::from_angle(theta1),
            color,
        ));
        vertices.push(Vertex::at(
            center + radius * Vec2::from_angle(theta2),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a rectangle given in a frame at `origin` rotated by `angle`
pub fn rotated_rect(origin: Vec2, angle: f32, min: Vec2, size: Vec2, color: Rgba) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |local: Vec2| Vertex::at(origin + rot.rotate(local), color);

    let a = corner(min);
    let b = corner(min + Vec2::new(size.x, 0.0));
    let c = corner(min + size);
    let d = corner(min + Vec2::new(0.0, size.y));

    // Two triangles
    vec![a, b, c, a, c, d]
}

/// Vertex list for one frame, built through the [`Surface`] interface
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    /// Viewport size in pixels; shapes are laid out in this space
    pub viewport: Vec2,
    pub vertices: Vec<Vertex>,
}

impl ShapeBatch {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            vertices: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Vertices mapped to normalized device coordinates
    pub fn ndc_vertices(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .map(|v| v.to_ndc(self.viewport))
            .collect()
    }
}

impl Surface for ShapeBatch {
    fn fade(&mut self, color: Rgba) {
        let size = self.viewport;
        self.vertices
            .extend(rotated_rect(Vec2::ZERO, 0.0, Vec2::ZERO, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.vertices
            .extend(circle(center, radius, color, segments_for(radius)));
    }

    fn fill_rotated_rect(&mut self, origin: Vec2, angle: f32, min: Vec2, size: Vec2, color: Rgba) {
        self.vertices
            .extend(rotated_rect(origin, angle, min, size, color));
    }
}
