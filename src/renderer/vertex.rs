//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::Rgba;

/// 2D vertex with position and color
///
/// Positions are in viewport pixels while a batch is being built and in
/// normalized device coordinates once uploaded.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(pos: Vec2, color: Rgba) -> Self {
        Self::new(pos.x, pos.y, color)
    }

    /// Map from a `viewport`-sized pixel space (y down) to NDC (y up)
    pub fn to_ndc(self, viewport: Vec2) -> Self {
        let x = self.position[0] / viewport.x * 2.0 - 1.0;
        let y = 1.0 - self.position[1] / viewport.y * 2.0;
        Self::new(x, y, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        let top_left = Vertex::new(0.0, 0.0, [1.0; 4]).to_ndc(viewport);
        let bottom_right = Vertex::new(800.0, 600.0, [1.0; 4]).to_ndc(viewport);
        let center = Vertex::new(400.0, 300.0, [1.0; 4]).to_ndc(viewport);
        assert_eq!(top_left.position, [-1.0, 1.0]);
        assert_eq!(bottom_right.position, [1.0, -1.0]);
        assert_eq!(center.position, [0.0, 0.0]);
    }
}
