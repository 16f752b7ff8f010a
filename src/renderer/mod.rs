//! WebGPU rendering module
//!
//! The simulation describes each frame through the `Surface` trait; a
//! [`ShapeBatch`] turns those calls into triangles and [`RenderState`] draws
//! them over the persistent trail texture.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::ShapeBatch;
pub use vertex::Vertex;
