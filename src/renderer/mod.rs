//! WebGPU rendering module
//!
//! Draws the bird and obstacles as flat-coloured quads. Scene geometry is
//! built in playfield coordinates by `shapes` and mapped to clip space by
//! the pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
