//! WebGPU rendering module
//!
//! `Scene` implements the simulation's `Stage` and tessellates primitives;
//! `RenderState` uploads the scene's triangles each frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::Scene;
pub use vertex::Vertex;
