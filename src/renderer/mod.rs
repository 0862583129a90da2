//! WebGPU rendering module
//!
//! A single flat-color pipeline: the scene builder emits triangle-list
//! vertices in field coordinates and the pipeline maps them to NDC.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::EntityRef;
pub use vertex::Vertex;
