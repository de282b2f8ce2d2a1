//! WebGPU rendering module
//!
//! Draws the field as flat-colored quads. Text lives in the DOM (see `hud`).

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{field_to_ndc, rect_quad, scene_vertices};
pub use vertex::{Vertex, colors};
