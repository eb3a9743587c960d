//! Quad rendering.
//!
//! Everything here talks to OpenGL through [`GlApi`], implemented for
//! `glow::Context`. The renderer owns exactly one program, one vertex array,
//! one vertex buffer and one index buffer; see [`QuadRenderer`].

mod backend;
pub mod geometry;
mod quad;
pub mod shader;
pub mod transform;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{BufferTarget, GlApi};
pub use geometry::{QuadMesh, Vertex, QUAD_INDICES, QUAD_VERTICES};
pub use quad::QuadRenderer;
pub use shader::{build_program, ShaderError, ShaderProgram, ShaderSources, ShaderStage};
pub use transform::{compute_transform, upload_transform, TransformParams, UniformUpload};
