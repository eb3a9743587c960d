//! Fixed quad geometry and its one-shot GPU upload.

use std::fmt;
use std::mem::size_of;

use anyhow::{anyhow, Result};
use bytemuck::{Pod, Zeroable};

use super::backend::{BufferTarget, GlApi};

/// Interleaved vertex: position then color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const POSITION_ATTRIB: u32 = 0;
    pub const COLOR_ATTRIB: u32 = 1;

    /// Distance between consecutive vertices: `6 × sizeof(f32)`.
    pub const STRIDE: i32 = size_of::<Vertex>() as i32;
    /// Byte offset of `color`: `3 × sizeof(f32)`.
    pub const COLOR_OFFSET: i32 = (3 * size_of::<f32>()) as i32;

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

// Counter-clockwise from bottom-left.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
    Vertex::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0]),
];

/// Two triangles `{0,1,2}` and `{2,3,0}`.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// GPU-resident quad: one vertex array, one vertex buffer, one index buffer.
///
/// Created once, never resized. Release with [`QuadMesh::destroy`].
pub struct QuadMesh<G: GlApi> {
    vertex_array: G::VertexArray,
    vertex_buffer: G::Buffer,
    index_buffer: G::Buffer,
    index_count: i32,
}

impl<G: GlApi> fmt::Debug for QuadMesh<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadMesh")
            .field("vertex_array", &self.vertex_array)
            .field("vertex_buffer", &self.vertex_buffer)
            .field("index_buffer", &self.index_buffer)
            .field("index_count", &self.index_count)
            .finish()
    }
}

impl<G: GlApi> QuadMesh<G> {
    /// Uploads [`QUAD_VERTICES`] and [`QUAD_INDICES`] and records the vertex
    /// layout in a fresh vertex array.
    ///
    /// The vertex array is left unbound. On failure nothing stays allocated.
    pub fn upload(gl: &G) -> Result<Self> {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|e| anyhow!("failed to create vertex array: {e}"))?;

        let vertex_buffer = match gl.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                gl.delete_vertex_array(vertex_array);
                return Err(anyhow!("failed to create vertex buffer: {e}"));
            }
        };

        let index_buffer = match gl.create_buffer() {
            Ok(b) => b,
            Err(e) => {
                gl.delete_buffer(vertex_buffer);
                gl.delete_vertex_array(vertex_array);
                return Err(anyhow!("failed to create index buffer: {e}"));
            }
        };

        gl.bind_vertex_array(Some(vertex_array));

        gl.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
        gl.buffer_data_static(BufferTarget::Array, bytemuck::cast_slice(&QUAD_VERTICES));

        // Element buffer binding is captured by the bound vertex array.
        gl.bind_buffer(BufferTarget::ElementArray, Some(index_buffer));
        gl.buffer_data_static(BufferTarget::ElementArray, bytemuck::cast_slice(&QUAD_INDICES));

        gl.vertex_attrib_pointer_f32(Vertex::POSITION_ATTRIB, 3, Vertex::STRIDE, 0);
        gl.enable_vertex_attrib_array(Vertex::POSITION_ATTRIB);

        gl.vertex_attrib_pointer_f32(Vertex::COLOR_ATTRIB, 3, Vertex::STRIDE, Vertex::COLOR_OFFSET);
        gl.enable_vertex_attrib_array(Vertex::COLOR_ATTRIB);

        gl.bind_vertex_array(None);

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count: QUAD_INDICES.len() as i32,
        })
    }

    #[inline]
    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    pub fn bind(&self, gl: &G) {
        gl.bind_vertex_array(Some(self.vertex_array));
    }

    /// Releases vertex array, vertex buffer, index buffer (in that order).
    pub fn destroy(self, gl: &G) {
        gl.delete_vertex_array(self.vertex_array);
        gl.delete_buffer(self.vertex_buffer);
        gl.delete_buffer(self.index_buffer);
    }
}
