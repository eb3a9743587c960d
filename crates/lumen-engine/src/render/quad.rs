use crate::paint::Color;

use super::backend::GlApi;
use super::geometry::QuadMesh;
use super::shader::ShaderProgram;

/// Owns every GL object the quad needs: the program and the mesh.
///
/// A renderer without a program is *degraded*: frames still clear to the
/// background color but no draw call is issued, so a program that failed to
/// build is never bound.
pub struct QuadRenderer<G: GlApi> {
    program: Option<ShaderProgram<G>>,
    mesh: QuadMesh<G>,
    clear: Color,
}

impl<G: GlApi> QuadRenderer<G> {
    pub fn new(program: Option<ShaderProgram<G>>, mesh: QuadMesh<G>, clear: Color) -> Self {
        Self {
            program,
            mesh,
            clear: clear.clamped(),
        }
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.program.is_none()
    }

    pub fn program(&self) -> Option<&ShaderProgram<G>> {
        self.program.as_ref()
    }

    pub fn resize_viewport(&self, gl: &G, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        gl.viewport(width as i32, height as i32);
    }

    /// Clears the color buffer and draws the quad.
    pub fn draw(&self, gl: &G) {
        let Color { r, g, b, a } = self.clear;
        gl.clear_color(r, g, b, a);
        gl.clear_color_buffer();

        let Some(program) = self.program.as_ref() else {
            return;
        };

        program.bind(gl);
        self.mesh.bind(gl);
        gl.draw_triangles_u32(self.mesh.index_count());
        gl.bind_vertex_array(None);
    }

    /// Releases the vertex array, vertex buffer, index buffer and program.
    ///
    /// Must run before the context is torn down.
    pub fn destroy(self, gl: &G) {
        self.mesh.destroy(gl);
        if let Some(program) = self.program {
            gl.use_program(None);
            program.destroy(gl);
        }
    }
}
