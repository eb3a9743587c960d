use std::fmt::Debug;

use glow::HasContext;

use super::shader::ShaderStage;

/// Buffer binding points used by the renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`: vertex attribute data.
    Array,
    /// `GL_ELEMENT_ARRAY_BUFFER`: indices; binding is recorded in the bound vertex array.
    ElementArray,
}

impl BufferTarget {
    fn to_gl(self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// The slice of OpenGL the quad renderer needs.
///
/// Methods mirror the GL calls one to one and take `&self` like
/// `glow::HasContext`. All calls must happen on the thread that owns the
/// current context.
pub trait GlApi {
    type Shader: Copy + Debug + PartialEq;
    type Program: Copy + Debug + PartialEq;
    type Buffer: Copy + Debug + PartialEq;
    type VertexArray: Copy + Debug + PartialEq;
    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    /// Uploads a column-major 4×4 matrix to the currently bound program.
    fn uniform_matrix4(&self, location: &Self::UniformLocation, columns: &[f32; 16]);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Uploads `data` to the buffer bound at `target` with a static usage hint.
    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Describes a float attribute on the bound vertex array, sourced from the
    /// bound array buffer. Never normalized.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&self, index: u32);

    fn viewport(&self, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    /// Draws `count` `u32` indices from the bound element buffer as triangles.
    fn draw_triangles_u32(&self, count: i32);
}

// SAFETY (all methods below): glow marks every GL call unsafe because it
// cannot prove a context is current. `GlApi` callers uphold that contract.
impl GlApi for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let ty = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { HasContext::create_shader(self, ty) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_matrix4(&self, location: &Self::UniformLocation, columns: &[f32; 16]) {
        unsafe { self.uniform_matrix_4_f32_slice(Some(location), false, columns) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target.to_gl(), buffer) }
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(target.to_gl(), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                components,
                glow::FLOAT,
                false,
                stride,
                offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, 0, 0, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_triangles_u32(&self, count: i32) {
        unsafe { self.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0) }
    }
}
