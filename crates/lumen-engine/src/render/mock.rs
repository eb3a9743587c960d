//! In-memory `GlApi` for tests.
//!
//! Tracks every live object, records calls in order and keeps uploaded buffer
//! bytes. Compilation is a toy check: a statement line without a trailing `;`
//! is a syntax error. Linking needs one compiled stage of each kind and a
//! fragment `out vec4`.

use std::cell::RefCell;
use std::collections::HashMap;

use super::backend::{BufferTarget, GlApi};
use super::shader::ShaderStage;

pub const VERTEX_SRC: &str = include_str!("../../../../shaders/quad.vert");
pub const FRAGMENT_SRC: &str = include_str!("../../../../shaders/quad.frag");

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram,
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformMatrix4(String),
    CreateVertexArray,
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer,
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    AttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    EnableAttrib(u32),
    Viewport(i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DrawElements(i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub program: Option<u32>,
    pub vertex_array: Option<u32>,
    pub count: i32,
}

#[derive(Debug, Clone)]
pub struct MockUniform {
    program: u32,
    name: String,
}

struct ShaderObj {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct ProgramObj {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
    values: HashMap<String, [f32; 16]>,
}

#[derive(Default)]
struct State {
    next_id: u32,
    created: usize,

    shaders: HashMap<u32, ShaderObj>,
    programs: HashMap<u32, ProgramObj>,
    buffers: HashMap<u32, Vec<u8>>,
    // vertex array -> element buffer recorded in it
    vertex_arrays: HashMap<u32, Option<u32>>,

    bound_vertex_array: Option<u32>,
    bound_array_buffer: Option<u32>,
    current_program: Option<u32>,

    buffers_created: usize,
    fail_buffers_after: Option<usize>,

    logs_read: Vec<String>,
    calls: Vec<Call>,
    draws: Vec<DrawCall>,
    clears: usize,
}

impl State {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.created += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MockGl {
    state: RefCell<State>,
}

impl MockGl {
    pub fn new() -> Self {
        Self::default()
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Deletions of programs, vertex arrays and buffers, in call order.
    /// Shader stage deletions are left out.
    pub fn deletions(&self) -> Vec<Call> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::DeleteProgram(_) | Call::DeleteVertexArray(_) | Call::DeleteBuffer(_)
                )
            })
            .cloned()
            .collect()
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.clone()
    }

    pub fn clears(&self) -> usize {
        self.state.borrow().clears
    }

    pub fn objects_created(&self) -> usize {
        self.state.borrow().created
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.state.borrow().current_program
    }

    pub fn info_logs_read(&self) -> Vec<String> {
        self.state.borrow().logs_read.clone()
    }

    pub fn element_buffer_of(&self, vertex_array: u32) -> Option<u32> {
        self.state
            .borrow()
            .vertex_arrays
            .get(&vertex_array)
            .copied()
            .flatten()
    }

    pub fn buffer_f32s(&self, buffer: u32) -> Vec<f32> {
        self.buffer_words(buffer).into_iter().map(f32::from_ne_bytes).collect()
    }

    pub fn buffer_u32s(&self, buffer: u32) -> Vec<u32> {
        self.buffer_words(buffer).into_iter().map(u32::from_ne_bytes).collect()
    }

    fn buffer_words(&self, buffer: u32) -> Vec<[u8; 4]> {
        let state = self.state.borrow();
        let bytes = state.buffers.get(&buffer).map(Vec::as_slice).unwrap_or_default();
        bytes
            .chunks_exact(4)
            .map(|w| [w[0], w[1], w[2], w[3]])
            .collect()
    }

    pub fn uniform_value(&self, program: u32, name: &str) -> Option<[f32; 16]> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .and_then(|p| p.values.get(name).copied())
    }

    // ── fault injection ───────────────────────────────────────────────────

    /// Makes every buffer creation after the first `n` fail.
    pub fn fail_buffer_creation_after(&self, n: usize) {
        self.state.borrow_mut().fail_buffers_after = Some(n);
    }

    pub fn set_shader_log(&self, shader: u32, log: String) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.log = log;
        }
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn check_source(src: &str) -> Result<(), String> {
    if src.trim().is_empty() {
        return Err("0:1(1): error: syntax error, unexpected end of file".into());
    }

    for (n, raw) in src.lines().enumerate() {
        let line = raw.split("//").next().unwrap_or_default().trim();
        let structural = line.is_empty()
            || line.starts_with('#')
            || line.starts_with("void ")
            || line.ends_with('{')
            || line.ends_with('}');
        if structural || line.ends_with(';') {
            continue;
        }
        return Err(format!(
            "0:{}(1): error: syntax error, unexpected end of statement, expecting ';' after `{line}`",
            n + 1
        ));
    }

    if !src.contains("void main") {
        return Err("0:0(0): error: no function with name 'main'".into());
    }
    Ok(())
}

fn declared_uniforms(src: &str) -> impl Iterator<Item = String> + '_ {
    src.lines()
        .map(str::trim)
        .filter(|l| l.starts_with("uniform "))
        .filter_map(|l| l.trim_end_matches(';').split_whitespace().last())
        .map(str::to_string)
}

impl GlApi for MockGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type UniformLocation = MockUniform;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        self.record(Call::CreateShader(stage));
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.shaders.insert(
            id,
            ShaderObj {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            match check_source(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.log.clear();
                }
                Err(log) => {
                    s.compiled = false;
                    s.log = log;
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut state = self.state.borrow_mut();
        let log = state
            .shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default();
        state.logs_read.push(log.clone());
        log
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        self.record(Call::CreateProgram);
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.programs.insert(id, ProgramObj::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|s| *s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let Some(p) = state.programs.get_mut(&program) else {
            return;
        };

        let stages: Vec<&ShaderObj> = p
            .attached
            .iter()
            .filter_map(|id| state.shaders.get(id))
            .collect();
        let vertex = stages.iter().find(|s| s.stage == ShaderStage::Vertex);
        let fragment = stages.iter().find(|s| s.stage == ShaderStage::Fragment);

        let result = match (vertex, fragment) {
            _ if stages.iter().any(|s| !s.compiled) => {
                Err("error: linking with uncompiled/unspecialized shader".to_string())
            }
            (Some(v), Some(f)) if f.source.contains("out vec4") => {
                Ok(declared_uniforms(&v.source)
                    .chain(declared_uniforms(&f.source))
                    .collect::<Vec<_>>())
            }
            (Some(_), Some(_)) => {
                Err("error: fragment shader does not write to any output".to_string())
            }
            _ => Err("error: program lacks a vertex or fragment stage".to_string()),
        };

        match result {
            Ok(uniforms) => {
                p.linked = true;
                p.log.clear();
                p.uniforms = uniforms;
            }
            Err(log) => {
                p.linked = false;
                p.log = log;
                p.uniforms.clear();
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut state = self.state.borrow_mut();
        let log = state
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default();
        state.logs_read.push(log.clone());
        log
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
        self.state.borrow_mut().current_program = program;
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.state.borrow_mut().programs.remove(&program);
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<MockUniform> {
        let state = self.state.borrow();
        let p = state.programs.get(&program)?;
        (p.linked && p.uniforms.iter().any(|u| u == name)).then(|| MockUniform {
            program,
            name: name.to_string(),
        })
    }

    fn uniform_matrix4(&self, location: &MockUniform, columns: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.name.clone()));
        let mut state = self.state.borrow_mut();
        // Like GL, uniforms are written to the bound program only.
        if state.current_program != Some(location.program) {
            return;
        }
        if let Some(p) = state.programs.get_mut(&location.program) {
            p.values.insert(location.name.clone(), *columns);
        }
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        self.record(Call::CreateVertexArray);
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.vertex_arrays.insert(id, None);
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
        self.state.borrow_mut().bound_vertex_array = vertex_array;
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
        let mut s = self.state.borrow_mut();
        s.vertex_arrays.remove(&vertex_array);
        if s.bound_vertex_array == Some(vertex_array) {
            s.bound_vertex_array = None;
        }
    }

    fn create_buffer(&self) -> Result<u32, String> {
        self.record(Call::CreateBuffer);
        let mut s = self.state.borrow_mut();
        if s.fail_buffers_after.is_some_and(|n| s.buffers_created >= n) {
            return Err("GL_OUT_OF_MEMORY".into());
        }
        s.buffers_created += 1;
        let id = s.alloc();
        s.buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
        let mut s = self.state.borrow_mut();
        match target {
            BufferTarget::Array => s.bound_array_buffer = buffer,
            BufferTarget::ElementArray => {
                if let Some(vao) = s.bound_vertex_array {
                    s.vertex_arrays.insert(vao, buffer);
                }
            }
        }
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
        let mut s = self.state.borrow_mut();
        let bound = match target {
            BufferTarget::Array => s.bound_array_buffer,
            BufferTarget::ElementArray => s
                .bound_vertex_array
                .and_then(|vao| s.vertex_arrays.get(&vao).copied().flatten()),
        };
        let Some(buffer) = bound else {
            return;
        };
        if let Some(storage) = s.buffers.get_mut(&buffer) {
            *storage = data.to_vec();
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.state.borrow_mut().buffers.remove(&buffer);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::AttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
        self.state.borrow_mut().clears += 1;
    }

    fn draw_triangles_u32(&self, count: i32) {
        self.record(Call::DrawElements(count));
        let mut s = self.state.borrow_mut();
        let draw = DrawCall {
            program: s.current_program,
            vertex_array: s.bound_vertex_array,
            count,
        };
        s.draws.push(draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_sources_pass_toy_compiler() {
        assert!(check_source(VERTEX_SRC).is_ok());
        assert!(check_source(FRAGMENT_SRC).is_ok());
    }

    #[test]
    fn declared_uniforms_finds_transform() {
        let names: Vec<_> = declared_uniforms(VERTEX_SRC).collect();
        assert_eq!(names, vec!["transform".to_string()]);
    }
}
