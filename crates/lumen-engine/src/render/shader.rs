//! Shader program construction.
//!
//! A build either yields a linked [`ShaderProgram`] that is ready to draw with,
//! or a [`ShaderError`] carrying the driver's diagnostic log. Intermediate
//! stage objects never outlive the build.

use std::fmt;
use std::path::{Path, PathBuf};

use super::backend::GlApi;

/// Upper bound on captured diagnostic text, in bytes.
pub const MAX_INFO_LOG_LEN: usize = 1024;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to create {object}: {reason}")]
    Create { object: &'static str, reason: String },

    #[error("{stage} shader failed to compile")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link")]
    Link { log: String },
}

impl ShaderError {
    /// Driver diagnostic text, if the failure came from the compiler or linker.
    ///
    /// Kept out of the `Display` message so callers can log it on its own.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => Some(log),
            ShaderError::Create { .. } => None,
        }
    }
}

/// GLSL source text for both stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Reads both stages from disk. See [`read_source`] for missing files.
    pub fn load(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Self {
        Self {
            vertex: read_source(vertex.as_ref()),
            fragment: read_source(fragment.as_ref()),
        }
    }
}

/// Reads a whole source file.
///
/// An unreadable file yields an empty string, which the compiler then rejects;
/// the read failure itself is only logged.
pub fn read_source(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) => {
            log::warn!("could not read shader source {}: {e}", path.display());
            String::new()
        }
    }
}

/// Paths to the two stage sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    pub fn load(&self) -> ShaderSources {
        ShaderSources::load(&self.vertex, &self.fragment)
    }
}

/// A linked program object.
///
/// Owns the GL handle; release it with [`ShaderProgram::destroy`] while the
/// context is still alive.
pub struct ShaderProgram<G: GlApi> {
    handle: G::Program,
}

impl<G: GlApi> fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("handle", &self.handle).finish()
    }
}

impl<G: GlApi> ShaderProgram<G> {
    pub fn handle(&self) -> G::Program {
        self.handle
    }

    pub fn bind(&self, gl: &G) {
        gl.use_program(Some(self.handle));
    }

    pub fn destroy(self, gl: &G) {
        gl.delete_program(self.handle);
    }
}

/// Object whose diagnostic log should be read.
pub enum InfoLogSource<G: GlApi> {
    Stage(G::Shader),
    Program(G::Program),
}

/// Writes the object's info log into `sink`, truncated to
/// [`MAX_INFO_LOG_LEN`] bytes on a character boundary.
pub fn write_info_log<G, W>(gl: &G, source: InfoLogSource<G>, sink: &mut W) -> fmt::Result
where
    G: GlApi,
    W: fmt::Write,
{
    let log = match source {
        InfoLogSource::Stage(shader) => gl.shader_info_log(shader),
        InfoLogSource::Program(program) => gl.program_info_log(program),
    };
    sink.write_str(truncate_log(log.trim_end()))
}

fn truncate_log(log: &str) -> &str {
    if log.len() <= MAX_INFO_LOG_LEN {
        return log;
    }
    let mut end = MAX_INFO_LOG_LEN;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    &log[..end]
}

fn read_log<G: GlApi>(gl: &G, source: InfoLogSource<G>) -> String {
    let mut log = String::new();
    // Writing into a String cannot fail.
    let _ = write_info_log(gl, source, &mut log);
    log
}

/// Compiles one stage. On failure the stage object is deleted.
pub fn compile_stage<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, ShaderError> {
    let shader = gl.create_shader(stage).map_err(|reason| ShaderError::Create {
        object: match stage {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
        },
        reason,
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = read_log(gl, InfoLogSource::Stage(shader));
        gl.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }

    Ok(shader)
}

/// Compiles both stages and links them into a program.
///
/// Stage objects are detached and deleted whether or not linking succeeds; a
/// program that fails to link is deleted too, so an `Err` leaves no GL objects
/// behind.
pub fn build_program<G: GlApi>(
    gl: &G,
    sources: &ShaderSources,
) -> Result<ShaderProgram<G>, ShaderError> {
    let vertex = compile_stage(gl, ShaderStage::Vertex, &sources.vertex)?;
    let fragment = match compile_stage(gl, ShaderStage::Fragment, &sources.fragment) {
        Ok(f) => f,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(p) => p,
        Err(reason) => {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(ShaderError::Create {
                object: "program",
                reason,
            });
        }
    };

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);
    let linked = gl.program_link_status(program);

    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if !linked {
        let log = read_log(gl, InfoLogSource::Program(program));
        gl.delete_program(program);
        return Err(ShaderError::Link { log });
    }

    log::debug!("shader program linked: {program:?}");
    Ok(ShaderProgram { handle: program })
}
