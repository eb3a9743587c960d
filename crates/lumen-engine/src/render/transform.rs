//! The quad's model transform.
//!
//! Computed once at startup and uploaded once; nothing here runs per frame.

use glam::{Mat4, Vec3};

use super::backend::GlApi;
use super::shader::ShaderProgram;

/// Name of the `mat4` uniform the vertex shader reads.
pub const TRANSFORM_UNIFORM: &str = "transform";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformParams {
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            translation: Vec3::new(0.25, -0.1, 0.0),
            scale: Vec3::new(0.5, 0.5, 1.0),
        }
    }
}

/// `Translate(T) * Scale(S)` applied to identity.
///
/// Points are scaled first and then translated; the translation itself is
/// not scaled.
pub fn compute_transform(params: TransformParams) -> Mat4 {
    Mat4::IDENTITY * Mat4::from_translation(params.translation) * Mat4::from_scale(params.scale)
}

/// Outcome of [`upload_transform`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformUpload {
    Uploaded,
    /// The program has no active `transform` uniform; nothing was sent.
    Missing,
}

/// Binds `program` and uploads `matrix` to its `transform` uniform.
///
/// A missing uniform is logged and skipped.
pub fn upload_transform<G: GlApi>(
    gl: &G,
    program: &ShaderProgram<G>,
    matrix: &Mat4,
) -> UniformUpload {
    let Some(location) = gl.uniform_location(program.handle(), TRANSFORM_UNIFORM) else {
        log::warn!("uniform `{TRANSFORM_UNIFORM}` not found in program; transform not applied");
        return UniformUpload::Missing;
    };

    program.bind(gl);
    gl.uniform_matrix4(&location, &matrix.to_cols_array());
    UniformUpload::Uploaded
}
