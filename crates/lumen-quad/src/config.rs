use std::path::PathBuf;

use glam::Vec3;
use lumen_engine::device::GlInit;
use lumen_engine::paint::Color;
use lumen_engine::render::shader::ShaderPaths;
use lumen_engine::render::TransformParams;
use lumen_engine::window::RuntimeConfig;

/// Everything the demo needs, baked in. There are no command-line arguments.
#[derive(Debug, Clone)]
pub struct QuadConfig {
    pub runtime: RuntimeConfig,
    pub gl: GlInit,
    /// Resolved against the working directory; no fallback search path.
    pub shaders: ShaderPaths,
    pub clear_color: Color,
    pub transform: TransformParams,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gl: GlInit::default(),
            shaders: ShaderPaths {
                vertex: PathBuf::from("shaders/quad.vert"),
                fragment: PathBuf::from("shaders/quad.frag"),
            },
            clear_color: Color::rgb(0.2, 0.3, 0.3),
            transform: TransformParams {
                translation: Vec3::new(0.25, -0.1, 0.0),
                scale: Vec3::new(0.5, 0.5, 1.0),
            },
        }
    }
}
