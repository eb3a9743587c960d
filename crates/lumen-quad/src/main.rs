mod config;

use anyhow::{Context, Result};
use lumen_engine::core::{run_frames, AppControl};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::render::{
    build_program, compute_transform, upload_transform, QuadMesh, QuadRenderer, UniformUpload,
};
use lumen_engine::window::{self, GlWindow};

use config::QuadConfig;

/// Exit code for bootstrap failures and anything else fatal.
const EXIT_FATAL: i32 = -1;

fn main() {
    init_logging(LoggingConfig::default());

    let config = QuadConfig::default();

    let (mut window, gl) = match window::bootstrap(config.runtime.clone(), config.gl.clone()) {
        Ok(pair) => pair,
        Err(e) => {
            log::error!("could not bring up OpenGL: {e}");
            std::process::exit(EXIT_FATAL);
        }
    };

    let code = match run(&config, &gl, &mut window) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e:#}");
            EXIT_FATAL
        }
    };

    // GL objects are gone by now; the context may go.
    drop(gl);
    drop(window);
    std::process::exit(code);
}

fn run(config: &QuadConfig, gl: &glow::Context, window: &mut GlWindow) -> Result<()> {
    let sources = config.shaders.load();

    let program = match build_program(gl, &sources) {
        Ok(program) => {
            let transform = compute_transform(config.transform);
            if upload_transform(gl, &program, &transform) == UniformUpload::Uploaded {
                log::debug!("transform uploaded: {transform:?}");
            }
            Some(program)
        }
        Err(e) => {
            log::error!("{e}");
            if let Some(diagnostics) = e.log() {
                log::error!("{diagnostics}");
            }
            None
        }
    };

    let mesh = match QuadMesh::upload(gl) {
        Ok(mesh) => mesh,
        Err(e) => {
            if let Some(program) = program {
                program.destroy(gl);
            }
            return Err(e.context("geometry upload failed"));
        }
    };

    let renderer = QuadRenderer::new(program, mesh, config.clear_color);
    if renderer.is_degraded() {
        log::warn!("no usable shader program; frames will only clear");
    }
    let size = window.size();
    renderer.resize_viewport(gl, size.width, size.height);

    let result = run_frames(window, |frame| {
        if let Some((w, h)) = frame.resized {
            renderer.resize_viewport(gl, w, h);
        }
        renderer.draw(gl);
        AppControl::Continue
    });

    renderer.destroy(gl);

    let stats = result.context("render loop failed")?;
    log::debug!("closed after {} frames", stats.frames);
    Ok(())
}
