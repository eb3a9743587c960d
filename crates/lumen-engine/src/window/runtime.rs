use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::core::FrameSource;
use crate::device::{BootstrapError, GlContext, GlInit};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Hello OpenGL".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            resizable: false,
        }
    }
}

/// Upper bound on pumps while waiting for `resumed` during bootstrap.
///
/// Desktop platforms resume on the first pump.
const BOOTSTRAP_PUMPS: usize = 16;

/// Creates the window and its OpenGL context.
///
/// Returns the window together with the loaded GL function table. The caller
/// owns both and must delete every GL object before dropping the window.
pub fn bootstrap(
    config: RuntimeConfig,
    init: GlInit,
) -> Result<(GlWindow, glow::Context), BootstrapError> {
    let mut event_loop = EventLoop::new()?;
    let mut state = WindowState::new(config, init);

    for _ in 0..BOOTSTRAP_PUMPS {
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut state)
        {
            return Err(BootstrapError::Exited(code));
        }

        if let Some(err) = state.error.take() {
            return Err(err);
        }

        if let Some(gl) = state.gl.take() {
            log::info!("window ready: {:?}", state.config.title);
            return Ok((GlWindow { event_loop, state }, gl));
        }
    }

    Err(BootstrapError::NotResumed)
}

/// A bootstrapped window with a current OpenGL context.
///
/// Implements [`FrameSource`]: polling pumps the winit event loop without
/// blocking, presenting swaps the window surface.
pub struct GlWindow {
    // The state (and with it the GL surface/context/window) drops before the loop.
    state: WindowState,
    event_loop: EventLoop<()>,
}

impl GlWindow {
    pub fn window(&self) -> Option<&Window> {
        self.state.context.as_ref().map(GlContext::window)
    }

    /// Physical size of the drawable.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window()
            .map(Window::inner_size)
            .unwrap_or_else(|| PhysicalSize::new(0, 0))
    }
}

impl FrameSource for GlWindow {
    fn poll_events(&mut self) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state)
        {
            log::debug!("event loop exited with code {code}");
            self.state.close_requested = true;
        }
    }

    fn close_requested(&self) -> bool {
        self.state.close_requested
    }

    fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.state
            .pending_resize
            .take()
            .map(|size| (size.width, size.height))
    }

    fn present(&mut self) -> Result<()> {
        let ctx = self
            .state
            .context
            .as_ref()
            .context("no GL context to present")?;
        ctx.swap_buffers().context("failed to swap buffers")?;
        Ok(())
    }
}

struct WindowState {
    config: RuntimeConfig,
    init: GlInit,

    context: Option<GlContext>,
    // Handed out once by `bootstrap`.
    gl: Option<glow::Context>,
    error: Option<BootstrapError>,

    close_requested: bool,
    pending_resize: Option<PhysicalSize<u32>>,
}

impl WindowState {
    fn new(config: RuntimeConfig, init: GlInit) -> Self {
        Self {
            config,
            init,
            context: None,
            gl: None,
            error: None,
            close_requested: false,
            pending_resize: None,
        }
    }
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_some() || self.error.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        match GlContext::create(event_loop, attributes, &self.init) {
            Ok((context, gl)) => {
                self.context = Some(context);
                self.gl = Some(gl);
            }
            Err(e) => {
                log::error!("failed to create GL window: {e}");
                self.error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            // Only raise the flag; GL objects are released by the owner before
            // the context goes away.
            WindowEvent::CloseRequested => self.close_requested = true,

            WindowEvent::Resized(size) => {
                if let Some(ctx) = self.context.as_ref() {
                    ctx.resize(size);
                }
                self.pending_resize = Some(size);
            }

            _ => {}
        }
    }
}
