use std::ffi::CStr;
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{BootstrapError, GlInit};

/// Owns the window together with its OpenGL context and surface.
///
/// This type is the low-level presentation context:
/// - creates the window and GL config in one step (required on some platforms)
/// - creates and makes current a versioned context
/// - swaps and resizes the window surface
///
/// GL objects created through the `glow::Context` returned by [`GlContext::create`]
/// must be deleted before this value is dropped.
pub struct GlContext {
    // Field order is drop order: surface and context go before their window.
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlContext {
    /// Creates the window and a current OpenGL context for it, then loads all
    /// GL entry points.
    ///
    /// Must be called from `ApplicationHandler::resumed`.
    pub fn create(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GlInit,
    ) -> Result<(Self, glow::Context), BootstrapError> {
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| BootstrapError::Window(e.to_string()))?;

        let window = window
            .ok_or_else(|| BootstrapError::Window("no window returned with GL config".into()))?;
        let raw_handle = window.window_handle()?.as_raw();
        let display = config.display();

        let (major, minor) = init.version;
        let profile = if init.core_profile {
            GlProfile::Core
        } else {
            GlProfile::Compatibility
        };
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(profile)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_handle));

        // SAFETY: `raw_handle` refers to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .map_err(|source| BootstrapError::Context { major, minor, source })?;

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            non_zero(size.width),
            non_zero(size.height),
        );

        // SAFETY: same handle as above; the surface is dropped before the window.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(BootstrapError::Surface)?;

        let context = not_current
            .make_current(&surface)
            .map_err(BootstrapError::MakeCurrent)?;

        if init.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("vsync unavailable, presenting unthrottled: {e}");
            }
        }

        // SAFETY: the context is current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name: &CStr| display.get_proc_address(name))
        };

        check_version(&gl, major, minor)?;

        // SAFETY: plain string queries on a current context.
        unsafe {
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }

        Ok((
            Self {
                surface,
                context,
                window,
            },
            gl,
        ))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resizes the window surface. Zero-sized (minimized) windows are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> glutin::error::Result<()> {
        self.window.pre_present_notify();
        self.surface.swap_buffers(&self.context)
    }
}

/// Picks the config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // glutin never calls the picker with an empty iterator and requires a config back.
    most_samples(configs, GlConfig::num_samples)
        .expect("glutin only calls the config picker with at least one config")
}

/// First item with the highest sample count, or `None` for an empty iterator.
fn most_samples<T>(items: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    items.reduce(|best, candidate| {
        if samples(&candidate) > samples(&best) {
            candidate
        } else {
            best
        }
    })
}

fn check_version(gl: &glow::Context, major: u8, minor: u8) -> Result<(), BootstrapError> {
    let found = gl.version();
    if (found.major, found.minor) < (u32::from(major), u32::from(minor)) {
        return Err(BootstrapError::UnsupportedVersion {
            found: format!("{}.{}", found.major, found.minor),
            required: format!("{major}.{minor}"),
        });
    }
    Ok(())
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}
