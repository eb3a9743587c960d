//! OpenGL context management.
//!
//! This module is responsible for:
//! - picking a framebuffer config and creating the window through `glutin-winit`
//! - creating an OpenGL core-profile context and its window surface
//! - loading GL entry points into a `glow::Context`

mod context;
mod error;
mod init;

pub use context::GlContext;
pub use error::BootstrapError;
pub use init::GlInit;
