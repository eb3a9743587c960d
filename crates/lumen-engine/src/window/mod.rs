//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and drives it one pump at a time so the render
//! loop keeps a plain `poll → draw → present` shape.

mod runtime;

pub use runtime::{bootstrap, GlWindow, RuntimeConfig};
