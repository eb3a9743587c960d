//! Lumen engine crate.
//!
//! Owns the window, the OpenGL context and the quad renderer used by the
//! `lumen-quad` binary.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod paint;
pub mod render;
