//! Core loop contracts.
//!
//! Defines the seam between the platform window (something that can poll
//! events, report a close request and present) and the per-frame drawing code.
//! Keeping the loop generic over [`FrameSource`] lets it run against a scripted
//! source in tests.

mod app;
mod frame_loop;

pub use app::{AppControl, LoopState};
pub use frame_loop::{run_frames, FrameInput, FrameSource, FrameStats};
