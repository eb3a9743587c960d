use anyhow::Result;

use super::app::{AppControl, LoopState};

/// Something that drives frames: a window with an event queue and a back buffer.
pub trait FrameSource {
    /// Dispatches pending OS events without blocking.
    fn poll_events(&mut self);

    /// Returns true once the window's close flag has been set.
    fn close_requested(&self) -> bool;

    /// Returns the new drawable size in physical pixels if it changed since
    /// the last call.
    fn take_resize(&mut self) -> Option<(u32, u32)> {
        None
    }

    /// Presents the back buffer.
    fn present(&mut self) -> Result<()>;
}

/// Per-frame input handed to the draw callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameInput {
    /// Zero-based frame counter.
    pub index: u64,

    /// Set when the drawable was resized since the previous frame.
    pub resized: Option<(u32, u32)>,
}

/// Summary returned when the loop ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub final_state: LoopState,
}

/// Runs the render loop until the close flag is set.
///
/// Each iteration polls events, checks the close flag, draws and presents.
/// The flag is checked once per iteration, right after polling, so a close
/// request never results in another presented frame.
pub fn run_frames<S, F>(source: &mut S, mut draw: F) -> Result<FrameStats>
where
    S: FrameSource,
    F: FnMut(FrameInput) -> AppControl,
{
    let mut state = LoopState::Running;
    let mut frames = 0u64;

    while state.is_running() {
        source.poll_events();

        state = state.next(source.close_requested());
        if !state.is_running() {
            break;
        }

        let input = FrameInput {
            index: frames,
            resized: source.take_resize(),
        };

        let control = draw(input);
        source.present()?;
        frames += 1;

        state = state.next(control == AppControl::Exit);
    }

    Ok(FrameStats {
        frames,
        final_state: state,
    })
}
