/// Control directive returned by per-frame callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Render loop state.
///
/// `Running` moves to `Closing` exactly once, when the close flag is observed
/// (or a frame asks to exit). `Closing` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Closing,
}

impl LoopState {
    #[inline]
    pub fn next(self, close_requested: bool) -> Self {
        match self {
            LoopState::Running if close_requested => LoopState::Closing,
            other => other,
        }
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}
