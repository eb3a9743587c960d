/// Fatal failures while bringing up the window and its OpenGL context.
///
/// Nothing downstream can work without a context, so callers are expected to
/// terminate the process on any of these.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window or pick a GL config: {0}")]
    Window(String),

    #[error("window handle unavailable: {0}")]
    Handle(#[from] raw_window_handle::HandleError),

    #[error("failed to create OpenGL {major}.{minor} context: {source}")]
    Context {
        major: u8,
        minor: u8,
        #[source]
        source: glutin::error::Error,
    },

    #[error("failed to create window surface: {0}")]
    Surface(#[source] glutin::error::Error),

    #[error("failed to make context current: {0}")]
    MakeCurrent(#[source] glutin::error::Error),

    #[error("loaded OpenGL {found} but {required} or newer is required")]
    UnsupportedVersion { found: String, required: String },

    #[error("event loop exited with code {0} before the window was ready")]
    Exited(i32),

    #[error("event loop never resumed; no window was created")]
    NotResumed,
}
