/// Initialization parameters for the OpenGL layer.
///
/// Keep this structure minimal. Add flags only when a concrete platform
/// requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested context version as `(major, minor)`.
    pub version: (u8, u8),

    /// Request a core profile (no fixed-function compatibility entry points).
    pub core_profile: bool,

    /// Synchronize buffer swaps with the display refresh when supported.
    ///
    /// This is the only frame pacing the render loop has.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            core_profile: true,
            vsync: true,
        }
    }
}
