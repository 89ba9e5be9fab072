/// Twin settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwinConfig {
    /// Unit clocks elapsed per host register access.
    pub cycles_per_access: u32,
    /// Driver status polls without progress before giving up.
    pub poll_limit: u32,
    /// Output pixels per rasterized pixel in PNG dumps.
    pub scale: u32,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            cycles_per_access: 1,
            poll_limit: 10_000,
            scale: 8,
        }
    }
}
