/// Errors from driver operations, generic over the port's error type.
#[derive(Debug, thiserror::Error)]
pub enum DriverError<E: core::fmt::Debug> {
    /// The register port failed.
    #[error("register port error: {0:?}")]
    Transport(E),

    /// The context has not finished its previous triangle.
    #[error("context {0} is still rasterizing")]
    ContextBusy(u8),

    /// Context index outside 0..4.
    #[error("invalid context {0}")]
    InvalidContext(u8),

    /// No mask and no completion within the configured poll limit.
    #[error("context {context} made no progress after {polls} status polls")]
    Timeout { context: u8, polls: u32 },

    /// More patches delivered than fit in one tile.
    #[error("context {context} delivered more than {limit} patches")]
    TooManyPatches { context: u8, limit: usize },
}

impl<E: core::fmt::Debug> From<E> for DriverError<E> {
    fn from(e: E) -> Self {
        DriverError::Transport(e)
    }
}
