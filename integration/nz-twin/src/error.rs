use std::convert::Infallible;

use nyuzi_raster_core::DriverError;

/// Errors that can occur while running the twin.
#[derive(Debug, thiserror::Error)]
pub enum TwinError {
    /// I/O error writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode an output image.
    #[error("Image encode error: {0}")]
    Image(#[from] image::ImageError),

    /// The host driver gave up.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError<Infallible>),

    /// Delivered coverage differs from the per-pixel reference.
    #[error(
        "Coverage mismatch for triangle {index} in tile ({tile_x}, {tile_y}): \
         {missing} pixels missing, {extra} extra"
    )]
    CoverageMismatch {
        index: usize,
        tile_x: u16,
        tile_y: u16,
        missing: u32,
        extra: u32,
    },

    /// Settings out of range.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
