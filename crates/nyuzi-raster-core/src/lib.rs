//! Host-side driver for the rasterizer unit, generic over [`RegisterPort`].
//!
//! [`RegisterPort`]: nyuzi_raster_hal::RegisterPort

pub mod driver;
pub mod error;

pub use driver::{DriverConfig, PatchList, PatchPoll, RasterDriver};
pub use error::DriverError;
