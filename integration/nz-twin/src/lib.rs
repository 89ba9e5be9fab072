//! Digital twin of the rasterizer unit.
//!
//! [`SimPort`] exposes a simulated [`RasterizerUnit`] as a
//! [`RegisterPort`](nyuzi_raster_hal::RegisterPort), so the same host driver
//! that would run against hardware runs against the model. [`Twin`] bundles
//! the two with a [`TwinConfig`] and adds reference checking and PNG output.
//!
//! [`RasterizerUnit`]: nz_rasterizer::RasterizerUnit

pub mod config;
pub mod error;
pub mod image_out;
pub mod port;
pub mod scene;
pub mod twin;

pub use config::TwinConfig;
pub use error::TwinError;
pub use port::SimPort;
pub use twin::{verify, RenderJob, Twin, TriangleResult};
