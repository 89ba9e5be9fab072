//! Register block definitions

pub mod raster_regs;
