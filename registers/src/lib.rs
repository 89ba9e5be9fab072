//! Register map of the rasterizer unit.
//!
//! The host addresses a register with a 2-bit context select and a 4-bit
//! offset. Offset bits [2:1] pick the register, bit 3 is a strobe: on a write
//! it requests a start, on a read it acknowledges the mask being read.
#![no_std]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::identity_op)]
#![allow(clippy::inline_always)]

pub mod components;
pub mod reg;

pub use crate::components::raster_regs::{RegAddr, RegSelect};
pub use crate::components::raster_regs::{
    CONTEXT_MASK, OFFSET_MASK, POSITION, STATUS, STROBE, TILE, VERTEX1, VERTEX2, VERTEX3,
};
pub use crate::components::raster_regs::{PositionReg, StatusReg, TileReg, VertexReg};
pub use crate::reg::Register;
