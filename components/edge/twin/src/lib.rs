//! Edge units of the rasterizer.
//!
//! - [`mask`]: combinational 4x4 coverage test for one edge (`one_edge_mask`).
//! - [`setup`]: edge coefficient setup on a shared multiply/add datapath
//!   (`one_edge_setup`).

pub mod mask;
pub mod setup;

pub use mask::edge_mask;
pub use setup::{bias, setup_direct, EdgeEquation, EdgeInput, EdgeRegs, EdgeSetupUnit, SETUP_PHASES};
