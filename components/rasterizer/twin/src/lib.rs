//! Multi-context triangle rasterizer unit.
//!
//! Four contexts share one edge setup datapath. Each cycle the
//! [`ContextArbiter`](nz_arbiter::ContextArbiter) grants one context, and only
//! that context's sequencer advances. A context walks a fixed state sequence:
//!
//! ```text
//! 31 idle --start--> 29 box Y -> 30 box X -> 0..23 edge setup
//!      -> 24..26 edge masks -> 27 wait for host -> 28 next patch
//!      -> 24 (more patches) | 31 (done)
//! ```
//!
//! The host drives the unit through [`RasterizerUnit::write`] and
//! [`RasterizerUnit::read`].

pub mod context;
mod port;
pub mod state;
pub mod unit;

pub use context::Context;
pub use state::State;
pub use unit::RasterizerUnit;
