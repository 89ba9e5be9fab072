//! Host register port of the unit.
//!
//! Writes land in the addressed context immediately, whatever its sequencer
//! is doing. Rewriting a context's vertices or tile mid-triangle corrupts that
//! triangle's remaining masks.

use nz_twin_core::{Point, TileOrigin};
use raster_registers::{PositionReg, RegAddr, RegSelect, Register, StatusReg, TileReg, VertexReg};

use crate::context::Context;
use crate::state;
use crate::unit::RasterizerUnit;

impl Context {
    /// Only a mask parked in the wait state can be acknowledged.
    fn holds_mask(&self) -> bool {
        self.state == state::WAIT && self.mask_valid
    }

    fn status(&self) -> StatusReg {
        let mut status = StatusReg::default();
        status.set_mask(self.mask.0);
        status.set_done(self.host_done());
        status.set_mask_valid(self.mask_valid);
        status
    }

    fn position(&self) -> PositionReg {
        PositionReg::new(
            self.tile.tile_x(),
            self.patch.x,
            self.tile.tile_y(),
            self.patch.y,
        )
    }
}

impl RasterizerUnit {
    /// Host write. `context` and `offset` are truncated to 2 and 4 bits.
    pub fn write(&mut self, context: u8, offset: u8, data: u32) {
        let addr = RegAddr::new(context, offset);
        let ctx = self.context_mut(addr.context());
        match addr.select() {
            RegSelect::Tile => {
                let tile = TileReg::from_raw(data);
                ctx.tile = TileOrigin::new(tile.tile_x(), tile.tile_y());
            }
            select => {
                let vertex = VertexReg::from_raw(data);
                let index = usize::from(select.bits() - RegSelect::Vertex1.bits());
                ctx.triangle.vertices[index] = Point::new(vertex.x(), vertex.y());
            }
        }
        if addr.strobe() {
            ctx.start = true;
        }
        log::trace!(
            "write ctx {} offset {:#x} data {data:#010x}",
            addr.context(),
            addr.offset()
        );
    }

    /// Host read. A strobed read returns the current value, then requests the
    /// context to move past the mask it is holding. With no mask held the
    /// strobe is dropped.
    pub fn read(&mut self, context: u8, offset: u8) -> u32 {
        let addr = RegAddr::new(context, offset);
        let ctx = self.context_mut(addr.context());
        let value = match addr.select() {
            RegSelect::Tile => ctx.position().to_raw(),
            RegSelect::Vertex1 => ctx.status().to_raw(),
            RegSelect::Vertex2 | RegSelect::Vertex3 => 0,
        };
        if addr.strobe() && ctx.holds_mask() {
            ctx.advance = true;
        }
        value
    }
}
