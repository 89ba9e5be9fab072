//! Register: TILE

use crate::reg::{extract, insert};

/// TILE
///
/// Tile origin of the next triangle. Each field holds bits [15:6] of the
/// tile's first pixel coordinate (64-pixel granularity).
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct TileReg(u32);

impl crate::reg::Register for TileReg {
    type Regwidth = u32;

    fn from_raw(val: Self::Regwidth) -> Self {
        Self(val)
    }

    fn to_raw(self) -> Self::Regwidth {
        self.0
    }
}

impl TileReg {
    pub const TILE_X_OFFSET: usize = 6;
    pub const TILE_X_WIDTH: usize = 10;
    pub const TILE_X_MASK: u32 = 0x3FF;

    pub const TILE_Y_OFFSET: usize = 22;
    pub const TILE_Y_WIDTH: usize = 10;
    pub const TILE_Y_MASK: u32 = 0x3FF;

    #[must_use]
    pub fn new(tile_x: u16, tile_y: u16) -> Self {
        let mut reg = Self::default();
        reg.set_tile_x(tile_x);
        reg.set_tile_y(tile_y);
        reg
    }

    /// TILE_X
    #[inline(always)]
    #[must_use]
    pub fn tile_x(&self) -> u16 {
        extract(self.0, Self::TILE_X_OFFSET, Self::TILE_X_MASK) as u16
    }

    /// TILE_X
    #[inline(always)]
    pub fn set_tile_x(&mut self, val: u16) {
        self.0 = insert(self.0, Self::TILE_X_OFFSET, Self::TILE_X_MASK, u32::from(val));
    }

    /// TILE_Y
    #[inline(always)]
    #[must_use]
    pub fn tile_y(&self) -> u16 {
        extract(self.0, Self::TILE_Y_OFFSET, Self::TILE_Y_MASK) as u16
    }

    /// TILE_Y
    #[inline(always)]
    pub fn set_tile_y(&mut self, val: u16) {
        self.0 = insert(self.0, Self::TILE_Y_OFFSET, Self::TILE_Y_MASK, u32::from(val));
    }
}

impl core::fmt::Debug for TileReg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileReg")
            .field("tile_x", &self.tile_x())
            .field("tile_y", &self.tile_y())
            .finish()
    }
}
