//! Register: POSITION

use crate::reg::{extract, insert};

/// POSITION
///
/// Absolute pixel position of the patch the context is on:
/// `[15:0] = {tile_x, patch_x, 00}`, `[31:16] = {tile_y, patch_y, 00}`.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct PositionReg(u32);

impl crate::reg::Register for PositionReg {
    type Regwidth = u32;

    fn from_raw(val: Self::Regwidth) -> Self {
        Self(val)
    }

    fn to_raw(self) -> Self::Regwidth {
        self.0
    }
}

impl PositionReg {
    pub const PATCH_X_OFFSET: usize = 2;
    pub const PATCH_X_WIDTH: usize = 4;
    pub const PATCH_X_MASK: u32 = 0xF;

    pub const TILE_X_OFFSET: usize = 6;
    pub const TILE_X_WIDTH: usize = 10;
    pub const TILE_X_MASK: u32 = 0x3FF;

    pub const PATCH_Y_OFFSET: usize = 18;
    pub const PATCH_Y_WIDTH: usize = 4;
    pub const PATCH_Y_MASK: u32 = 0xF;

    pub const TILE_Y_OFFSET: usize = 22;
    pub const TILE_Y_WIDTH: usize = 10;
    pub const TILE_Y_MASK: u32 = 0x3FF;

    #[must_use]
    pub fn new(tile_x: u16, patch_x: u8, tile_y: u16, patch_y: u8) -> Self {
        let mut reg = Self::default();
        reg.set_tile_x(tile_x);
        reg.set_patch_x(patch_x);
        reg.set_tile_y(tile_y);
        reg.set_patch_y(patch_y);
        reg
    }

    /// PATCH_X
    #[inline(always)]
    #[must_use]
    pub fn patch_x(&self) -> u8 {
        extract(self.0, Self::PATCH_X_OFFSET, Self::PATCH_X_MASK) as u8
    }

    /// PATCH_X
    #[inline(always)]
    pub fn set_patch_x(&mut self, val: u8) {
        self.0 = insert(self.0, Self::PATCH_X_OFFSET, Self::PATCH_X_MASK, u32::from(val));
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

    /// PATCH_Y
    #[inline(always)]
    #[must_use]
    pub fn patch_y(&self) -> u8 {
        extract(self.0, Self::PATCH_Y_OFFSET, Self::PATCH_Y_MASK) as u8
    }

    /// PATCH_Y
    #[inline(always)]
    pub fn set_patch_y(&mut self, val: u8) {
        self.0 = insert(self.0, Self::PATCH_Y_OFFSET, Self::PATCH_Y_MASK, u32::from(val));
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

    /// Pixel X of the patch's upper-left corner.
    #[inline(always)]
    #[must_use]
    pub fn x(&self) -> i16 {
        (self.0 & 0xFFFF) as u16 as i16
    }

    /// Pixel Y of the patch's upper-left corner.
    #[inline(always)]
    #[must_use]
    pub fn y(&self) -> i16 {
        (self.0 >> 16) as u16 as i16
    }
}

impl core::fmt::Debug for PositionReg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PositionReg")
            .field("tile_x", &self.tile_x())
            .field("patch_x", &self.patch_x())
            .field("tile_y", &self.tile_y())
            .field("patch_y", &self.patch_y())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reg::Register;

    #[test]
    fn test_default() {
        let reg = PositionReg::default();
        assert_eq!(reg.x(), 0);
        assert_eq!(reg.y(), 0);
    }

    #[test]
    fn test_packing() {
        let reg = PositionReg::new(1, 3, 2, 15);
        assert_eq!(reg.x(), 64 + 12);
        assert_eq!(reg.y(), 128 + 60);
        assert_eq!(reg.to_raw() & 0x3, 0);
        assert_eq!(reg.to_raw() & 0x3_0000, 0);
    }
}
