//! Register: VERTEX

use crate::reg::{extract, insert};

/// VERTEX
///
/// One triangle vertex, signed 16-bit pixel coordinates, Y+ down.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VertexReg(u32);

impl crate::reg::Register for VertexReg {
    type Regwidth = u32;

    fn from_raw(val: Self::Regwidth) -> Self {
        Self(val)
    }

    fn to_raw(self) -> Self::Regwidth {
        self.0
    }
}

impl VertexReg {
    pub const X_OFFSET: usize = 0;
    pub const X_WIDTH: usize = 16;
    pub const X_MASK: u32 = 0xFFFF;

    pub const Y_OFFSET: usize = 16;
    pub const Y_WIDTH: usize = 16;
    pub const Y_MASK: u32 = 0xFFFF;

    #[must_use]
    pub fn new(x: i16, y: i16) -> Self {
        let mut reg = Self::default();
        reg.set_x(x);
        reg.set_y(y);
        reg
    }

    /// X
    #[inline(always)]
    #[must_use]
    pub fn x(&self) -> i16 {
        extract(self.0, Self::X_OFFSET, Self::X_MASK) as u16 as i16
    }

    /// X
    #[inline(always)]
    pub fn set_x(&mut self, val: i16) {
        self.0 = insert(self.0, Self::X_OFFSET, Self::X_MASK, u32::from(val as u16));
    }

    /// Y
    #[inline(always)]
    #[must_use]
    pub fn y(&self) -> i16 {
        extract(self.0, Self::Y_OFFSET, Self::Y_MASK) as u16 as i16
    }

    /// Y
    #[inline(always)]
    pub fn set_y(&mut self, val: i16) {
        self.0 = insert(self.0, Self::Y_OFFSET, Self::Y_MASK, u32::from(val as u16));
    }
}

impl core::fmt::Debug for VertexReg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VertexReg")
            .field("x", &self.x())
            .field("y", &self.y())
            .finish()
    }
}
