//! Register: STATUS

use crate::reg::{extract, insert};

/// STATUS
///
/// Coverage mask of the patch the context is holding, plus flags.
/// DONE reads as set only while the context is idle with no start pending.
/// MASK is stale unless MASK_VALID is set.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct StatusReg(u32);

impl crate::reg::Register for StatusReg {
    type Regwidth = u32;

    fn from_raw(val: Self::Regwidth) -> Self {
        Self(val)
    }

    fn to_raw(self) -> Self::Regwidth {
        self.0
    }
}

impl StatusReg {
    pub const MASK_OFFSET: usize = 0;
    pub const MASK_WIDTH: usize = 16;
    pub const MASK_MASK: u32 = 0xFFFF;

    pub const DONE_OFFSET: usize = 16;
    pub const DONE_WIDTH: usize = 1;
    pub const DONE_MASK: u32 = 0x1;

    pub const MASK_VALID_OFFSET: usize = 17;
    pub const MASK_VALID_WIDTH: usize = 1;
    pub const MASK_VALID_MASK: u32 = 0x1;

    /// MASK
    #[inline(always)]
    #[must_use]
    pub fn mask(&self) -> u16 {
        extract(self.0, Self::MASK_OFFSET, Self::MASK_MASK) as u16
    }

    /// MASK
    #[inline(always)]
    pub fn set_mask(&mut self, val: u16) {
        self.0 = insert(self.0, Self::MASK_OFFSET, Self::MASK_MASK, u32::from(val));
    }

    /// DONE
    #[inline(always)]
    #[must_use]
    pub fn done(&self) -> bool {
        extract(self.0, Self::DONE_OFFSET, Self::DONE_MASK) != 0
    }

    /// DONE
    #[inline(always)]
    pub fn set_done(&mut self, val: bool) {
        self.0 = insert(self.0, Self::DONE_OFFSET, Self::DONE_MASK, u32::from(val));
    }

    /// MASK_VALID
    #[inline(always)]
    #[must_use]
    pub fn mask_valid(&self) -> bool {
        extract(self.0, Self::MASK_VALID_OFFSET, Self::MASK_VALID_MASK) != 0
    }

    /// MASK_VALID
    #[inline(always)]
    pub fn set_mask_valid(&mut self, val: bool) {
        self.0 = insert(
            self.0,
            Self::MASK_VALID_OFFSET,
            Self::MASK_VALID_MASK,
            u32::from(val),
        );
    }
}

impl core::fmt::Debug for StatusReg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StatusReg")
            .field("mask", &format_args!("{:#06x}", self.mask()))
            .field("done", &self.done())
            .field("mask_valid", &self.mask_valid())
            .finish()
    }
}
