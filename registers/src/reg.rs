//! Raw register access helpers.

use num_traits::PrimInt;

/// A packed register value.
pub trait Register: Copy + Default {
    /// Raw storage width of the register.
    type Regwidth: PrimInt;

    fn from_raw(val: Self::Regwidth) -> Self;

    fn to_raw(self) -> Self::Regwidth;
}

/// Read `mask`-wide field at `offset`.
#[inline(always)]
#[must_use]
pub fn extract<W: PrimInt>(raw: W, offset: usize, mask: W) -> W {
    (raw >> offset) & mask
}

/// Replace the `mask`-wide field at `offset`; excess value bits are dropped.
#[inline(always)]
#[must_use]
pub fn insert<W: PrimInt>(raw: W, offset: usize, mask: W, val: W) -> W {
    (raw & !(mask << offset)) | ((val & mask) << offset)
}
