//! Single-edge coverage mask.

use nz_twin_core::{CoverageMask, PATCH_SIZE};

/// Coverage of one edge over a 4x4 patch.
///
/// `d` is the edge function at the patch's upper-left pixel. Bit `y*4 + x` is
/// set when `a*x - b*y + d >= 0`. Arithmetic wraps at 32 bits like the
/// hardware adders.
pub fn edge_mask(a: i16, b: i16, d: i32) -> CoverageMask {
    let a = i32::from(a);
    let b = i32::from(b);
    let mut bits = 0u16;
    let mut row = d;
    for y in 0..PATCH_SIZE {
        let mut v = row;
        for x in 0..PATCH_SIZE {
            if v >= 0 {
                bits |= 1 << CoverageMask::bit(x, y);
            }
            v = v.wrapping_add(a);
        }
        row = row.wrapping_sub(b);
    }
    CoverageMask(bits)
}
