//! Coverage masks at patch and tile granularity.

use crate::{PatchCoord, PATCH_SHIFT, PATCH_SIZE, TILE_SIZE};

/// 4x4 coverage mask. Bit `y * 4 + x` covers the pixel at (x, y) relative to
/// the patch's upper-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageMask(pub u16);

impl CoverageMask {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(0xFFFF);

    /// Bit index of pixel (x, y) inside a patch.
    pub const fn bit(x: usize, y: usize) -> usize {
        y * PATCH_SIZE + x
    }

    pub const fn covers(&self, x: usize, y: usize) -> bool {
        (self.0 >> Self::bit(x, y)) & 1 != 0
    }

    pub fn set(&mut self, x: usize, y: usize) {
        self.0 |= 1 << Self::bit(x, y);
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Covered pixels as (x, y) offsets inside the patch.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..PATCH_SIZE * PATCH_SIZE)
            .filter(move |i| (self.0 >> i) & 1 != 0)
            .map(|i| (i % PATCH_SIZE, i / PATCH_SIZE))
    }
}

impl core::fmt::Display for CoverageMask {
    /// Four rows, top first, `#` for covered pixels.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for y in 0..PATCH_SIZE {
            for x in 0..PATCH_SIZE {
                f.write_str(if self.covers(x, y) { "#" } else { "." })?;
            }
            if y + 1 < PATCH_SIZE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// One delivered patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchCoverage {
    pub patch: PatchCoord,
    pub mask: CoverageMask,
}

/// Per-pixel coverage of a whole 64x64 tile, one `u64` per row.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TileCoverage {
    rows: [u64; TILE_SIZE],
}

impl Default for TileCoverage {
    fn default() -> Self {
        Self {
            rows: [0; TILE_SIZE],
        }
    }
}

impl TileCoverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel coordinates are tile-relative (0..64).
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < TILE_SIZE && y < TILE_SIZE && (self.rows[y] >> x) & 1 != 0
    }

    pub fn set(&mut self, x: usize, y: usize) {
        if x < TILE_SIZE && y < TILE_SIZE {
            self.rows[y] |= 1 << x;
        }
    }

    /// OR a patch mask into the tile.
    pub fn merge_patch(&mut self, coverage: &PatchCoverage) {
        let base_x = usize::from(coverage.patch.x) << PATCH_SHIFT;
        let base_y = usize::from(coverage.patch.y) << PATCH_SHIFT;
        for (x, y) in coverage.mask.pixels() {
            self.set(base_x + x, base_y + y);
        }
    }

    pub fn count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Pixels covered by both.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::default();
        for (o, (a, b)) in out.rows.iter_mut().zip(self.rows.iter().zip(other.rows.iter())) {
            *o = a & b;
        }
        out
    }

    /// Covered pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, &row)| {
            (0..TILE_SIZE)
                .filter(move |x| (row >> x) & 1 != 0)
                .map(move |x| (x, y))
        })
    }
}

impl core::fmt::Debug for TileCoverage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileCoverage")
            .field("count", &self.count())
            .finish()
    }
}
