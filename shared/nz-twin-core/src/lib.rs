//! Shared types for the Nyuzi rasterizer digital twin.
//!
//! Coordinates follow the hardware: signed 16-bit pixel positions, Y+ down.
//! A tile is 64x64 pixels addressed by bits [15:6] of a pixel coordinate; a
//! patch is the 4x4-pixel block the rasterizer reports coverage for.

pub mod coverage;
pub mod reference;
pub mod rng;

pub use coverage::{CoverageMask, PatchCoverage, TileCoverage};

/// Number of independent rendering contexts sharing the datapath.
pub const NUM_CONTEXTS: usize = 4;

/// Patch edge length in pixels, as a shift.
pub const PATCH_SHIFT: u32 = 2;
/// Patch edge length in pixels.
pub const PATCH_SIZE: usize = 1 << PATCH_SHIFT;

/// Tile edge length in pixels, as a shift.
pub const TILE_SHIFT: u32 = 6;
/// Tile edge length in pixels.
pub const TILE_SIZE: usize = 1 << TILE_SHIFT;

/// Patches along one tile edge.
pub const TILE_PATCHES: usize = TILE_SIZE / PATCH_SIZE;

/// Upper bound on patches a single triangle can visit inside one tile.
pub const MAX_PATCHES_PER_TILE: usize = TILE_PATCHES * TILE_PATCHES;

/// Width of the tile origin fields (bits [15:6] of a coordinate).
pub const TILE_FIELD_MASK: u16 = 0x3FF;

/// 4-bit patch offset mask.
pub const PATCH_FIELD_MASK: u8 = 0xF;

/// A pixel position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Three vertices. Front-facing triangles wind counter-clockwise on screen
/// (Y+ down), which is the side where every edge function is non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    pub const fn new(v1: Point, v2: Point, v3: Point) -> Self {
        Self {
            vertices: [v1, v2, v3],
        }
    }

    /// Build from `[x1, y1, x2, y2, x3, y3]`.
    pub const fn from_coords(c: [i16; 6]) -> Self {
        Self::new(
            Point::new(c[0], c[1]),
            Point::new(c[2], c[3]),
            Point::new(c[4], c[5]),
        )
    }

    /// Directed edges in hardware order: v1->v2, v2->v3, v3->v1.
    pub fn edges(&self) -> [(Point, Point); 3] {
        let [v1, v2, v3] = self.vertices;
        [(v1, v2), (v2, v3), (v3, v1)]
    }

    pub fn xs(&self) -> [i16; 3] {
        self.vertices.map(|v| v.x)
    }

    pub fn ys(&self) -> [i16; 3] {
        self.vertices.map(|v| v.y)
    }

    /// Twice the signed area in Y+ down space. Negative for front-facing
    /// (counter-clockwise on screen) triangles.
    pub fn signed_area2(&self) -> i64 {
        let [v1, v2, v3] = self.vertices;
        let d = |a: i16, b: i16| i64::from(a) - i64::from(b);
        let (ax, ay) = (d(v2.x, v1.x), d(v2.y, v1.y));
        let (bx, by) = (d(v3.x, v1.x), d(v3.y, v1.y));
        ax * by - ay * bx
    }

    /// The same triangle, with v2 and v3 swapped if it faces away.
    pub fn front_facing(&self) -> Self {
        if self.signed_area2() > 0 {
            let [v1, v2, v3] = self.vertices;
            Self::new(v1, v3, v2)
        } else {
            *self
        }
    }
}

/// Tile origin as the two 10-bit fields the host writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileOrigin {
    tile_x: u16,
    tile_y: u16,
}

impl TileOrigin {
    /// Fields are truncated to 10 bits.
    pub const fn new(tile_x: u16, tile_y: u16) -> Self {
        Self {
            tile_x: tile_x & TILE_FIELD_MASK,
            tile_y: tile_y & TILE_FIELD_MASK,
        }
    }

    /// Tile containing the given pixel.
    pub const fn containing(p: Point) -> Self {
        Self::new((p.x as u16) >> TILE_SHIFT, (p.y as u16) >> TILE_SHIFT)
    }

    pub const fn tile_x(&self) -> u16 {
        self.tile_x
    }

    pub const fn tile_y(&self) -> u16 {
        self.tile_y
    }

    /// Pixel coordinate of the tile's left column.
    pub const fn pixel_x(&self) -> i16 {
        (self.tile_x << TILE_SHIFT) as i16
    }

    /// Pixel coordinate of the tile's top row.
    pub const fn pixel_y(&self) -> i16 {
        (self.tile_y << TILE_SHIFT) as i16
    }

    /// Absolute upper-left pixel of a patch inside this tile.
    pub const fn patch_corner(&self, patch: PatchCoord) -> Point {
        let x = (self.tile_x << TILE_SHIFT) | (((patch.x & PATCH_FIELD_MASK) as u16) << PATCH_SHIFT);
        let y = (self.tile_y << TILE_SHIFT) | (((patch.y & PATCH_FIELD_MASK) as u16) << PATCH_SHIFT);
        Point::new(x as i16, y as i16)
    }
}

/// Patch offset inside a tile, 0-15 on each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchCoord {
    pub x: u8,
    pub y: u8,
}

impl PatchCoord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self {
            x: x & PATCH_FIELD_MASK,
            y: y & PATCH_FIELD_MASK,
        }
    }
}

/// Patch-grid bounding box, inclusive on all sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub left: u8,
    pub right: u8,
    pub top: u8,
    pub bot: u8,
}

impl BoundingBox {
    pub const fn width(&self) -> usize {
        self.right.saturating_sub(self.left) as usize + 1
    }

    pub const fn height(&self) -> usize {
        self.bot.saturating_sub(self.top) as usize + 1
    }

    pub const fn patch_count(&self) -> usize {
        self.width() * self.height()
    }

    pub const fn contains(&self, patch: PatchCoord) -> bool {
        patch.x >= self.left && patch.x <= self.right && patch.y >= self.top && patch.y <= self.bot
    }

    /// Patches in visiting order: right along a row, then down.
    pub fn patches(&self) -> impl Iterator<Item = PatchCoord> + '_ {
        (self.top..=self.bot)
            .flat_map(move |y| (self.left..=self.right).map(move |x| PatchCoord::new(x, y)))
    }
}
