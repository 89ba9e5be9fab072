//! Bounding box units (`box_left`, `box_right`).
//!
//! Each reduces three vertex coordinates on one axis to a 4-bit patch offset
//! inside the tile: the extreme coordinate is clamped to the tile's pixel
//! range, rebased to the tile's first pixel, and bits [5:2] are kept. The
//! rasterizer feeds Y coordinates in state 29 and X coordinates in state 30;
//! bit 0 of the state selects the axis.

use nz_twin_core::{
    BoundingBox, TileOrigin, Triangle, PATCH_FIELD_MASK, PATCH_SHIFT, TILE_FIELD_MASK, TILE_SHIFT,
    TILE_SIZE,
};

/// Axis a bounding-box state reduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// State 29 (odd) computes top/bot, state 30 (even) left/right.
    pub const fn from_state(state: u8) -> Self {
        if state & 1 == 1 {
            Axis::Y
        } else {
            Axis::X
        }
    }
}

/// First and last pixel of a tile along one axis.
pub const fn tile_span(tile_field: u16) -> (i16, i16) {
    let first = ((tile_field & TILE_FIELD_MASK) << TILE_SHIFT) as i16;
    (first, first | (TILE_SIZE as i16 - 1))
}

fn to_patch(coord: i16, tile_field: u16) -> u8 {
    let (first, last) = tile_span(tile_field);
    let clamped = coord.clamp(first, last);
    ((clamped.wrapping_sub(first) >> PATCH_SHIFT) as u8) & PATCH_FIELD_MASK
}

/// Patch offset of the smallest coordinate.
pub fn box_left(tile_field: u16, coords: [i16; 3]) -> u8 {
    let min = coords[0].min(coords[1]).min(coords[2]);
    to_patch(min, tile_field)
}

/// Patch offset of the largest coordinate.
pub fn box_right(tile_field: u16, coords: [i16; 3]) -> u8 {
    let max = coords[0].max(coords[1]).max(coords[2]);
    to_patch(max, tile_field)
}

/// Both reductions for one axis: `(low, high)`.
pub fn axis_bounds(tile: TileOrigin, tri: &Triangle, axis: Axis) -> (u8, u8) {
    let (field, coords) = match axis {
        Axis::X => (tile.tile_x(), tri.xs()),
        Axis::Y => (tile.tile_y(), tri.ys()),
    };
    (box_left(field, coords), box_right(field, coords))
}

/// Full patch bounding box of a triangle within a tile.
pub fn bounding_box(tile: TileOrigin, tri: &Triangle) -> BoundingBox {
    let (left, right) = axis_bounds(tile, tri, Axis::X);
    let (top, bot) = axis_bounds(tile, tri, Axis::Y);
    BoundingBox {
        left,
        right,
        top,
        bot,
    }
}
