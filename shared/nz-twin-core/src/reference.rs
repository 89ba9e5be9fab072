//! Scalar reference evaluators used to check the hardware model.
//!
//! Everything here is computed per pixel in exact 64-bit arithmetic with no
//! incremental stepping, so it shares no code path with the datapath it
//! checks. Results match the hardware whenever the 32-bit edge values do not
//! wrap, which holds for coordinates within +/-8192.

use crate::{CoverageMask, Point, TileCoverage, TileOrigin, Triangle, PATCH_SIZE, TILE_SIZE};

/// Tie-break bias for a directed edge: 1 for edges that go down the screen,
/// or run horizontally right-to-left (including zero-length edges).
pub fn edge_bias(p1: Point, p2: Point) -> i64 {
    let down = p1.y < p2.y;
    let flat_leftward = p1.y == p2.y && p2.x <= p1.x;
    i64::from(down || flat_leftward)
}

/// `A*x - B*y + C` for the directed edge, bias included.
pub fn edge_value(p1: Point, p2: Point, x: i64, y: i64) -> i64 {
    let a = i64::from(p2.y) - i64::from(p1.y);
    let b = i64::from(p2.x) - i64::from(p1.x);
    let c = b * i64::from(p1.y) - a * i64::from(p1.x) - edge_bias(p1, p2);
    a * x - b * y + c
}

/// Whether the pixel at (x, y) is inside all three edges.
pub fn covers_pixel(tri: &Triangle, x: i64, y: i64) -> bool {
    tri.edges()
        .iter()
        .all(|&(p1, p2)| edge_value(p1, p2, x, y) >= 0)
}

/// Mask for a single edge evaluated directly from (A, B, D).
pub fn edge_mask(a: i16, b: i16, d: i32) -> CoverageMask {
    let mut mask = CoverageMask::EMPTY;
    for y in 0..PATCH_SIZE {
        for x in 0..PATCH_SIZE {
            let v = i64::from(a) * x as i64 - i64::from(b) * y as i64 + i64::from(d);
            // The hardware evaluates in 32 bits.
            if (v as i32) >= 0 {
                mask.set(x, y);
            }
        }
    }
    mask
}

/// Full-tile coverage of a triangle by brute force.
pub fn rasterize_tile(tri: &Triangle, tile: TileOrigin) -> TileCoverage {
    let ox = i64::from(tile.pixel_x());
    let oy = i64::from(tile.pixel_y());
    let mut out = TileCoverage::new();
    for y in 0..TILE_SIZE {
        for x in 0..TILE_SIZE {
            if covers_pixel(tri, ox + x as i64, oy + y as i64) {
                out.set(x, y);
            }
        }
    }
    out
}
