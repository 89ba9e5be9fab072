//! Built-in scenes.

use nz_twin_core::{Point, TileOrigin, Triangle, TILE_SIZE};

use crate::twin::RenderJob;

/// Ring of points the demo fan is built on, relative to the tile origin.
const FAN_RIM: [(i16, i16); 8] = [
    (0, 0),
    (32, 0),
    (63, 0),
    (63, 32),
    (63, 63),
    (32, 63),
    (0, 63),
    (0, 32),
];

/// Eight triangles fanned around an off-centre hub, covering the tile.
/// Neighbours share edges, so every covered pixel belongs to exactly one.
pub fn demo_fan(tile: TileOrigin) -> Vec<RenderJob> {
    let ox = tile.pixel_x();
    let oy = tile.pixel_y();
    let at = |(x, y): (i16, i16)| Point::new(ox.wrapping_add(x), oy.wrapping_add(y));
    let hub = at((27, 36));
    (0..FAN_RIM.len())
        .map(|i| {
            let a = at(FAN_RIM[i]);
            let b = at(FAN_RIM[(i + 1) % FAN_RIM.len()]);
            RenderJob::new(Triangle::new(hub, a, b).front_facing(), tile)
        })
        .collect()
}

/// A thin sliver, a tiny triangle and one larger than the tile.
pub fn demo_mixed(tile: TileOrigin) -> Vec<RenderJob> {
    let ox = tile.pixel_x();
    let oy = tile.pixel_y();
    let size = TILE_SIZE as i16;
    let tri = |c: [i16; 6]| {
        let shifted = [
            ox.wrapping_add(c[0]),
            oy.wrapping_add(c[1]),
            ox.wrapping_add(c[2]),
            oy.wrapping_add(c[3]),
            ox.wrapping_add(c[4]),
            oy.wrapping_add(c[5]),
        ];
        RenderJob::new(Triangle::from_coords(shifted).front_facing(), tile)
    };
    vec![
        tri([2, 60, 61, 50, 3, 62]),
        tri([40, 8, 44, 8, 40, 12]),
        tri([-size, 10, size * 2, -size, 30, size * 2]),
    ]
}
