//! End-to-end tests of the rasterizer unit through its register port.

use nz_rasterizer::{state, RasterizerUnit};
use nz_twin_core::{
    reference, BoundingBox, CoverageMask, PatchCoord, PatchCoverage, Point, TileCoverage,
    TileOrigin, Triangle, NUM_CONTEXTS,
};
use raster_registers::{
    PositionReg, Register, StatusReg, TileReg, VertexReg, POSITION, STATUS, STROBE, TILE,
    VERTEX1, VERTEX2, VERTEX3,
};

const CYCLE_LIMIT: usize = 200_000;

fn submit(unit: &mut RasterizerUnit, ctx: u8, tri: &Triangle, tile: TileOrigin) {
    let [v1, v2, v3] = tri.vertices.map(|v| VertexReg::new(v.x, v.y).to_raw());
    unit.write(ctx, TILE, TileReg::new(tile.tile_x(), tile.tile_y()).to_raw());
    unit.write(ctx, VERTEX1, v1);
    unit.write(ctx, VERTEX2, v2);
    unit.write(ctx, VERTEX3 | STROBE, v3);
}

/// Register-level host. Remembers the position of each context's last
/// acknowledged patch, since the unit keeps reporting that mask until the
/// context is next scheduled.
#[derive(Default)]
struct Host {
    unreleased: [Option<u32>; NUM_CONTEXTS],
}

impl Host {
    /// One host poll: takes and acknowledges a waiting mask. Returns `Err(())`
    /// once the context reports done.
    fn service(
        &mut self,
        unit: &mut RasterizerUnit,
        ctx: u8,
    ) -> Result<Option<PatchCoverage>, ()> {
        let slot = usize::from(ctx);
        let status = StatusReg::from_raw(unit.read(ctx, STATUS));
        if let Some(acked_at) = self.unreleased[slot] {
            if status.mask_valid() {
                if unit.read(ctx, POSITION) != acked_at {
                    self.unreleased[slot] = None;
                }
                return Ok(None);
            }
            self.unreleased[slot] = None;
        }
        if status.mask_valid() {
            let raw = unit.read(ctx, POSITION);
            let pos = PositionReg::from_raw(raw);
            let acked = StatusReg::from_raw(unit.read(ctx, STATUS | STROBE));
            self.unreleased[slot] = Some(raw);
            return Ok(Some(PatchCoverage {
                patch: PatchCoord::new(pos.patch_x(), pos.patch_y()),
                mask: CoverageMask(acked.mask()),
            }));
        }
        if status.done() {
            return Err(());
        }
        Ok(None)
    }
}

fn drain(unit: &mut RasterizerUnit, ctx: u8) -> Vec<PatchCoverage> {
    let mut host = Host::default();
    let mut out = Vec::new();
    for _ in 0..CYCLE_LIMIT {
        match host.service(unit, ctx) {
            Ok(Some(p)) => out.push(p),
            Ok(None) => {}
            Err(()) => return out,
        }
        unit.clock();
    }
    panic!("context {ctx} did not finish");
}

fn run_solo(tri: &Triangle, tile: TileOrigin) -> Vec<PatchCoverage> {
    let mut unit = RasterizerUnit::new();
    submit(&mut unit, 0, tri, tile);
    drain(&mut unit, 0)
}

fn to_tile(patches: &[PatchCoverage]) -> TileCoverage {
    let mut cov = TileCoverage::new();
    for p in patches {
        cov.merge_patch(p);
    }
    cov
}

fn front_facing(c: [i16; 6]) -> Triangle {
    Triangle::from_coords(c).front_facing()
}

mod end_to_end_tests {
    use super::*;

    #[test]
    fn small_right_triangle_yields_one_patch() {
        let tri = Triangle::from_coords([0, 0, 0, 4, 4, 0]);
        let mut unit = RasterizerUnit::new();
        submit(&mut unit, 0, &tri, TileOrigin::new(0, 0));
        let patches = drain(&mut unit, 0);
        assert_eq!(
            patches,
            vec![PatchCoverage {
                patch: PatchCoord::new(0, 0),
                mask: CoverageMask(0x26E0),
            }]
        );
        assert_eq!(
            unit.context(0).bbox,
            BoundingBox {
                left: 0,
                right: 1,
                top: 0,
                bot: 1
            }
        );
    }

    #[test]
    fn clockwise_order_covers_nothing() {
        let tri = Triangle::from_coords([0, 0, 4, 0, 0, 4]);
        assert!(run_solo(&tri, TileOrigin::new(0, 0)).is_empty());
    }

    #[test]
    fn triangle_inside_one_patch() {
        let tri = Triangle::from_coords([0, 0, 0, 3, 3, 0]);
        let mut unit = RasterizerUnit::new();
        submit(&mut unit, 1, &tri, TileOrigin::new(0, 0));
        let patches = drain(&mut unit, 1);
        assert_eq!(unit.context(1).bbox.patch_count(), 1);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].mask, CoverageMask(0x0260));
    }

    #[test]
    fn degenerate_triangles_finish_without_acknowledgements() {
        for c in [[10, 10, 10, 10, 10, 10], [0, 0, 8, 8, 16, 16], [5, 40, 5, 2, 5, 20]] {
            let tri = Triangle::from_coords(c);
            let mut unit = RasterizerUnit::new();
            submit(&mut unit, 0, &tri, TileOrigin::new(0, 0));
            let taken = unit.run_until_idle(CYCLE_LIMIT as u64);
            assert!(taken.is_some(), "{c:?}");
            let ctx = unit.context(0);
            assert!(ctx.host_done(), "{c:?}");
            assert_eq!(ctx.state, state::IDLE);
            assert!(reference::rasterize_tile(&tri, TileOrigin::new(0, 0)).is_empty());
        }
    }

    #[test]
    fn rerun_is_idempotent() {
        let tri = front_facing([3, 5, 40, 9, 20, 50]);
        let tile = TileOrigin::new(0, 0);
        let mut unit = RasterizerUnit::new();
        submit(&mut unit, 2, &tri, tile);
        let first = drain(&mut unit, 2);
        let first_box = unit.context(2).bbox;
        submit(&mut unit, 2, &tri, tile);
        let second = drain(&mut unit, 2);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(first_box, unit.context(2).bbox);
    }

    #[test]
    fn strobed_read_after_done_keeps_next_run_intact() {
        let tri = Triangle::from_coords([0, 0, 0, 4, 4, 0]);
        let tile = TileOrigin::new(0, 0);
        let mut unit = RasterizerUnit::new();
        submit(&mut unit, 0, &tri, tile);
        let first = drain(&mut unit, 0);

        let status = StatusReg::from_raw(unit.read(0, STATUS | STROBE));
        assert!(status.done());
        assert!(!unit.context(0).advance);

        submit(&mut unit, 0, &tri, tile);
        let second = drain(&mut unit, 0);
        assert_eq!(
            first,
            vec![PatchCoverage {
                patch: PatchCoord::new(0, 0),
                mask: CoverageMask(0x26E0),
            }]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn back_to_back_triangles_through_registers_only() {
        let tile = TileOrigin::new(0, 0);
        let tris = [
            front_facing([3, 2, 10, 60, 62, 30]),
            front_facing([0, 0, 4, 0, 0, 4]),
            front_facing([17, 33, 45, 35, 30, 58]),
        ];
        let mut unit = RasterizerUnit::new();
        for tri in &tris {
            submit(&mut unit, 3, tri, tile);
            let got = drain(&mut unit, 3);
            // Hosts commonly finish with one more acknowledging read.
            for _ in 0..3 {
                unit.read(3, STATUS | STROBE);
                unit.clock();
            }
            assert_eq!(got, run_solo(tri, tile), "{tri:?}");
        }
    }

    #[test]
    fn patches_arrive_in_raster_order() {
        let tri = front_facing([0, 0, 63, 0, 0, 63]);
        let patches = run_solo(&tri, TileOrigin::new(0, 0));
        let order: Vec<_> = patches.iter().map(|p| (p.patch.y, p.patch.x)).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }
}

mod reference_tests {
    use super::*;

    fn check(c: [i16; 6], tile: TileOrigin) {
        let tri = front_facing(c);
        let patches = run_solo(&tri, tile);
        assert!(patches.iter().all(|p| !p.mask.is_empty()));
        let got = to_tile(&patches);
        let want = reference::rasterize_tile(&tri, tile);
        assert_eq!(got, want, "{tri:?} in {tile:?}");
    }

    #[test]
    fn multi_row_boxes_in_origin_tile() {
        check([3, 2, 10, 60, 62, 30], TileOrigin::new(0, 0));
        check([0, 0, 63, 1, 62, 0], TileOrigin::new(0, 0));
        check([17, 33, 45, 35, 30, 58], TileOrigin::new(0, 0));
    }

    #[test]
    fn offset_tile() {
        check([70, 130, 66, 190, 127, 160], TileOrigin::new(1, 2));
    }

    #[test]
    fn negative_tile() {
        let tile = TileOrigin::containing(Point::new(-1, -1));
        check([-60, -3, -2, -50, -40, -62], tile);
    }

    #[test]
    fn triangle_larger_than_tile() {
        check([-20, -20, -10, 100, 100, 10], TileOrigin::new(0, 0));
        check([-1000, -1000, -1000, 3000, 3000, -1000], TileOrigin::new(0, 0));
        check([-1000, -1000, -1000, 3000, 3000, -1000], TileOrigin::new(5, 7));
    }

    #[test]
    fn full_tile_is_all_full_masks() {
        let tri = front_facing([-1000, -1000, -1000, 3000, 3000, -1000]);
        let patches = run_solo(&tri, TileOrigin::new(0, 0));
        assert_eq!(patches.len(), 256);
        assert!(patches.iter().all(|p| p.mask == CoverageMask::FULL));
    }

    #[test]
    fn triangle_outside_tile_covers_nothing() {
        let tri = front_facing([100, 100, 120, 110, 105, 130]);
        assert!(run_solo(&tri, TileOrigin::new(0, 0)).is_empty());
    }
}

mod shared_edge_tests {
    use super::*;

    fn assert_partition(a: [i16; 6], b: [i16; 6]) -> TileCoverage {
        let tile = TileOrigin::new(0, 0);
        let ca = to_tile(&run_solo(&front_facing(a), tile));
        let cb = to_tile(&run_solo(&front_facing(b), tile));
        assert!(ca.intersection(&cb).is_empty(), "overlap {a:?} / {b:?}");
        let mut union = ca.clone();
        for (x, y) in cb.pixels() {
            union.set(x, y);
        }
        assert_eq!(union.count(), ca.count() + cb.count());
        union
    }

    #[test]
    fn diagonal_split_quad() {
        let (p0, p1, p2, p3) = ([5, 3], [7, 50], [58, 47], [52, 9]);
        let union = assert_partition(
            [p0[0], p0[1], p1[0], p1[1], p2[0], p2[1]],
            [p0[0], p0[1], p2[0], p2[1], p3[0], p3[1]],
        );
        let quad = [front_facing([5, 3, 7, 50, 58, 47]), front_facing([5, 3, 58, 47, 52, 9])];
        for (x, y) in union.pixels() {
            let (x, y) = (x as i64, y as i64);
            assert!(quad.iter().any(|t| reference::covers_pixel(t, x, y)));
        }
        assert!(union.count() > 1500);
    }

    #[test]
    fn horizontal_shared_edge() {
        let union = assert_partition([10, 10, 30, 10, 20, 0], [10, 10, 30, 10, 20, 30]);
        for x in 11..30 {
            assert!(union.get(x, 10), "pixel ({x}, 10)");
        }
    }

    #[test]
    fn vertical_shared_edge() {
        let union = assert_partition([20, 5, 20, 40, 0, 20], [20, 5, 20, 40, 45, 22]);
        for y in 6..40 {
            assert!(union.get(20, y), "pixel (20, {y})");
        }
    }
}

mod concurrency_tests {
    use super::*;

    #[test]
    fn four_contexts_match_solo_runs() {
        let jobs = [
            (front_facing([3, 2, 10, 60, 62, 30]), TileOrigin::new(0, 0)),
            (front_facing([70, 130, 66, 190, 127, 160]), TileOrigin::new(1, 2)),
            (front_facing([-60, -3, -2, -50, -40, -62]), TileOrigin::new(0x3FF, 0x3FF)),
            (front_facing([0, 0, 4, 0, 0, 4]), TileOrigin::new(0, 0)),
        ];

        let mut unit = RasterizerUnit::new();
        for (i, (tri, tile)) in (0u8..).zip(jobs.iter()) {
            submit(&mut unit, i, tri, *tile);
        }

        let mut host = Host::default();
        let mut results: Vec<Vec<PatchCoverage>> = vec![Vec::new(); NUM_CONTEXTS];
        let mut finished = [false; NUM_CONTEXTS];
        for _ in 0..CYCLE_LIMIT {
            for ctx in 0..NUM_CONTEXTS as u8 {
                if finished[usize::from(ctx)] {
                    continue;
                }
                match host.service(&mut unit, ctx) {
                    Ok(Some(p)) => results[usize::from(ctx)].push(p),
                    Ok(None) => {}
                    Err(()) => finished[usize::from(ctx)] = true,
                }
            }
            if finished.iter().all(|&f| f) {
                break;
            }
            unit.clock();
        }
        assert!(finished.iter().all(|&f| f));

        for (i, (tri, tile)) in jobs.iter().enumerate() {
            assert_eq!(results[i], run_solo(tri, *tile), "context {i}");
        }
    }

    #[test]
    fn waiting_context_does_not_block_others() {
        let tri = front_facing([0, 0, 63, 0, 0, 63]);
        let mut unit = RasterizerUnit::new();
        submit(&mut unit, 0, &tri, TileOrigin::new(0, 0));
        submit(&mut unit, 1, &tri, TileOrigin::new(0, 0));
        // Never acknowledge context 0; context 1 must still finish.
        let patches = drain(&mut unit, 1);
        assert!(!patches.is_empty());
        assert_eq!(unit.context(0).state, state::WAIT);
        assert!(unit.context(0).mask_valid);
    }

    #[test]
    fn status_outside_wait_reports_no_mask() {
        let tri = front_facing([0, 0, 63, 0, 0, 63]);
        let mut unit = RasterizerUnit::new();
        submit(&mut unit, 3, &tri, TileOrigin::new(0, 0));
        for _ in 0..20 {
            unit.clock();
            let status = StatusReg::from_raw(unit.read(3, STATUS));
            assert_ne!(unit.context(3).state, state::WAIT);
            assert!(!status.mask_valid());
            assert!(!status.done());
        }
    }
}
