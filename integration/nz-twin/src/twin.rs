//! Host driver plus simulated unit.

use nyuzi_raster_core::{DriverConfig, PatchList, RasterDriver};
use nz_twin_core::{reference, TileCoverage, TileOrigin, Triangle};

use crate::config::TwinConfig;
use crate::error::TwinError;
use crate::port::SimPort;

/// One triangle to rasterize within one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderJob {
    pub triangle: Triangle,
    pub tile: TileOrigin,
}

impl RenderJob {
    pub fn new(triangle: Triangle, tile: TileOrigin) -> Self {
        Self { triangle, tile }
    }
}

/// What the unit delivered for one job.
#[derive(Debug, Clone)]
pub struct TriangleResult {
    pub job: RenderJob,
    /// Covered patches in delivery order.
    pub patches: PatchList,
    /// Union of the patch masks.
    pub coverage: TileCoverage,
}

impl TriangleResult {
    fn new(job: RenderJob, patches: PatchList) -> Self {
        let mut coverage = TileCoverage::new();
        for p in patches.iter() {
            coverage.merge_patch(p);
        }
        Self {
            job,
            patches,
            coverage,
        }
    }
}

/// A [`RasterDriver`] wired to a [`SimPort`].
pub struct Twin {
    driver: RasterDriver<SimPort>,
    config: TwinConfig,
}

impl Twin {
    pub fn new(config: TwinConfig) -> Result<Self, TwinError> {
        if config.cycles_per_access == 0 {
            return Err(TwinError::Config("cycles per access must be at least 1".into()));
        }
        if config.poll_limit == 0 {
            return Err(TwinError::Config("poll limit must be at least 1".into()));
        }
        if config.scale == 0 {
            return Err(TwinError::Config("scale must be at least 1".into()));
        }
        let port = SimPort::new(config.cycles_per_access);
        let driver = RasterDriver::with_config(
            port,
            DriverConfig {
                poll_limit: config.poll_limit,
            },
        );
        Ok(Self { driver, config })
    }

    pub fn config(&self) -> &TwinConfig {
        &self.config
    }

    pub fn port(&self) -> &SimPort {
        self.driver.port()
    }

    /// Unit clocks elapsed since construction.
    pub fn cycles(&self) -> u64 {
        self.port().unit().cycle_count()
    }

    /// Put every context back to idle through the reset sequencer.
    pub fn reset(&mut self) {
        let unit = self.driver.port_mut().unit_mut();
        unit.reset();
        while unit.is_resetting() {
            unit.clock();
        }
    }

    /// Rasterize a single job on context 0.
    pub fn render_one(&mut self, job: RenderJob) -> Result<TriangleResult, TwinError> {
        let patches = self.driver.rasterize(0, &job.triangle, job.tile)?;
        Ok(TriangleResult::new(job, patches))
    }

    /// Rasterize every job, keeping all four contexts busy.
    pub fn render(&mut self, jobs: &[RenderJob]) -> Result<Vec<TriangleResult>, TwinError> {
        let start = self.cycles();
        let batch: Vec<(Triangle, TileOrigin)> =
            jobs.iter().map(|j| (j.triangle, j.tile)).collect();
        let lists = self.driver.rasterize_batch(&batch)?;
        log::info!(
            "{} triangles in {} cycles ({} register accesses)",
            jobs.len(),
            self.cycles() - start,
            self.port().accesses()
        );
        Ok(jobs
            .iter()
            .zip(lists)
            .map(|(job, patches)| TriangleResult::new(*job, patches))
            .collect())
    }
}

/// Check every result against the per-pixel reference evaluator.
pub fn verify(results: &[TriangleResult]) -> Result<(), TwinError> {
    for (index, result) in results.iter().enumerate() {
        let job = result.job;
        let want = reference::rasterize_tile(&job.triangle, job.tile);
        if want != result.coverage {
            let both = want.intersection(&result.coverage).count();
            return Err(TwinError::CoverageMismatch {
                index,
                tile_x: job.tile.tile_x(),
                tile_y: job.tile.tile_y(),
                missing: want.count() - both,
                extra: result.coverage.count() - both,
            });
        }
    }
    log::debug!("{} results match the reference", results.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nz_twin_core::{CoverageMask, PatchCoord, PatchCoverage};

    fn small_job() -> RenderJob {
        RenderJob::new(Triangle::from_coords([0, 0, 0, 4, 4, 0]), TileOrigin::new(0, 0))
    }

    #[test]
    fn render_one_small_triangle() {
        let mut twin = Twin::new(TwinConfig::default()).unwrap();
        let result = twin.render_one(small_job()).unwrap();
        assert_eq!(result.patches.len(), 1);
        assert_eq!(result.patches[0].mask, CoverageMask(0x26E0));
        assert_eq!(result.coverage.count(), 6);
        assert!(twin.cycles() > 30);
    }

    #[test]
    fn rejects_zero_settings() {
        let config = TwinConfig {
            cycles_per_access: 0,
            ..TwinConfig::default()
        };
        assert!(matches!(Twin::new(config), Err(TwinError::Config(_))));
    }

    #[test]
    fn verify_reports_missing_and_extra() {
        let job = small_job();
        let mut patches = PatchList::new();
        // Drop pixel (1,1), add pixel (0,0).
        patches
            .push(PatchCoverage {
                patch: PatchCoord::new(0, 0),
                mask: CoverageMask((0x26E0 & !(1 << 5)) | 1),
            })
            .unwrap();
        let bad = TriangleResult::new(job, patches);
        let err = verify(&[bad]).unwrap_err();
        assert!(matches!(
            err,
            TwinError::CoverageMismatch {
                index: 0,
                missing: 1,
                extra: 1,
                ..
            }
        ));
    }

    #[test]
    fn reset_leaves_unit_idle() {
        let mut twin = Twin::new(TwinConfig::default()).unwrap();
        twin.render_one(small_job()).unwrap();
        twin.reset();
        assert!(twin.port().unit().all_done());
        assert!(!twin.port().unit().is_resetting());
    }
}
