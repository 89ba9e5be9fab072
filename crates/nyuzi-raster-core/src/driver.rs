//! Rasterizer driver, generic over [`RegisterPort`].
//!
//! The host protocol per triangle: write the tile origin and three vertices,
//! the last write carrying the strobe bit to start the context. Then poll the
//! status register. While a mask is valid, read the patch position, then read
//! the status again with the strobe bit to take the mask and release the
//! context to the next patch. Done means the bounding box is exhausted.
//!
//! The unit keeps reporting the mask as valid until the context is next
//! scheduled, which can be several cycles after the acknowledge. A second
//! strobed read in that window would set the advance request again and skip
//! the next patch unseen. The driver therefore holds off after an acknowledge
//! until it sees the mask drop or the patch position change.

use nyuzi_raster_hal::RegisterPort;
use nz_twin_core::{
    CoverageMask, PatchCoord, PatchCoverage, TileOrigin, Triangle, MAX_PATCHES_PER_TILE,
    NUM_CONTEXTS,
};
use raster_registers::{
    PositionReg, Register, StatusReg, TileReg, VertexReg, POSITION, STATUS, STROBE, TILE,
    VERTEX1, VERTEX2, VERTEX3,
};

use crate::error::DriverError;

/// Covered patches of one triangle in one tile, in delivery order.
pub type PatchList = heapless::Vec<PatchCoverage, MAX_PATCHES_PER_TILE>;

/// Driver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Status reads without progress before a context is declared stuck.
    pub poll_limit: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { poll_limit: 10_000 }
    }
}

/// Outcome of a single status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchPoll {
    /// A covered patch was taken and acknowledged.
    Ready(PatchCoverage),
    /// The context is still working.
    Pending,
    /// The context is idle.
    Done,
}

/// Platform-agnostic rasterizer driver. Owns the register port.
pub struct RasterDriver<P: RegisterPort> {
    port: P,
    config: DriverConfig,
    /// Raw position of an acknowledged patch the context may still be
    /// reporting, per context.
    unreleased: [Option<u32>; NUM_CONTEXTS],
}

impl<P: RegisterPort> RasterDriver<P> {
    pub fn new(port: P) -> Self {
        Self::with_config(port, DriverConfig::default())
    }

    pub fn with_config(port: P, config: DriverConfig) -> Self {
        Self {
            port,
            config,
            unreleased: [None; NUM_CONTEXTS],
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Release the port.
    pub fn into_port(self) -> P {
        self.port
    }

    fn check_context(context: u8) -> Result<(), DriverError<P::Error>> {
        if usize::from(context) < NUM_CONTEXTS {
            Ok(())
        } else {
            Err(DriverError::InvalidContext(context))
        }
    }

    /// Read the status register without acknowledging anything.
    pub fn status(&mut self, context: u8) -> Result<StatusReg, DriverError<P::Error>> {
        Self::check_context(context)?;
        let raw = self.port.read_register(context, STATUS)?;
        Ok(StatusReg::from_raw(raw))
    }

    /// Read the position of the patch the context is on.
    pub fn position(&mut self, context: u8) -> Result<PositionReg, DriverError<P::Error>> {
        Self::check_context(context)?;
        let raw = self.port.read_register(context, POSITION)?;
        Ok(PositionReg::from_raw(raw))
    }

    /// Load a triangle and start the context.
    ///
    /// Refuses a context that has not reported done, since overwriting its
    /// vertices would corrupt the triangle in flight.
    pub fn submit(
        &mut self,
        context: u8,
        triangle: &Triangle,
        tile: TileOrigin,
    ) -> Result<(), DriverError<P::Error>> {
        if !self.status(context)?.done() {
            return Err(DriverError::ContextBusy(context));
        }

        let [v1, v2, v3] = triangle.vertices.map(|v| VertexReg::new(v.x, v.y).to_raw());
        let tile_reg = TileReg::new(tile.tile_x(), tile.tile_y());
        self.port.write_register(context, TILE, tile_reg.to_raw())?;
        self.port.write_register(context, VERTEX1, v1)?;
        self.port.write_register(context, VERTEX2, v2)?;
        self.port.write_register(context, VERTEX3 | STROBE, v3)?;
        self.unreleased[usize::from(context)] = None;

        log::debug!(
            "context {context}: started {:?} in tile ({}, {})",
            triangle.vertices,
            tile.tile_x(),
            tile.tile_y()
        );
        Ok(())
    }

    /// One status read, plus the acknowledge sequence if a mask is waiting.
    pub fn poll_patch(&mut self, context: u8) -> Result<PatchPoll, DriverError<P::Error>> {
        let status = self.status(context)?;
        let slot = usize::from(context);

        if let Some(acked_at) = self.unreleased[slot] {
            if status.mask_valid() {
                // The cursor only moves once the acknowledged mask is released.
                if self.position(context)?.to_raw() != acked_at {
                    self.unreleased[slot] = None;
                }
                return Ok(PatchPoll::Pending);
            }
            self.unreleased[slot] = None;
        }

        if status.mask_valid() {
            // Position first: the acknowledge lets the cursor move on.
            let pos = self.position(context)?;
            let acked = StatusReg::from_raw(self.port.read_register(context, STATUS | STROBE)?);
            self.unreleased[slot] = Some(pos.to_raw());
            let coverage = PatchCoverage {
                patch: PatchCoord::new(pos.patch_x(), pos.patch_y()),
                mask: CoverageMask(acked.mask()),
            };
            log::trace!(
                "context {context}: patch ({}, {}) mask {:#06x}",
                coverage.patch.x,
                coverage.patch.y,
                acked.mask()
            );
            Ok(PatchPoll::Ready(coverage))
        } else if status.done() {
            Ok(PatchPoll::Done)
        } else {
            Ok(PatchPoll::Pending)
        }
    }

    /// Poll until the next covered patch, or `None` once the context is done.
    pub fn next_patch(
        &mut self,
        context: u8,
    ) -> Result<Option<PatchCoverage>, DriverError<P::Error>> {
        for _ in 0..self.config.poll_limit {
            match self.poll_patch(context)? {
                PatchPoll::Ready(coverage) => return Ok(Some(coverage)),
                PatchPoll::Done => return Ok(None),
                PatchPoll::Pending => {}
            }
        }
        Err(DriverError::Timeout {
            context,
            polls: self.config.poll_limit,
        })
    }

    /// Rasterize one triangle on one context and collect every covered patch.
    pub fn rasterize(
        &mut self,
        context: u8,
        triangle: &Triangle,
        tile: TileOrigin,
    ) -> Result<PatchList, DriverError<P::Error>> {
        self.submit(context, triangle, tile)?;
        let mut patches = PatchList::new();
        while let Some(coverage) = self.next_patch(context)? {
            patches
                .push(coverage)
                .map_err(|_| DriverError::TooManyPatches {
                    context,
                    limit: MAX_PATCHES_PER_TILE,
                })?;
        }
        log::debug!("context {context}: {} covered patches", patches.len());
        Ok(patches)
    }

    /// Rasterize a list of jobs with up to four contexts in flight.
    ///
    /// Contexts are serviced round robin, one poll each per pass. Results come
    /// back in job order regardless of completion order.
    pub fn rasterize_batch(
        &mut self,
        jobs: &[(Triangle, TileOrigin)],
    ) -> Result<Vec<PatchList>, DriverError<P::Error>> {
        let mut results: Vec<PatchList> = jobs.iter().map(|_| PatchList::new()).collect();
        let mut slots: [Option<usize>; NUM_CONTEXTS] = [None; NUM_CONTEXTS];
        let mut next_job = 0;
        let mut stalled_passes = 0u32;

        loop {
            for (context, slot) in (0u8..).zip(slots.iter_mut()) {
                if slot.is_none() && next_job < jobs.len() {
                    let (triangle, tile) = &jobs[next_job];
                    self.submit(context, triangle, *tile)?;
                    *slot = Some(next_job);
                    next_job += 1;
                }
            }

            if slots.iter().all(Option::is_none) {
                break;
            }

            let mut progressed = false;
            for (context, slot) in (0u8..).zip(slots.iter_mut()) {
                let Some(job) = *slot else { continue };
                match self.poll_patch(context)? {
                    PatchPoll::Ready(coverage) => {
                        results[job].push(coverage).map_err(|_| {
                            DriverError::TooManyPatches {
                                context,
                                limit: MAX_PATCHES_PER_TILE,
                            }
                        })?;
                        progressed = true;
                    }
                    PatchPoll::Done => {
                        log::debug!("context {context}: job {job} finished");
                        *slot = None;
                        progressed = true;
                    }
                    PatchPoll::Pending => {}
                }
            }

            if progressed {
                stalled_passes = 0;
            } else {
                stalled_passes += 1;
                if stalled_passes >= self.config.poll_limit {
                    let context = slots.iter().position(Option::is_some).unwrap_or(0) as u8;
                    return Err(DriverError::Timeout {
                        context,
                        polls: stalled_passes,
                    });
                }
            }
        }

        log::info!("rasterized {} triangles", jobs.len());
        Ok(results)
    }
}
