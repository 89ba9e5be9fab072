//! The four-context rasterizer unit.

use nz_arbiter::{ContextArbiter, Grant, SkipVector};
use nz_edge::EdgeSetupUnit;
use nz_twin_core::NUM_CONTEXTS;

use crate::context::Context;

/// Rasterizer unit: four contexts, one arbiter, one shared setup datapath.
#[derive(Debug)]
pub struct RasterizerUnit {
    pub(crate) contexts: [Context; NUM_CONTEXTS],
    arbiter: ContextArbiter,
    setup: EdgeSetupUnit,
    /// Next context the reset sequencer forces idle.
    reset_counter: Option<usize>,
    cycle: u64,
}

impl Default for RasterizerUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterizerUnit {
    /// A unit with every context idle.
    pub fn new() -> Self {
        Self {
            contexts: core::array::from_fn(|_| Context::new()),
            arbiter: ContextArbiter::new(),
            setup: EdgeSetupUnit::new(),
            reset_counter: None,
            cycle: 0,
        }
    }

    /// Assert reset. Contexts are forced idle one per clock, in index order.
    pub fn reset(&mut self) {
        log::debug!("rasterizer reset at cycle {}", self.cycle);
        self.arbiter.reset();
        self.reset_counter = Some(0);
    }

    pub fn is_resetting(&self) -> bool {
        self.reset_counter.is_some()
    }

    /// Context `index`, masked to the 2-bit select the port decodes.
    pub fn context(&self, index: u8) -> &Context {
        &self.contexts[usize::from(index) % NUM_CONTEXTS]
    }

    pub fn context_mut(&mut self, index: u8) -> &mut Context {
        &mut self.contexts[usize::from(index) % NUM_CONTEXTS]
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    /// Shared datapath, for operator use counts.
    pub fn setup_unit(&self) -> &EdgeSetupUnit {
        &self.setup
    }

    pub fn skip_vector(&self) -> SkipVector {
        SkipVector::from_flags(core::array::from_fn(|i| self.contexts[i].skip()))
    }

    /// No context can make progress without host action.
    pub fn is_idle(&self) -> bool {
        !self.is_resetting() && self.skip_vector() == SkipVector::ALL
    }

    /// Every context has finished and has no start pending.
    pub fn all_done(&self) -> bool {
        self.contexts.iter().all(Context::host_done)
    }

    /// Advance one clock. Returns the arbiter decision, or `None` while the
    /// reset sequencer owns the cycle.
    pub fn clock(&mut self) -> Option<Grant> {
        self.cycle += 1;

        if let Some(index) = self.reset_counter {
            self.contexts[index].force_idle();
            self.reset_counter = (index + 1 < NUM_CONTEXTS).then_some(index + 1);
            return None;
        }

        let skip = self.skip_vector();
        let grant = self.arbiter.grant(skip);
        if grant.active {
            self.contexts[usize::from(grant.context)].execute(&mut self.setup);
        }
        Some(grant)
    }

    /// Clock `cycles` times. Returns how many cycles did work.
    pub fn run(&mut self, cycles: u64) -> u64 {
        (0..cycles)
            .filter(|_| self.clock().is_some_and(|g| g.active))
            .count() as u64
    }

    /// Clock until nothing can progress or `limit` cycles pass. Returns the
    /// cycles taken, or `None` on hitting the limit.
    pub fn run_until_idle(&mut self, limit: u64) -> Option<u64> {
        let start = self.cycle;
        while !self.is_idle() {
            if self.cycle - start >= limit {
                return None;
            }
            self.clock();
        }
        Some(self.cycle - start)
    }
}
