//! Register port backed by the simulated unit.

use std::convert::Infallible;

use nyuzi_raster_hal::RegisterPort;
use nz_rasterizer::RasterizerUnit;

/// A [`RegisterPort`] whose accesses go straight to a [`RasterizerUnit`].
///
/// After every access the unit is clocked `cycles_per_access` times, standing
/// in for the bus latency between host accesses.
#[derive(Debug)]
pub struct SimPort {
    unit: RasterizerUnit,
    cycles_per_access: u32,
    accesses: u64,
}

impl SimPort {
    pub fn new(cycles_per_access: u32) -> Self {
        Self::with_unit(RasterizerUnit::new(), cycles_per_access)
    }

    pub fn with_unit(unit: RasterizerUnit, cycles_per_access: u32) -> Self {
        Self {
            unit,
            cycles_per_access,
            accesses: 0,
        }
    }

    pub fn unit(&self) -> &RasterizerUnit {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut RasterizerUnit {
        &mut self.unit
    }

    /// Register accesses so far.
    pub fn accesses(&self) -> u64 {
        self.accesses
    }

    fn tick(&mut self) {
        self.accesses += 1;
        self.unit.run(u64::from(self.cycles_per_access));
    }
}

impl RegisterPort for SimPort {
    type Error = Infallible;

    fn write_register(&mut self, context: u8, offset: u8, data: u32) -> Result<(), Self::Error> {
        self.unit.write(context, offset, data);
        self.tick();
        Ok(())
    }

    fn read_register(&mut self, context: u8, offset: u8) -> Result<u32, Self::Error> {
        let value = self.unit.read(context, offset);
        self.tick();
        Ok(value)
    }
}
