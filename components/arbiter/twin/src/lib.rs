//! Round-robin context arbiter.
//!
//! Every cycle exactly one of the four contexts owns the shared datapath.
//! Priority rotates: the search starts at the context after the previous
//! grant and wraps around to the previous grant itself. A context reports a
//! skip when it has nothing to do (idle without a start request, or holding
//! a mask the host has not acknowledged). When every context skips, the grant
//! stays where it was and no state advances.

use nz_twin_core::NUM_CONTEXTS;

/// Search order for each previous grant.
pub const PRIORITY: [[u8; NUM_CONTEXTS]; NUM_CONTEXTS] = [
    [1, 2, 3, 0],
    [2, 3, 0, 1],
    [3, 0, 1, 2],
    [0, 1, 2, 3],
];

const SKIP_COMBINATIONS: usize = 1 << NUM_CONTEXTS;

/// One bit per context, set when that context cannot use the datapath.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SkipVector(u8);

impl SkipVector {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self((SKIP_COMBINATIONS - 1) as u8);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub fn from_flags(flags: [bool; NUM_CONTEXTS]) -> Self {
        let bits = flags
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &skip)| acc | (u8::from(skip) << i));
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_skipped(&self, context: usize) -> bool {
        (self.0 >> context) & 1 != 0
    }
}

/// Arbiter decision for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    /// Selected context.
    pub context: u8,
    /// False when every context skipped and the previous grant is held.
    pub active: bool,
}

const fn build_grant_table() -> [[Grant; SKIP_COMBINATIONS]; NUM_CONTEXTS] {
    let mut table = [[Grant {
        context: 0,
        active: false,
    }; SKIP_COMBINATIONS]; NUM_CONTEXTS];
    let mut last = 0;
    while last < NUM_CONTEXTS {
        let mut skip = 0;
        while skip < SKIP_COMBINATIONS {
            let mut grant = Grant {
                context: last as u8,
                active: false,
            };
            let mut i = 0;
            while i < NUM_CONTEXTS {
                let candidate = PRIORITY[last][i];
                if skip & (1 << candidate) == 0 {
                    grant = Grant {
                        context: candidate,
                        active: true,
                    };
                    break;
                }
                i += 1;
            }
            table[last][skip] = grant;
            skip += 1;
        }
        last += 1;
    }
    table
}

/// `(previous grant, skip vector) -> grant`, expanded from [`PRIORITY`].
pub const GRANT_TABLE: [[Grant; SKIP_COMBINATIONS]; NUM_CONTEXTS] = build_grant_table();

/// Pure transition function of the arbiter.
pub const fn next_grant(last: u8, skip: SkipVector) -> Grant {
    GRANT_TABLE[(last as usize) % NUM_CONTEXTS][skip.bits() as usize]
}

/// Arbiter state: the previous grant.
#[derive(Debug, Clone)]
pub struct ContextArbiter {
    last: u8,
}

impl Default for ContextArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextArbiter {
    /// After reset the first search starts at context 0.
    pub const fn new() -> Self {
        Self {
            last: (NUM_CONTEXTS - 1) as u8,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Previous grant.
    pub const fn last(&self) -> u8 {
        self.last
    }

    /// Decide this cycle's owner.
    pub fn grant(&mut self, skip: SkipVector) -> Grant {
        let grant = next_grant(self.last, skip);
        if grant.active {
            self.last = grant.context;
        } else {
            log::trace!("arbiter: all contexts skipped, holding {}", self.last);
        }
        grant
    }
}
