//! 5-bit sequencer state encoding.

use nz_edge::SETUP_PHASES;

/// Last edge setup state (edge 3, phase 7).
pub const SETUP_LAST: u8 = 23;
/// Edge mask states, one per edge.
pub const MASK_EDGE1: u8 = 24;
pub const MASK_EDGE2: u8 = 25;
pub const MASK_EDGE3: u8 = 26;
/// Holding a mask for the host.
pub const WAIT: u8 = 27;
/// Patch cursor step.
pub const ADVANCE: u8 = 28;
/// Top and bottom of the bounding box.
pub const BOX_Y: u8 = 29;
/// Left and right of the bounding box.
pub const BOX_X: u8 = 30;
pub const IDLE: u8 = 31;

/// Decoded sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Edge setup; `edge` is 0-2, `phase` 0-7.
    Setup { edge: u8, phase: u8 },
    /// Mask and corner update for one edge, 0-2.
    Mask { edge: u8 },
    Wait,
    Advance,
    BoxY,
    BoxX,
    Idle,
}

impl State {
    pub const fn decode(code: u8) -> Self {
        match code & 0x1F {
            c @ 0..=SETUP_LAST => State::Setup {
                edge: c / SETUP_PHASES,
                phase: c % SETUP_PHASES,
            },
            c @ MASK_EDGE1..=MASK_EDGE3 => State::Mask {
                edge: c - MASK_EDGE1,
            },
            WAIT => State::Wait,
            ADVANCE => State::Advance,
            BOX_Y => State::BoxY,
            BOX_X => State::BoxX,
            _ => State::Idle,
        }
    }

    pub const fn code(&self) -> u8 {
        match *self {
            State::Setup { edge, phase } => edge * SETUP_PHASES + phase,
            State::Mask { edge } => MASK_EDGE1 + edge,
            State::Wait => WAIT,
            State::Advance => ADVANCE,
            State::BoxY => BOX_Y,
            State::BoxX => BOX_X,
            State::Idle => IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips() {
        for code in 0..32u8 {
            assert_eq!(State::decode(code).code(), code);
        }
    }

    #[test]
    fn setup_states_split_into_edges_and_phases() {
        assert_eq!(State::decode(0), State::Setup { edge: 0, phase: 0 });
        assert_eq!(State::decode(15), State::Setup { edge: 1, phase: 7 });
        assert_eq!(State::decode(SETUP_LAST), State::Setup { edge: 2, phase: 7 });
        assert_eq!(State::decode(MASK_EDGE3), State::Mask { edge: 2 });
    }
}
