//! Per-context registers and the context sequencer.

use nz_bbox::{axis_bounds, Axis};
use nz_edge::{edge_mask, EdgeInput, EdgeRegs, EdgeSetupUnit, SETUP_PHASES};
use nz_twin_core::{BoundingBox, CoverageMask, PatchCoord, TileOrigin, Triangle};

use crate::state::{self, State};

/// Everything one rendering context owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub triangle: Triangle,
    pub tile: TileOrigin,
    /// Edge registers for v1->v2, v2->v3 and v3->v1. After setup, `c` holds
    /// the current row's base value and `d` the current patch's corner value.
    pub edges: [EdgeRegs; 3],
    pub bbox: BoundingBox,
    /// Patch cursor.
    pub patch: PatchCoord,
    pub mask: CoverageMask,
    pub mask_valid: bool,
    pub start: bool,
    /// Set on the first start, never cleared except by reset.
    pub started: bool,
    pub advance: bool,
    pub done: bool,
    pub waiting: bool,
    pub state: u8,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// An idle context.
    pub fn new() -> Self {
        Self {
            triangle: Triangle::default(),
            tile: TileOrigin::default(),
            edges: [EdgeRegs::default(); 3],
            bbox: BoundingBox::default(),
            patch: PatchCoord::default(),
            mask: CoverageMask::EMPTY,
            mask_valid: false,
            start: false,
            started: false,
            advance: false,
            done: true,
            waiting: false,
            state: state::IDLE,
        }
    }

    /// Reset action. Host-written registers survive.
    pub fn force_idle(&mut self) {
        self.mask_valid = false;
        self.start = false;
        self.started = false;
        self.advance = false;
        self.done = true;
        self.waiting = false;
        self.state = state::IDLE;
    }

    pub fn decoded_state(&self) -> State {
        State::decode(self.state)
    }

    /// True when the context cannot use the datapath this cycle.
    pub fn skip(&self) -> bool {
        let idle = self.done && !self.start;
        let holding = self.state == state::WAIT && self.mask_valid && !self.advance;
        idle || holding
    }

    /// Status bit 16 as the host sees it.
    pub fn host_done(&self) -> bool {
        self.done && !self.start
    }

    fn edge_input(&self, edge: usize) -> EdgeInput {
        let (p1, p2) = self.triangle.edges()[edge];
        EdgeInput {
            p1,
            p2,
            corner: self.tile.patch_corner(self.patch),
        }
    }

    /// One cycle as the granted context.
    pub fn execute(&mut self, setup: &mut EdgeSetupUnit) {
        let from = self.state;
        match State::decode(self.state) {
            State::Setup { edge, phase } => {
                let input = self.edge_input(usize::from(edge));
                let regs = &mut self.edges[usize::from(edge)];
                setup.step(phase, &input, regs);
                if phase == SETUP_PHASES - 1 {
                    // Row base starts at the first patch.
                    regs.c = regs.d;
                }
                self.state += 1;
            }
            State::Mask { edge } => {
                let at_right = self.patch.x == self.bbox.right;
                let regs = &mut self.edges[usize::from(edge)];
                let m = edge_mask(regs.a, regs.b, regs.d);
                if at_right {
                    regs.c = regs.c.wrapping_sub(i32::from(regs.b) << 2);
                    regs.d = regs.c;
                } else {
                    regs.d = regs.d.wrapping_add(i32::from(regs.a) << 2);
                }
                self.mask = if edge == 0 { m } else { self.mask.and(m) };
                if self.state == state::MASK_EDGE3 {
                    self.mask_valid = !self.mask.is_empty();
                    self.waiting = true;
                    self.state = state::WAIT;
                } else {
                    self.state += 1;
                }
            }
            State::Wait => {
                if !self.mask_valid || self.advance {
                    self.mask_valid = false;
                    self.advance = false;
                    self.waiting = false;
                    self.state = state::ADVANCE;
                }
            }
            State::Advance => {
                if self.patch.x != self.bbox.right {
                    self.patch.x += 1;
                    self.state = state::MASK_EDGE1;
                } else if self.patch.y != self.bbox.bot {
                    self.patch.x = self.bbox.left;
                    self.patch.y += 1;
                    self.state = state::MASK_EDGE1;
                } else {
                    self.done = true;
                    self.state = state::IDLE;
                }
            }
            State::BoxY => {
                let axis = Axis::from_state(state::BOX_Y);
                let (top, bot) = axis_bounds(self.tile, &self.triangle, axis);
                self.bbox.top = top;
                self.bbox.bot = bot;
                self.patch.y = top;
                self.state = state::BOX_X;
            }
            State::BoxX => {
                let axis = Axis::from_state(state::BOX_X);
                let (left, right) = axis_bounds(self.tile, &self.triangle, axis);
                self.bbox.left = left;
                self.bbox.right = right;
                self.patch.x = left;
                self.state = 0;
            }
            State::Idle => {
                if self.start {
                    self.done = false;
                    self.start = false;
                    self.started = true;
                    self.advance = false;
                    self.state = state::BOX_Y;
                }
            }
        }
        if from != self.state {
            log::trace!("{:?} -> {:?}", State::decode(from), State::decode(self.state));
        }
    }
}
