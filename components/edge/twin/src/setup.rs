//! Edge setup on a time-multiplexed datapath.
//!
//! For a directed edge (x1,y1)->(x2,y2) and a patch corner (cx,cy) the unit
//! produces
//!
//! ```text
//! A = y2 - y1
//! B = x2 - x1
//! C = B*y1 - A*x1 - bias
//! D = A*cx - B*cy + C
//! ```
//!
//! One 16x16 multiplier and one 32-bit adder/subtractor are shared by every
//! edge of every context, so the computation is spread over eight phases.
//! Intermediate values live in the per-context [`EdgeRegs`], never in the
//! datapath, which lets contexts interleave phases cycle by cycle.
//!
//! | phase | multiplier  | adder         |
//! |-------|-------------|---------------|
//! | 0     |             |               |
//! | 1     | C = A*x1    |               |
//! | 2     | P = B*y1    |               |
//! | 3     |             | C = P - C     |
//! | 4     | P = B*cy    | C = C - bias  |
//! | 5     | D = A*cx    |               |
//! | 6     |             | D = D - P     |
//! | 7     |             | D = D + C     |
//!
//! Phase 0 takes A and B from the coordinate subtractors and touches
//! neither shared operator.

use nz_twin_core::Point;

/// Phases per edge.
pub const SETUP_PHASES: u8 = 8;

/// Operands of one edge setup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeInput {
    pub p1: Point,
    pub p2: Point,
    /// Pixel the corner value `D` is evaluated at.
    pub corner: Point,
}

/// Per-context, per-edge setup registers. `p` is the product latch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeRegs {
    pub a: i16,
    pub b: i16,
    pub c: i32,
    pub d: i32,
    pub p: i32,
}

impl EdgeRegs {
    /// Register contents as an equation. Only meaningful after phase 7.
    pub fn equation(&self) -> EdgeEquation {
        EdgeEquation {
            a: self.a,
            b: self.b,
            c: self.c,
            d: self.d,
        }
    }
}

/// Final coefficients of one edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeEquation {
    pub a: i16,
    pub b: i16,
    /// Line constant, bias included.
    pub c: i32,
    /// Edge function at the corner.
    pub d: i32,
}

/// Tie-break term. Edges heading down the screen, and horizontal edges
/// heading left, own no pixels on the line itself.
///
/// The published rule tests `x2 < x1` for horizontal edges. This one uses
/// `x2 <= x1`, which differs only for a zero-length edge (`p1 == p2`): it
/// gets bias 1 here instead of 0, so a point triangle covers nothing. Every
/// edge of nonzero length gets the published bias.
pub fn bias(p1: Point, p2: Point) -> i32 {
    i32::from(p1.y < p2.y || (p1.y == p2.y && p2.x <= p1.x))
}

fn mul16(a: i16, b: i16) -> i32 {
    i32::from(a) * i32::from(b)
}

/// Full-width evaluation, no phase sharing.
pub fn setup_direct(input: &EdgeInput) -> EdgeEquation {
    let EdgeInput { p1, p2, corner } = *input;
    let a = p2.y.wrapping_sub(p1.y);
    let b = p2.x.wrapping_sub(p1.x);
    let c = mul16(b, p1.y)
        .wrapping_sub(mul16(a, p1.x))
        .wrapping_sub(bias(p1, p2));
    let d = mul16(a, corner.x)
        .wrapping_sub(mul16(b, corner.y))
        .wrapping_add(c);
    EdgeEquation { a, b, c, d }
}

/// The shared multiply/add datapath. Counts operator use so tests can check
/// the one-multiply-per-cycle budget.
#[derive(Debug, Default)]
pub struct EdgeSetupUnit {
    multiplies: u64,
    adds: u64,
}

impl EdgeSetupUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute one phase against a context's registers.
    pub fn step(&mut self, phase: u8, input: &EdgeInput, regs: &mut EdgeRegs) {
        let EdgeInput { p1, p2, corner } = *input;
        match phase % SETUP_PHASES {
            0 => {
                regs.a = p2.y.wrapping_sub(p1.y);
                regs.b = p2.x.wrapping_sub(p1.x);
            }
            1 => regs.c = self.mul(regs.a, p1.x),
            2 => regs.p = self.mul(regs.b, p1.y),
            3 => regs.c = self.sub(regs.p, regs.c),
            4 => {
                // Both results land at the end of the cycle.
                let product = self.mul(regs.b, corner.y);
                let c = self.sub(regs.c, bias(p1, p2));
                regs.p = product;
                regs.c = c;
            }
            5 => regs.d = self.mul(regs.a, corner.x),
            6 => regs.d = self.sub(regs.d, regs.p),
            _ => regs.d = self.add(regs.d, regs.c),
        }
    }

    /// All eight phases back to back.
    pub fn run(&mut self, input: &EdgeInput) -> EdgeEquation {
        let mut regs = EdgeRegs::default();
        for phase in 0..SETUP_PHASES {
            self.step(phase, input, &mut regs);
        }
        regs.equation()
    }

    pub fn multiplies(&self) -> u64 {
        self.multiplies
    }

    pub fn adds(&self) -> u64 {
        self.adds
    }

    fn mul(&mut self, a: i16, b: i16) -> i32 {
        self.multiplies += 1;
        mul16(a, b)
    }

    fn add(&mut self, a: i32, b: i32) -> i32 {
        self.adds += 1;
        a.wrapping_add(b)
    }

    fn sub(&mut self, a: i32, b: i32) -> i32 {
        self.adds += 1;
        a.wrapping_sub(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nz_twin_core::reference;
    use nz_twin_core::rng::XorShift64;

    fn input(x1: i16, y1: i16, x2: i16, y2: i16, cx: i16, cy: i16) -> EdgeInput {
        EdgeInput {
            p1: Point::new(x1, y1),
            p2: Point::new(x2, y2),
            corner: Point::new(cx, cy),
        }
    }

    #[test]
    fn coefficients_for_vertical_edge() {
        // (0,0) -> (0,4) heads down: bias 1.
        let eq = setup_direct(&input(0, 0, 0, 4, 0, 0));
        assert_eq!(eq, EdgeEquation { a: 4, b: 0, c: -1, d: -1 });
    }

    #[test]
    fn coefficients_for_diagonal_edge() {
        // (0,4) -> (4,0): A = -4, B = 4, C = 4*4 - (-4*0) = 16.
        let eq = setup_direct(&input(0, 4, 4, 0, 8, 4));
        assert_eq!(eq.a, -4);
        assert_eq!(eq.b, 4);
        assert_eq!(eq.c, 16);
        assert_eq!(eq.d, -4 * 8 - 4 * 4 + 16);
    }

    #[test]
    fn bias_cases() {
        let o = Point::new(0, 0);
        assert_eq!(bias(o, Point::new(3, 5)), 1);
        assert_eq!(bias(Point::new(3, 5), o), 0);
        assert_eq!(bias(o, Point::new(-2, 0)), 1);
        assert_eq!(bias(o, Point::new(2, 0)), 0);
        // Zero-length edge: the only input where `<=` and `<` disagree.
        assert_eq!(bias(o, o), 1);
        assert_eq!(bias(Point::new(-7, 9), Point::new(-7, 9)), 1);
    }

    #[test]
    fn phased_matches_direct() {
        let mut unit = EdgeSetupUnit::new();
        let mut rng = XorShift64::new(0xdead_beef);
        let mut next = || rng.next_i16();
        for _ in 0..5000 {
            let e = input(next(), next(), next(), next(), next(), next());
            assert_eq!(unit.run(&e), setup_direct(&e), "{e:?}");
        }
    }

    #[test]
    fn corner_value_matches_edge_function() {
        for (x1, y1, x2, y2) in [(0, 0, 10, 3), (7, -2, -5, 9), (3, 3, 3, -8), (-4, 6, 12, 6)] {
            for (cx, cy) in [(0, 0), (64, 128), (-64, 20)] {
                let e = input(x1, y1, x2, y2, cx, cy);
                let eq = setup_direct(&e);
                assert_eq!(
                    i64::from(eq.d),
                    reference::edge_value(e.p1, e.p2, i64::from(cx), i64::from(cy))
                );
            }
        }
    }

    #[test]
    fn one_multiply_per_phase() {
        let mut unit = EdgeSetupUnit::new();
        let e = input(1, 2, 30, 40, 64, 64);
        let mut regs = EdgeRegs::default();
        for phase in 0..SETUP_PHASES {
            let before = unit.multiplies();
            unit.step(phase, &e, &mut regs);
            assert!(unit.multiplies() - before <= 1, "phase {phase}");
        }
        assert_eq!(unit.multiplies(), 4);
        assert_eq!(unit.adds(), 4);
    }

    #[test]
    fn interleaved_edges_do_not_disturb_each_other() {
        let mut unit = EdgeSetupUnit::new();
        let e1 = input(0, 0, 20, 7, 4, 8);
        let e2 = input(-9, 13, 2, -6, 60, 0);
        let mut r1 = EdgeRegs::default();
        let mut r2 = EdgeRegs::default();
        for phase in 0..SETUP_PHASES {
            unit.step(phase, &e1, &mut r1);
            unit.step(phase, &e2, &mut r2);
        }
        assert_eq!(r1.equation(), setup_direct(&e1));
        assert_eq!(r2.equation(), setup_direct(&e2));
    }
}
