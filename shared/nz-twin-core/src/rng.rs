//! Seeded xorshift generator for randomized tests and HDL test vectors.
//!
//! Sequences are fixed for a given seed so vector files regenerate
//! identically.

/// Marsaglia xorshift64 (13, 7, 17).
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// A zero seed would lock the generator at zero and is bumped to 1.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Low 16 bits as a signed value.
    pub fn next_i16(&mut self) -> i16 {
        self.next_u64() as i16
    }

    /// Low 32 bits as a signed value.
    pub fn next_i32(&mut self) -> i32 {
        self.next_u64() as i32
    }
}
