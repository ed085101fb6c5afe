//! xorshift64* PRNG for deterministic seed sampling

/// Fallback state used when a zero seed is supplied (xorshift has a zero fixed point)
const ZERO_SEED_REPLACEMENT: u64 = 0x9E3779B97F4A7C15;

/// xorshift64* PRNG
#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    /// Create a new PRNG with the given seed
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Generate next u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a value in `0..bound` (modulo reduction, bound must be nonzero)
    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    /// Generate a nonzero register state that fits in `width` bits
    pub fn next_state(&mut self, width: u32) -> u64 {
        let max_state = crate::fibonacci::max_seed(width);
        1 + self.next_below(max_state)
    }
}
