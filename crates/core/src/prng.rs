//! Deterministic PRNG based on the SplitMix64 algorithm.
//!
//! All randomness in the engine — spawn parameters, turbulence, track noise —
//! is drawn from an explicitly injected `SplitMix64` so that every scene is
//! reproducible from a single `u64` seed. Same seed, same frame stream, on
//! every platform (the generator is pure integer arithmetic).

use serde::{Deserialize, Serialize};

/// SplitMix64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard finalizer constants. Unlike xorshift-family generators,
/// SplitMix64 has no all-zeros fixed point, so every seed (including 0) is
/// usable as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` divided by 2^53 for
    /// full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed f64 in [-1, 1).
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Returns true with probability `p`.
    ///
    /// `p <= 0` never fires, `p >= 1` always fires.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
