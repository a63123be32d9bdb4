//! Seeded random stream shared by every generation phase.
//!
//! All randomness in the crate flows through a single [`GenRng`] so that a
//! seed fully determines the output. Every decision, including boolean and
//! integer ones, consumes exactly one uniform float draw; phases only draw
//! when their guarding condition holds, so the draw schedule itself is part
//! of the generator's contract.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream backing world generation.
///
/// Cloning snapshots the stream state; the clone replays the exact same
/// sequence from that point.
#[derive(Debug, Clone)]
pub struct GenRng {
    rng: ChaCha8Rng,
}

impl GenRng {
    /// Creates a stream from a numeric seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a stream from a text seed (folded via [`seed_from_text`]).
    pub fn from_text(text: &str) -> Self {
        Self::new(seed_from_text(text))
    }

    /// Next uniform float in `[0, 1)`. One draw.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Bernoulli trial: true with the given probability. One draw.
    ///
    /// A probability of 0.0 is never true, 1.0 is always true.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Uniform index into `0..len`. One draw.
    ///
    /// # Panics
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot draw an index from an empty range");
        let idx = (self.next_f64() * len as f64) as usize;
        // next_f64 < 1.0 keeps idx < len; min guards the f64->usize edge
        idx.min(len - 1)
    }

    /// Uniform choice from a slice. One draw.
    ///
    /// # Panics
    /// Panics if `items` is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }
}

/// Folds a text seed into a numeric one (FNV-1a, 64-bit).
///
/// Stable across platforms and releases so saved text seeds keep producing
/// the same maps.
pub fn seed_from_text(text: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(FNV_PRIME))
}
