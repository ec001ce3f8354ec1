//! # Random Source
//!
//! Deterministic, counter-based, splittable pseudo-random generator.
//!
//! ## Algorithm
//!
//! Each draw is `mix(seed, stream, counter)` followed by `counter += 1`, where
//! `mix` is a chain of SplitMix64 finalizers. A fork derives a fresh `stream`
//! from the parent's stream, a domain label and an index; it does not advance
//! the parent. Independent repetitions therefore never share draws, and replay
//! with the same seed yields the same sequence on every platform.
//!
//! No floating point, no system entropy.

use super::address::keccak256;
use serde::{Deserialize, Serialize};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
const STREAM_TWEAK: u64 = 0xD1B5_4A32_4F3A_9E55;

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic random source carried by every action context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSource {
    seed: u64,
    stream: u64,
    counter: u64,
}

impl RandomSource {
    /// Root source for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stream: 0,
            counter: 0,
        }
    }

    /// Root source seeded from an action's commitment bytes (e.g. a tx hash
    /// combined with the block's pre-evaluation hash).
    #[must_use]
    pub fn from_commitment(commitment: &[u8]) -> Self {
        let hash = keccak256(commitment);
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hash.as_bytes()[..8]);
        Self::new(u64::from_be_bytes(seed))
    }

    /// The root seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws taken from this stream.
    #[must_use]
    pub fn draws(&self) -> u64 {
        self.counter
    }

    /// Derives an independent sub-stream. The receiver is not advanced.
    #[must_use]
    pub fn fork(&self, domain: u64, index: u64) -> Self {
        let stream = splitmix64(
            self.stream ^ splitmix64(domain ^ STREAM_TWEAK) ^ index.wrapping_mul(GOLDEN_GAMMA),
        );
        Self {
            seed: self.seed,
            stream,
            counter: 0,
        }
    }

    /// Next 64 uniformly distributed bits.
    pub fn next_u64(&mut self) -> u64 {
        let value = splitmix64(self.seed ^ splitmix64(self.stream ^ splitmix64(self.counter)));
        self.counter += 1;
        value
    }

    /// Uniform value in `[0, upper)`. Returns 0 when `upper` is 0.
    ///
    /// Uses rejection sampling so every value is equally likely.
    pub fn next_below(&mut self, upper: u64) -> u64 {
        if upper <= 1 {
            return 0;
        }
        let zone = u64::MAX - (u64::MAX % upper);
        loop {
            let value = self.next_u64();
            if value < zone {
                return value % upper;
            }
        }
    }

    /// Uniform value in `[low, high]` (bounds swapped if reversed).
    pub fn next_inclusive(&mut self, low: u64, high: u64) -> u64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let span = high - low;
        if span == u64::MAX {
            return self.next_u64();
        }
        low + self.next_below(span + 1)
    }

    /// True with probability `permille / 1000` (clamped to certain at 1000).
    pub fn chance_permille(&mut self, permille: u32) -> bool {
        self.next_below(1000) < u64::from(permille)
    }
}
