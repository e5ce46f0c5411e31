//! Seeded value source.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::range::ValueRange;

/// Unbounded stream of values uniformly spread over a [`ValueRange`].
///
/// Backed by ChaCha8, whose output for a given seed is fixed across
/// platforms and crate versions. Every value costs exactly one `next_u32`,
/// so the n-th value depends only on the seed and n. The stream never ends.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: ChaCha8Rng,
    range: ValueRange,
    span: u64,
}

impl Sampler {
    /// Seeds a fresh sampler for one generation run.
    #[must_use]
    pub fn new(seed: u64, range: ValueRange) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            range,
            span: range.span(),
        }
    }

    /// Draws the next value.
    pub fn draw(&mut self) -> i64 {
        // span <= 2^32, so the product stays below 2^64 and the shifted
        // result is always < span.
        let x = u64::from(self.rng.next_u32());
        let offset = (x * self.span) >> 32;
        self.range.lo + offset as i64
    }
}

impl Iterator for Sampler {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
