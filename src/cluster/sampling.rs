//! Injectable randomness for k-means++ seeding.
//!
//! The initializer only ever needs two draws: a uniform index in `[0, n)` and
//! an index weighted by non-negative weights. [`IndexSampler`] exposes exactly
//! those, so tests and callers can script the draws.
//!
//! [`LcgSampler`] implements both on top of [`Lcg64`], a fully specified
//! linear congruential engine:
//!
//! ```text
//! x' = (6364136223846793005 · x + 1442695040888963407) mod (2⁶⁴ − 1)
//! ```
//!
//! The recurrence is evaluated in 128-bit arithmetic, and both samplers are
//! defined here rather than delegated to a distribution type, so a seeded
//! run draws the same indices on every platform and every `rand` release.

use log::trace;
use rand::{Rng, RngCore, SeedableRng};

/// LCG multiplier.
pub const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
/// LCG increment.
pub const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;
/// LCG modulus (2⁶⁴ − 1).
pub const LCG_MODULUS: u64 = u64::MAX;

/// Source of the two draws k-means++ needs.
pub trait IndexSampler {
    /// Uniform index in `[0, n)`. `n` is always positive.
    fn uniform_index(&mut self, n: usize) -> usize;

    /// Index drawn with probability proportional to `weights[i]`.
    ///
    /// Returns `weights.len()` when nothing can be selected (empty, zero or
    /// non-finite total). Callers map that sentinel to index 0.
    fn weighted_index(&mut self, weights: &[f64]) -> usize;
}

impl<S: IndexSampler + ?Sized> IndexSampler for &mut S {
    fn uniform_index(&mut self, n: usize) -> usize {
        (**self).uniform_index(n)
    }

    fn weighted_index(&mut self, weights: &[f64]) -> usize {
        (**self).weighted_index(weights)
    }
}

/// 64-bit linear congruential engine with modulus 2⁶⁴ − 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    /// Engine seeded with `seed mod (2⁶⁴ − 1)`.
    pub fn new(seed: u64) -> Self {
        let mut state = seed % LCG_MODULUS;
        // A zero state is only absorbing without an increment.
        if state == 0 && LCG_INCREMENT % LCG_MODULUS == 0 {
            state = 1;
        }
        Self { state }
    }

    /// Current state, i.e. the last value produced.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the recurrence and returns the new state.
    pub fn step(&mut self) -> u64 {
        let next = (u128::from(LCG_MULTIPLIER) * u128::from(self.state) + u128::from(LCG_INCREMENT))
            % u128::from(LCG_MODULUS);
        self.state = next as u64;
        self.state
    }
}

impl RngCore for Lcg64 {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lcg64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// [`IndexSampler`] backed by [`Lcg64`].
#[derive(Debug, Clone)]
pub struct LcgSampler {
    engine: Lcg64,
}

impl LcgSampler {
    /// Reproducible sampler.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            engine: Lcg64::new(seed),
        }
    }

    /// Sampler seeded with one `u64` from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        trace!("seeding k-means++ sampler from entropy");
        Self::from_seed(seed)
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Lcg64 {
        &self.engine
    }

    /// Top 53 bits of one draw, scaled to `[0, 1)`.
    fn unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.engine.next_u64() >> 11) as f64 * SCALE
    }
}

impl IndexSampler for LcgSampler {
    fn uniform_index(&mut self, n: usize) -> usize {
        ((u128::from(self.engine.next_u64()) * n as u128) >> 64) as usize
    }

    fn weighted_index(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if !(total.is_finite() && total > 0.0) {
            return weights.len();
        }

        let threshold = self.unit() * total;
        let mut cumulative = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            cumulative += w.max(0.0);
            if cumulative > threshold {
                return i;
            }
        }

        // Rounding left the threshold past the last bucket.
        weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lcg_first_values() {
        let mut zero = Lcg64::new(0);
        assert_eq!(zero.step(), LCG_INCREMENT);

        let mut one = Lcg64::new(1);
        assert_eq!(one.step(), LCG_MULTIPLIER + LCG_INCREMENT);
    }

    #[test]
    fn test_lcg_seed_is_reduced_mod_modulus() {
        let mut a = Lcg64::new(u64::MAX);
        let mut b = Lcg64::new(0);
        assert_eq!(a, b);
        for _ in 0..16 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn test_lcg_never_reaches_modulus() {
        let mut rng = Lcg64::seed_from_u64(7);
        for _ in 0..10_000 {
            assert!(rng.next_u64() < LCG_MODULUS);
        }
    }

    #[test]
    fn test_lcg_seedable_agrees_with_new() {
        let a = Lcg64::from_seed(42u64.to_le_bytes());
        assert_eq!(a, Lcg64::new(42));
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = Lcg64::new(3);
        let mut b = Lcg64::new(3);
        let mut buf = [0u8; 11];
        a.fill_bytes(&mut buf);
        let first = b.step().to_le_bytes();
        let second = b.step().to_le_bytes();
        assert_eq!(&buf[..8], &first);
        assert_eq!(&buf[8..], &second[..3]);
    }

    #[test]
    fn test_weighted_degenerate_returns_len() {
        let mut s = LcgSampler::from_seed(1);
        assert_eq!(s.weighted_index(&[]), 0);
        assert_eq!(s.weighted_index(&[0.0, 0.0, 0.0]), 3);
        assert_eq!(s.weighted_index(&[f64::INFINITY, 1.0]), 2);
        // NaN weights count as zero.
        assert_eq!(s.weighted_index(&[f64::NAN, 0.0]), 2);
        assert_eq!(s.weighted_index(&[f64::NAN, 3.0]), 1);
    }

    #[test]
    fn test_weighted_single_mass() {
        let mut s = LcgSampler::from_seed(99);
        for _ in 0..100 {
            assert_eq!(s.weighted_index(&[0.0, 0.0, 5.0, 0.0]), 2);
        }
    }

    #[test]
    fn test_weighted_favors_heavy_weight() {
        let mut s = LcgSampler::from_seed(2024);
        let weights = [1.0, 99.0];
        let heavy = (0..1000)
            .filter(|_| s.weighted_index(&weights) == 1)
            .count();
        assert!(heavy > 900, "heavy bucket drawn {heavy} times");
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = LcgSampler::from_seed(5);
        let mut b = LcgSampler::from_seed(5);
        for n in 1..50 {
            assert_eq!(a.uniform_index(n), b.uniform_index(n));
        }
        assert_eq!(a.engine(), b.engine());
    }

    #[test]
    fn test_entropy_sampler_draws_in_range() {
        let mut s = LcgSampler::from_entropy();
        for _ in 0..100 {
            assert!(s.uniform_index(3) < 3);
        }
    }

    proptest! {
        #[test]
        fn uniform_index_in_range(seed in any::<u64>(), n in 1usize..10_000) {
            let mut s = LcgSampler::from_seed(seed);
            for _ in 0..8 {
                prop_assert!(s.uniform_index(n) < n);
            }
        }

        #[test]
        fn weighted_index_never_picks_zero_weight(
            seed in any::<u64>(),
            weights in proptest::collection::vec(prop_oneof![Just(0.0), 0.001f64..1e6], 1..50),
        ) {
            let mut s = LcgSampler::from_seed(seed);
            let i = s.weighted_index(&weights);
            if weights.iter().all(|&w| w == 0.0) {
                prop_assert_eq!(i, weights.len());
            } else if i < weights.len() {
                prop_assert!(weights[i] > 0.0);
            }
        }
    }
}
