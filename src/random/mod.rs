//! Random source for the simulation.
//!
//! [`RandomSource`] owns a single generator stream and exposes the two
//! sampling policies the engine needs:
//!
//! - [`uniform_index`](RandomSource::uniform_index): a uniform index over the
//!   *nominal* population size, used for pairing and culling.
//! - [`normal_sample`](RandomSource::normal_sample): an integer draw from a
//!   normal distribution whose mean is picked once at construction.
//!
//! The generator is passed explicitly to every consumer. Two sources built
//! from the same seed produce identical streams.

use crate::error::{Result, SpeciateError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Upper bound (inclusive) for the randomly chosen mean of the normal draw.
pub const NORMAL_MEAN_MAX: u64 = 10;

/// Standard deviation of the normal draw.
pub const NORMAL_STD_DEV: f64 = 2.0;

/// Number of buckets a normal draw is reduced to for per-gene decisions.
pub const DECISION_BUCKETS: i64 = 10;

/// Explicitly owned generator with a uniform and a normal sampling policy.
///
/// Not thread-safe; one simulation loop owns one source.
///
/// # Examples
///
/// ```
/// use u_speciate::random::RandomSource;
///
/// let mut rng = RandomSource::from_seed(5000, 42).unwrap();
/// let idx = rng.uniform_index();
/// assert!(idx < 5000);
/// assert!(rng.gene_decision() <= 9);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    normal: Normal<f64>,
    mean: u64,
    nominal_size: usize,
}

impl RandomSource {
    /// Creates a source from an optional seed.
    ///
    /// `None` draws a seed from the thread-local entropy generator.
    pub fn new(nominal_size: usize, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        Self::from_seed(nominal_size, seed)
    }

    /// Creates a deterministic source from a fixed seed.
    ///
    /// The normal distribution's mean is drawn uniformly from
    /// `0..=NORMAL_MEAN_MAX` out of the same stream, so it is fixed for the
    /// lifetime of the source.
    pub fn from_seed(nominal_size: usize, seed: u64) -> Result<Self> {
        if nominal_size == 0 {
            return Err(SpeciateError::InvalidConfig(
                "nominal_size must be at least 1".into(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mean = rng.random_range(0..=NORMAL_MEAN_MAX);
        let normal = Normal::new(mean as f64, NORMAL_STD_DEV)
            .map_err(|e| SpeciateError::Distribution(e.to_string()))?;

        Ok(Self {
            rng,
            normal,
            mean,
            nominal_size,
        })
    }

    /// Uniform index in `[0, nominal_size - 1]`.
    ///
    /// Does not track the live population size; callers resample when the
    /// index is out of bounds.
    pub fn uniform_index(&mut self) -> usize {
        self.rng.random_range(0..self.nominal_size)
    }

    /// Normal draw truncated toward zero.
    ///
    /// May be negative when the mean sits near zero.
    pub fn normal_sample(&mut self) -> i64 {
        self.normal.sample(&mut self.rng) as i64
    }

    /// Normal draw reduced to `0..=9`.
    ///
    /// Negative draws wrap around (`-1` maps to `9`), so the bucket
    /// frequencies follow the bell curve folded around the mean rather than
    /// a uniform die.
    pub fn gene_decision(&mut self) -> u8 {
        self.normal_sample().rem_euclid(DECISION_BUCKETS) as u8
    }

    /// The mean chosen for the normal distribution at construction.
    pub fn mean(&self) -> u64 {
        self.mean
    }

    /// The nominal size uniform indices are drawn against.
    pub fn nominal_size(&self) -> usize {
        self.nominal_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_nominal_size_rejected() {
        assert!(RandomSource::from_seed(0, 1).is_err());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomSource::from_seed(5000, 7).unwrap();
        let mut b = RandomSource::from_seed(5000, 7).unwrap();
        assert_eq!(a.mean(), b.mean());
        for _ in 0..100 {
            assert_eq!(a.uniform_index(), b.uniform_index());
            assert_eq!(a.normal_sample(), b.normal_sample());
        }
    }

    #[test]
    fn test_uniform_index_in_range() {
        let mut rng = RandomSource::from_seed(13, 3).unwrap();
        let mut seen = [false; 13];
        for _ in 0..2000 {
            let idx = rng.uniform_index();
            assert!(idx < 13);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s), "every index should appear");
    }

    #[test]
    fn test_mean_within_bounds() {
        for seed in 0..50 {
            let rng = RandomSource::from_seed(10, seed).unwrap();
            assert!(rng.mean() <= NORMAL_MEAN_MAX);
        }
    }

    #[test]
    fn test_gene_decision_in_range() {
        for seed in 0..20 {
            let mut rng = RandomSource::from_seed(10, seed).unwrap();
            for _ in 0..500 {
                assert!(rng.gene_decision() <= 9);
            }
        }
    }

    #[test]
    fn test_normal_sample_centered_on_mean() {
        let mut rng = RandomSource::from_seed(10, 11).unwrap();
        let n = 20_000;
        let sum: i64 = (0..n).map(|_| rng.normal_sample()).sum();
        let avg = sum as f64 / n as f64;
        // Truncation toward zero pulls the average slightly toward 0.
        assert!(
            (avg - rng.mean() as f64).abs() < 1.0,
            "average {avg} too far from mean {}",
            rng.mean()
        );
    }

    #[test]
    fn test_gene_decision_not_uniform() {
        let mut rng = RandomSource::from_seed(10, 5).unwrap();
        let mut counts = [0usize; 10];
        for _ in 0..10_000 {
            counts[rng.gene_decision() as usize] += 1;
        }
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        // sd = 2 concentrates mass on a few buckets
        assert!(max > 3 * min.max(1), "counts look uniform: {counts:?}");
    }
}
