//! Simulation configuration.
//!
//! The reference run uses fixed constants; [`EvolutionConfig`] carries them
//! so tests and benches can shrink the population without touching the
//! engine.

use crate::error::{Result, SpeciateError};

/// Nominal population size.
pub const POPULATION_SIZE: usize = 5000;

/// Genes per individual.
pub const GENOME_LENGTH: usize = 10;

/// Individuals culled (and children produced) per generation.
pub const CULL_COUNT: usize = 20;

/// Maximum fitness above which the engine halts.
///
/// Sits just below `u64::MAX` so that the amplification branch of
/// recombination cannot wrap the fittest individual unnoticed.
pub const HALT_THRESHOLD: u64 = 18_446_744_071_749_127_043;

/// Pairing attempts per child before the closest pair seen is accepted.
pub const MAX_PAIR_ATTEMPTS: usize = 10_000;

/// Generations between snapshots.
pub const SNAPSHOT_INTERVAL: usize = 200;

/// Index stride of the fitness sample written per snapshot.
pub const SNAPSHOT_STRIDE: usize = 900;

/// Default snapshot destination.
pub const SNAPSHOT_PATH: &str = "parents.csv";

/// Configuration for the evolution engine and its driver loop.
///
/// # Defaults
///
/// ```
/// use u_speciate::evolution::{EvolutionConfig, POPULATION_SIZE};
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, POPULATION_SIZE);
/// assert!(config.max_generations.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_speciate::evolution::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_cull_count(5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Nominal population size. Uniform indices are always drawn against
    /// this value, never against the live length.
    pub population_size: usize,

    /// Genes per individual.
    pub genome_length: usize,

    /// Children produced and individuals culled per generation.
    pub cull_count: usize,

    /// Maximum fitness above which the engine halts.
    pub halt_threshold: u64,

    /// Pairing attempts per child before falling back to the closest pair.
    pub max_pair_attempts: usize,

    /// Generations between snapshots.
    pub snapshot_interval: usize,

    /// Index stride of each snapshot sample.
    pub snapshot_stride: usize,

    /// Generation count after which the engine reports `Converged`.
    ///
    /// `None` runs until the halt threshold is crossed.
    pub max_generations: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            genome_length: GENOME_LENGTH,
            cull_count: CULL_COUNT,
            halt_threshold: HALT_THRESHOLD,
            max_pair_attempts: MAX_PAIR_ATTEMPTS,
            snapshot_interval: SNAPSHOT_INTERVAL,
            snapshot_stride: SNAPSHOT_STRIDE,
            max_generations: None,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the nominal population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the genome length.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the per-generation cull (and child) count.
    pub fn with_cull_count(mut self, n: usize) -> Self {
        self.cull_count = n;
        self
    }

    /// Sets the halt threshold.
    pub fn with_halt_threshold(mut self, threshold: u64) -> Self {
        self.halt_threshold = threshold;
        self
    }

    /// Sets the pairing retry cap.
    pub fn with_max_pair_attempts(mut self, n: usize) -> Self {
        self.max_pair_attempts = n;
        self
    }

    /// Sets the snapshot interval in generations.
    pub fn with_snapshot_interval(mut self, n: usize) -> Self {
        self.snapshot_interval = n;
        self
    }

    /// Sets the snapshot sample stride.
    pub fn with_snapshot_stride(mut self, n: usize) -> Self {
        self.snapshot_stride = n;
        self
    }

    /// Caps the run at `n` generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(SpeciateError::InvalidConfig(msg.into())) };

        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.genome_length == 0 {
            return invalid("genome_length must be at least 1");
        }
        if self.cull_count == 0 {
            return invalid("cull_count must be at least 1");
        }
        if self.cull_count >= self.population_size {
            return invalid("cull_count must be smaller than population_size");
        }
        if self.max_pair_attempts == 0 {
            return invalid("max_pair_attempts must be at least 1");
        }
        if self.snapshot_interval == 0 {
            return invalid("snapshot_interval must be at least 1");
        }
        if self.snapshot_stride == 0 {
            return invalid("snapshot_stride must be at least 1");
        }
        if self.max_generations == Some(0) {
            return invalid("max_generations must be positive or None");
        }
        Ok(())
    }
}
