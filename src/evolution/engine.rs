//! One-generation evolution step.
//!
//! [`EvolutionEngine::step`] runs the fixed generational scheme:
//! halt check → pairing and recombination → culling → merge → resort.

use super::config::EvolutionConfig;
use super::pairing::{cull, select_pair};
use crate::error::Result;
use crate::random::RandomSource;
use crate::species::{Individual, Population};

/// Lifecycle of an engine.
///
/// `Converged` and `Halted` are terminal: once reached, every further
/// [`step`](EvolutionEngine::step) returns the same state without touching
/// the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    /// Generations are still being produced.
    Running,
    /// The configured generation limit was reached.
    Converged,
    /// The population's maximum fitness crossed the halt threshold.
    Halted,
}

impl EngineState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EngineState::Running)
    }
}

/// Drives a population through generations.
///
/// The engine owns no population or generator; both are passed to
/// [`step`](Self::step) so that callers control seeding and inspection.
///
/// # Usage
///
/// ```
/// use u_speciate::evolution::{EngineState, EvolutionConfig, EvolutionEngine};
/// use u_speciate::random::RandomSource;
/// use u_speciate::species::Population;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(50)
///     .with_cull_count(5)
///     .with_seed(1);
/// let mut rng = RandomSource::new(config.population_size, config.seed).unwrap();
/// let mut population = Population::random(50, config.genome_length, &mut rng);
/// let mut engine = EvolutionEngine::new(config).unwrap();
///
/// assert_eq!(engine.step(&mut population, &mut rng), EngineState::Running);
/// assert_eq!(population.len(), 50);
/// assert!(population.is_sorted_descending());
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    config: EvolutionConfig,
    state: EngineState,
    generation: usize,
    last_max_fitness: Option<u64>,
    forced_pairs: usize,
}

impl EvolutionEngine {
    /// Creates an engine in the `Running` state.
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: EngineState::Running,
            generation: 0,
            last_max_fitness: None,
            forced_pairs: 0,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of completed generations (halting checks excluded).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Maximum fitness observed at the start of the latest step.
    pub fn last_max_fitness(&self) -> Option<u64> {
        self.last_max_fitness
    }

    /// Pairings that hit the retry cap over the engine's lifetime.
    pub fn forced_pairs(&self) -> usize {
        self.forced_pairs
    }

    /// Runs one generation and returns the resulting state.
    ///
    /// 1. If the maximum fitness exceeds the halt threshold, transition to
    ///    `Halted` and leave the population untouched.
    /// 2. Select `cull_count` pairs from the full population and recombine
    ///    each into a child.
    /// 3. Remove `cull_count` random individuals.
    /// 4. Append the children and sort by descending fitness.
    ///
    /// # Panics
    /// Panics if the population holds fewer than two individuals, if it does
    /// not outnumber `cull_count`, or if `rng` draws indices against a
    /// nominal size other than `population_size`.
    pub fn step(&mut self, population: &mut Population, rng: &mut RandomSource) -> EngineState {
        if self.state.is_terminal() {
            return self.state;
        }
        assert!(
            population.len() >= 2,
            "evolution needs at least two individuals"
        );
        assert!(
            population.len() > self.config.cull_count,
            "population of {} cannot absorb a cull of {}",
            population.len(),
            self.config.cull_count
        );
        assert_eq!(
            rng.nominal_size(),
            self.config.population_size,
            "random source nominal size must match population_size"
        );

        let max_fitness = population.max_fitness().unwrap_or(0);
        self.last_max_fitness = Some(max_fitness);

        if max_fitness > self.config.halt_threshold {
            log::info!(
                "max fitness {} exceeds halt threshold {} at generation {}",
                max_fitness,
                self.config.halt_threshold,
                self.generation
            );
            self.state = EngineState::Halted;
            return self.state;
        }

        let children = self.breed(population, rng, max_fitness);

        cull(population, rng, self.config.cull_count);

        population.extend(children);
        population.sort_descending();

        self.generation += 1;
        if self
            .config
            .max_generations
            .is_some_and(|limit| self.generation >= limit)
        {
            log::info!("generation limit {} reached", self.generation);
            self.state = EngineState::Converged;
        }

        self.state
    }

    /// Produces `cull_count` children from the pre-cull population.
    fn breed(
        &mut self,
        population: &Population,
        rng: &mut RandomSource,
        max_fitness: u64,
    ) -> Vec<Individual> {
        let members = population.as_slice();
        let mut children = Vec::with_capacity(self.config.cull_count);

        for _ in 0..self.config.cull_count {
            let pair = select_pair(population, rng, max_fitness, self.config.max_pair_attempts);
            if pair.forced {
                self.forced_pairs += 1;
            }
            let child = members[pair.first].recombine_with(&members[pair.second], rng);
            children.push(child);
        }

        children
    }
}
