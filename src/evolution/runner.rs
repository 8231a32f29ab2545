//! Simulation driver loop.
//!
//! [`SimulationRunner`] builds the initial population and alternates
//! snapshots with engine steps until the engine reaches a terminal state:
//! initialization → (snapshot every `snapshot_interval`) → step → repeat →
//! final snapshot.

use super::config::EvolutionConfig;
use super::engine::{EngineState, EvolutionEngine};
use crate::error::{Result, SpeciateError};
use crate::random::RandomSource;
use crate::snapshot::SnapshotWriter;
use crate::species::Population;

/// Result of a simulation run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Engine steps invoked, including the one that detected a halt.
    pub generations: usize,

    /// Terminal state the engine ended in.
    pub final_state: EngineState,

    /// Snapshots written, including the final one.
    pub snapshots_written: usize,

    /// Highest fitness in the final population.
    pub best_fitness: u64,

    /// Maximum fitness observed at the start of each step.
    pub max_fitness_history: Vec<u64>,

    /// Pairings that hit the retry cap.
    pub forced_pairs: usize,

    /// Final population, sorted by descending fitness unless the run halted
    /// before its first generation.
    pub population: Population,
}

/// Executes the simulation loop.
///
/// # Usage
///
/// ```
/// use u_speciate::evolution::{EngineState, EvolutionConfig, SimulationRunner};
/// use u_speciate::snapshot::CsvSnapshotWriter;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(40)
///     .with_cull_count(4)
///     .with_snapshot_interval(5)
///     .with_snapshot_stride(10)
///     .with_max_generations(12)
///     .with_seed(7);
/// let mut writer = CsvSnapshotWriter::new(Vec::new(), config.snapshot_stride);
///
/// let result = SimulationRunner::run(&config, &mut writer).unwrap();
/// assert_eq!(result.final_state, EngineState::Converged);
/// assert_eq!(result.generations, 12);
/// // generations 0, 5, 10 plus the final snapshot
/// assert_eq!(result.snapshots_written, 4);
/// ```
pub struct SimulationRunner;

impl SimulationRunner {
    /// Runs a simulation from a freshly initialized random population.
    pub fn run<W: SnapshotWriter>(
        config: &EvolutionConfig,
        writer: &mut W,
    ) -> Result<SimulationResult> {
        config.validate()?;
        let mut rng = RandomSource::new(config.population_size, config.seed)?;
        log::info!(
            "initializing {} individuals of {} genes (normal mean {})",
            config.population_size,
            config.genome_length,
            rng.mean()
        );
        let population =
            Population::random(config.population_size, config.genome_length, &mut rng);
        Self::run_with(config, population, &mut rng, writer)
    }

    /// Runs a simulation from a caller-provided population and generator.
    ///
    /// The generator must draw indices against `config.population_size`,
    /// and the population must hold more than `config.cull_count`
    /// individuals (and at least two).
    pub fn run_with<W: SnapshotWriter>(
        config: &EvolutionConfig,
        mut population: Population,
        rng: &mut RandomSource,
        writer: &mut W,
    ) -> Result<SimulationResult> {
        let mut engine = EvolutionEngine::new(config.clone())?;
        if rng.nominal_size() != config.population_size {
            return Err(SpeciateError::InvalidConfig(format!(
                "random source nominal size {} does not match population_size {}",
                rng.nominal_size(),
                config.population_size
            )));
        }
        if population.len() < 2 || population.len() <= config.cull_count {
            return Err(SpeciateError::InvalidConfig(format!(
                "population of {} is too small for a cull of {}",
                population.len(),
                config.cull_count
            )));
        }
        let mut generation = 0usize;
        let mut snapshots_written = 0usize;
        let mut max_fitness_history = Vec::new();

        loop {
            if generation % config.snapshot_interval == 0 {
                writer.write_snapshot(&population)?;
                snapshots_written += 1;
                log::info!(
                    "snapshot at generation #{} (max fitness {:?})",
                    generation,
                    population.max_fitness()
                );
            }

            log::debug!("generation #{}", generation);
            let state = engine.step(&mut population, rng);
            generation += 1;

            if let Some(max) = engine.last_max_fitness() {
                max_fitness_history.push(max);
            }

            if state.is_terminal() {
                break;
            }
        }

        writer.write_snapshot(&population)?;
        snapshots_written += 1;

        let best_fitness = population.max_fitness().unwrap_or(0);
        log::info!(
            "simulation ended in state {:?} after {} generations (best fitness {}, forced pairs {})",
            engine.state(),
            generation,
            best_fitness,
            engine.forced_pairs()
        );

        Ok(SimulationResult {
            generations: generation,
            final_state: engine.state(),
            snapshots_written,
            best_fitness,
            max_fitness_history,
            forced_pairs: engine.forced_pairs(),
            population,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::CsvSnapshotWriter;
    use std::io;

    /// Records how many individuals each snapshot saw.
    #[derive(Default)]
    struct RecordingWriter {
        sizes: Vec<usize>,
        sorted: Vec<bool>,
    }

    impl SnapshotWriter for RecordingWriter {
        fn write_snapshot(&mut self, population: &Population) -> Result<()> {
            self.sizes.push(population.len());
            self.sorted.push(population.is_sorted_descending());
            Ok(())
        }
    }

    struct FailingWriter;

    impl SnapshotWriter for FailingWriter {
        fn write_snapshot(&mut self, _population: &Population) -> Result<()> {
            Err(SpeciateError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "unwritable",
            )))
        }
    }

    fn small_config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(60)
            .with_genome_length(5)
            .with_cull_count(6)
            .with_snapshot_interval(10)
            .with_snapshot_stride(20)
            .with_seed(42)
    }

    #[test]
    fn test_runs_until_generation_limit() {
        let config = small_config().with_max_generations(25);
        let mut writer = RecordingWriter::default();
        let result = SimulationRunner::run(&config, &mut writer).unwrap();

        assert_eq!(result.final_state, EngineState::Converged);
        assert_eq!(result.generations, 25);
        // generations 0, 10, 20 plus final
        assert_eq!(result.snapshots_written, 4);
        assert_eq!(writer.sizes, vec![60; 4]);
        assert_eq!(result.max_fitness_history.len(), 25);
        assert_eq!(result.population.len(), 60);
        // Only the initial population is unsorted.
        assert!(writer.sorted[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_runs_until_halt() {
        // Genes start below 60; amplification keeps pushing the maximum up
        // until it crosses a low threshold.
        let config = small_config().with_halt_threshold(2_000);
        let mut writer = RecordingWriter::default();
        let result = SimulationRunner::run(&config, &mut writer).unwrap();

        assert_eq!(result.final_state, EngineState::Halted);
        let last = *result.max_fitness_history.last().unwrap();
        assert!(last > 2_000);
        assert!(result.max_fitness_history[..result.max_fitness_history.len() - 1]
            .iter()
            .all(|&m| m <= 2_000));
        assert_eq!(result.generations, result.max_fitness_history.len());
        assert_eq!(result.snapshots_written, writer.sizes.len());
    }

    #[test]
    fn test_halt_on_first_step_still_snapshots_twice() {
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_genome_length(2)
            .with_cull_count(1)
            .with_halt_threshold(100);
        let population =
            Population::from_genomes(vec![vec![1, 1], vec![2, 2], vec![3, 3], vec![100, 100]]);
        let mut rng = RandomSource::from_seed(4, 3).unwrap();
        let mut writer = CsvSnapshotWriter::new(Vec::new(), 900);

        let result = SimulationRunner::run_with(&config, population, &mut rng, &mut writer).unwrap();

        assert_eq!(result.final_state, EngineState::Halted);
        assert_eq!(result.generations, 1);
        assert_eq!(result.snapshots_written, 2);
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "2, \n2, \n");
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = small_config().with_max_generations(15);
        let a = SimulationRunner::run(&config, &mut RecordingWriter::default()).unwrap();
        let b = SimulationRunner::run(&config, &mut RecordingWriter::default()).unwrap();
        assert_eq!(a.max_fitness_history, b.max_fitness_history);
        assert_eq!(a.best_fitness, b.best_fitness);
    }

    #[test]
    fn test_writer_failure_is_fatal() {
        let config = small_config().with_max_generations(5);
        let err = SimulationRunner::run(&config, &mut FailingWriter).unwrap_err();
        assert!(matches!(err, SpeciateError::Io(_)));
    }

    #[test]
    fn test_mismatched_source_rejected() {
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_genome_length(2)
            .with_cull_count(1);
        let population =
            Population::from_genomes(vec![vec![1, 1], vec![2, 2], vec![3, 3], vec![4, 4]]);
        let mut rng = RandomSource::from_seed(1, 1).unwrap();
        let err = SimulationRunner::run_with(
            &config,
            population,
            &mut rng,
            &mut RecordingWriter::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SpeciateError::InvalidConfig(_)));
    }

    #[test]
    fn test_population_smaller_than_cull_rejected() {
        let config = small_config();
        let population = Population::from_genomes((0..6u64).map(|i| vec![i]));
        let mut rng = RandomSource::from_seed(60, 1).unwrap();
        let mut writer = RecordingWriter::default();
        let err = SimulationRunner::run_with(&config, population, &mut rng, &mut writer)
            .unwrap_err();
        assert!(matches!(err, SpeciateError::InvalidConfig(_)));
        assert!(writer.sizes.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_types_are_serializable() {
        fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}
        assert_serde::<SimulationResult>();
        assert_serde::<Population>();
        assert_serde::<crate::species::Individual>();
        assert_serde::<EvolutionConfig>();
    }

    #[test]
    fn test_invalid_config() {
        let config = small_config().with_snapshot_interval(0);
        assert!(SimulationRunner::run(&config, &mut RecordingWriter::default()).is_err());
    }
}
