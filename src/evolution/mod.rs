//! Generational evolution engine.
//!
//! Each generation follows one fixed scheme:
//!
//! 1. **Halt check**: stop when the maximum fitness exceeds the threshold
//! 2. **Pairing**: draw mates whose fitness gap is within half the maximum
//! 3. **Recombination**: merge each pair gene by gene into one child
//! 4. **Culling**: remove as many random individuals as children were born
//! 5. **Merge and resort**: append children, sort by descending fitness
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: reference constants and the builder used by tests
//! - [`EvolutionEngine`]: executes one generation per [`step`](EvolutionEngine::step)
//! - [`EngineState`]: `Running`, `Converged` or `Halted`
//! - [`SimulationRunner`]: the outer loop that also writes snapshots
//!
//! # Submodules
//!
//! - [`pairing`]: capped rejection sampling for mates, and culling

mod config;
mod engine;
pub mod pairing;
mod runner;

pub use config::{
    EvolutionConfig, CULL_COUNT, GENOME_LENGTH, HALT_THRESHOLD, MAX_PAIR_ATTEMPTS,
    POPULATION_SIZE, SNAPSHOT_INTERVAL, SNAPSHOT_PATH, SNAPSHOT_STRIDE,
};
pub use engine::{EngineState, EvolutionEngine};
pub use runner::{SimulationResult, SimulationRunner};
