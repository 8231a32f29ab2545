//! Individuals and the population they live in.
//!
//! # Key Types
//!
//! - [`Individual`]: a genome of `u64` genes with a lazily frozen fitness
//! - [`Fitness`]: the two-state fitness cache (`Pending` / `Frozen`)
//! - [`Population`]: the ordered collection the engine evolves

mod population;
mod types;

pub use population::Population;
pub use types::{Fitness, Individual};
