//! Generational species simulation.
//!
//! A fixed-size population of `u64` genomes evolves until its fittest
//! member crosses a halt threshold:
//!
//! - **Random source**: one explicitly owned generator with a uniform index
//!   policy and a normal per-gene decision policy.
//! - **Species**: individuals with a lazily frozen fitness (sum of genes),
//!   and the ordered population they form.
//! - **Evolution**: the generation step (fitness-banded pairing, per-gene
//!   recombination, random culling, resort) and the driver loop.
//! - **Snapshots**: append-only text lines sampling the sorted fitness
//!   curve every few hundred generations.
//!
//! # Architecture
//!
//! The engine never owns its population or generator; both are passed in
//! so a fixed seed reproduces a run exactly. All reference parameters are
//! named constants in [`evolution`].

pub mod error;
pub mod evolution;
pub mod random;
pub mod snapshot;
pub mod species;

pub use error::{Result, SpeciateError};
