//! Mate pairing and culling.
//!
//! Both phases draw indices from [`RandomSource::uniform_index`], which
//! targets the nominal population size, and resample while the index is out
//! of bounds for the live population.
//!
//! Pairing is rejection sampling: a pair is accepted only when the fitness
//! gap between the two mates is at most half the generation's maximum
//! fitness. The loop is capped; once the cap is hit the closest pair seen is
//! accepted instead.

use crate::random::RandomSource;
use crate::species::Population;

/// An accepted mating pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    /// Index of the receiving parent.
    pub first: usize,
    /// Index of the partner; always differs from `first`.
    pub second: usize,
    /// Fitness gap between the two parents.
    pub difference: u64,
    /// Number of candidate pairs drawn, including the accepted one.
    pub attempts: usize,
    /// Whether the retry cap forced acceptance of the closest pair seen.
    pub forced: bool,
}

/// Largest fitness gap a pair may have to be accepted.
pub fn acceptance_band(max_fitness: u64) -> u64 {
    max_fitness >> 1
}

/// Draws a uniform index, resampling until it is below `len`.
///
/// # Panics
/// Panics if `len` is zero.
pub fn sample_index(rng: &mut RandomSource, len: usize) -> usize {
    assert!(len > 0, "cannot sample an index from an empty population");
    let mut idx = rng.uniform_index();
    while idx >= len {
        idx = rng.uniform_index();
    }
    idx
}

/// Selects one mating pair by capped rejection sampling.
///
/// Each attempt draws two distinct indices. The pair is accepted when its
/// fitness difference is within [`acceptance_band`]. After `max_attempts`
/// rejected candidates the pair with the smallest difference is returned
/// with `forced` set.
///
/// # Panics
/// Panics if the population has fewer than two individuals, if `rng`
/// cannot draw two distinct indices, or if `max_attempts` is zero.
pub fn select_pair(
    population: &Population,
    rng: &mut RandomSource,
    max_fitness: u64,
    max_attempts: usize,
) -> Pair {
    assert!(population.len() >= 2, "pairing needs at least two individuals");
    assert!(
        rng.nominal_size() >= 2,
        "random source must cover at least two indices"
    );
    assert!(max_attempts > 0, "max_attempts must be positive");

    let band = acceptance_band(max_fitness);
    let slice = population.as_slice();
    let mut best: Option<Pair> = None;

    for attempt in 1..=max_attempts {
        let first = sample_index(rng, slice.len());
        let mut second = sample_index(rng, slice.len());
        while second == first {
            second = sample_index(rng, slice.len());
        }

        let difference = slice[first].fitness_difference(&slice[second]);
        let candidate = Pair {
            first,
            second,
            difference,
            attempts: attempt,
            forced: false,
        };

        if difference <= band {
            return candidate;
        }

        if best.map_or(true, |b| difference < b.difference) {
            best = Some(candidate);
        }
    }

    let mut pair = best.expect("at least one candidate was drawn");
    pair.attempts = max_attempts;
    pair.forced = true;
    log::warn!(
        "pairing gave up after {} attempts; accepting closest pair ({}, {}) with gap {} > band {}",
        max_attempts,
        pair.first,
        pair.second,
        pair.difference,
        band
    );
    pair
}

/// Removes `count` randomly chosen individuals, one at a time.
///
/// Each removal shifts later individuals down, so every draw is validated
/// against the population's current length. Stops early if the population
/// empties. Returns the number removed.
pub fn cull(population: &mut Population, rng: &mut RandomSource, count: usize) -> usize {
    let mut removed = 0;
    for _ in 0..count {
        if population.is_empty() {
            break;
        }
        let idx = sample_index(rng, population.len());
        population.remove(idx);
        removed += 1;
    }
    removed
}
