//! Individual and fitness definitions.
//!
//! An [`Individual`] is a genome of unsigned genes plus a [`Fitness`] that
//! starts out [`Pending`](Fitness::Pending) and freezes on first read.

use crate::random::RandomSource;
use std::cell::Cell;

/// Decision above which a child gene is the sum of both parents' genes.
const AMPLIFY_ABOVE: u8 = 8;

/// Decision above which a child inherits the receiving parent's gene.
const INHERIT_SELF_ABOVE: u8 = 5;

/// Two-state fitness cache.
///
/// The transition `Pending -> Frozen` happens exactly once, on the first
/// call to [`Individual::fitness`]. A frozen value is never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fitness {
    /// Not yet computed; the genome may still grow.
    #[default]
    Pending,
    /// Computed and fixed for the lifetime of the individual.
    Frozen(u64),
}

impl Fitness {
    /// Returns the frozen value, if any.
    pub fn value(self) -> Option<u64> {
        match self {
            Fitness::Pending => None,
            Fitness::Frozen(v) => Some(v),
        }
    }
}

/// One genome-bearing member of the population.
///
/// # Examples
///
/// ```
/// use u_speciate::species::Individual;
///
/// let ind = Individual::from_genome(vec![1, 2, 3]);
/// assert!(!ind.is_frozen());
/// assert_eq!(ind.fitness(), 6);
/// assert!(ind.is_frozen());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    genome: Vec<u64>,
    fitness: Cell<Fitness>,
}

impl Individual {
    /// Creates an individual with an empty genome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an individual from an existing genome.
    pub fn from_genome(genome: Vec<u64>) -> Self {
        Self {
            genome,
            fitness: Cell::new(Fitness::Pending),
        }
    }

    /// Creates an individual with `genome_length` genes, each drawn from
    /// [`RandomSource::uniform_index`].
    pub fn random(rng: &mut RandomSource, genome_length: usize) -> Self {
        let mut ind = Self::new();
        for _ in 0..genome_length {
            ind.append_gene(rng.uniform_index() as u64);
        }
        ind
    }

    /// Appends one gene while the individual is still under construction.
    ///
    /// # Panics
    /// Panics if the fitness has already been frozen.
    pub fn append_gene(&mut self, value: u64) {
        assert!(
            !self.is_frozen(),
            "cannot append a gene after fitness has been read"
        );
        self.genome.push(value);
    }

    /// The genome, in order.
    pub fn genome(&self) -> &[u64] {
        &self.genome
    }

    /// Number of genes.
    pub fn genome_len(&self) -> usize {
        self.genome.len()
    }

    /// Current state of the fitness cache.
    pub fn fitness_state(&self) -> Fitness {
        self.fitness.get()
    }

    /// Whether the fitness has been computed and frozen.
    pub fn is_frozen(&self) -> bool {
        matches!(self.fitness.get(), Fitness::Frozen(_))
    }

    /// Returns the fitness, computing and freezing it on first call.
    ///
    /// Fitness is the wrapping sum of all genes.
    pub fn fitness(&self) -> u64 {
        match self.fitness.get() {
            Fitness::Frozen(v) => v,
            Fitness::Pending => {
                let v = self
                    .genome
                    .iter()
                    .fold(0u64, |acc, &g| acc.wrapping_add(g));
                self.fitness.set(Fitness::Frozen(v));
                v
            }
        }
    }

    /// Absolute difference between the two fitness values.
    pub fn fitness_difference(&self, other: &Individual) -> u64 {
        self.fitness().abs_diff(other.fitness())
    }

    /// Produces one child by per-gene recombination with `partner`.
    ///
    /// For each position a decision `r` in `0..=9` is drawn from
    /// [`RandomSource::gene_decision`]:
    ///
    /// - `r > 8`: the child gene is the (wrapping) sum of both genes
    /// - `r > 5`: the child inherits this individual's gene
    /// - otherwise: the child inherits the partner's gene
    ///
    /// Because `r` comes from a folded normal draw, the branch frequencies
    /// depend on the source's mean rather than the 10% / 30% / 60% split a
    /// uniform die would give.
    ///
    /// # Panics
    /// Panics if the genomes have different lengths.
    pub fn recombine_with(&self, partner: &Individual, rng: &mut RandomSource) -> Individual {
        assert_eq!(
            self.genome.len(),
            partner.genome.len(),
            "parents must have equal genome length"
        );

        let mut child = Individual::new();
        for (&mine, &theirs) in self.genome.iter().zip(partner.genome.iter()) {
            let r = rng.gene_decision();
            let gene = if r > AMPLIFY_ABOVE {
                mine.wrapping_add(theirs)
            } else if r > INHERIT_SELF_ABOVE {
                mine
            } else {
                theirs
            };
            child.append_gene(gene);
        }
        child
    }
}
