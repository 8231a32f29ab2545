//! Ordered population container.

use super::types::Individual;
use crate::random::RandomSource;

/// An ordered collection of individuals.
///
/// After every engine step the population is sorted by descending fitness,
/// so index 0 holds the fittest individual.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `size` random individuals of `genome_length` genes each.
    pub fn random(size: usize, genome_length: usize, rng: &mut RandomSource) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(rng, genome_length))
            .collect();
        Self { individuals }
    }

    /// Wraps an existing list of individuals, keeping their order.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Builds a population from raw genomes.
    pub fn from_genomes<I>(genomes: I) -> Self
    where
        I: IntoIterator<Item = Vec<u64>>,
    {
        Self {
            individuals: genomes.into_iter().map(Individual::from_genome).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.individuals
    }

    /// Highest fitness in the population, `None` when empty.
    pub fn max_fitness(&self) -> Option<u64> {
        self.individuals.iter().map(Individual::fitness).max()
    }

    /// Removes and returns the individual at `index`, shifting later ones.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Individual {
        self.individuals.remove(index)
    }

    /// Appends individuals at the end.
    pub fn extend<I>(&mut self, individuals: I)
    where
        I: IntoIterator<Item = Individual>,
    {
        self.individuals.extend(individuals);
    }

    /// Stable sort by descending fitness.
    pub fn sort_descending(&mut self) {
        self.individuals
            .sort_by_key(|ind| std::cmp::Reverse(ind.fitness()));
    }

    /// Whether fitness is non-increasing from front to back.
    pub fn is_sorted_descending(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|w| w[0].fitness() >= w[1].fitness())
    }

    pub fn into_inner(self) -> Vec<Individual> {
        self.individuals
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_population() {
        let mut rng = RandomSource::from_seed(50, 1).unwrap();
        let pop = Population::random(50, 10, &mut rng);
        assert_eq!(pop.len(), 50);
        assert!(pop.iter().all(|ind| ind.genome_len() == 10));
    }

    #[test]
    fn test_max_fitness() {
        let pop = Population::from_genomes(vec![vec![1, 1], vec![100, 100], vec![3, 3]]);
        assert_eq!(pop.max_fitness(), Some(200));
        assert_eq!(Population::default().max_fitness(), None);
    }

    #[test]
    fn test_sort_descending() {
        let mut pop =
            Population::from_genomes(vec![vec![1, 1], vec![100, 100], vec![3, 3], vec![2, 2]]);
        assert!(!pop.is_sorted_descending());
        pop.sort_descending();
        assert!(pop.is_sorted_descending());
        let fitness: Vec<u64> = pop.iter().map(Individual::fitness).collect();
        assert_eq!(fitness, vec![200, 6, 4, 2]);
    }

    #[test]
    fn test_individuals_round_trip_keeps_order() {
        let individuals = vec![
            Individual::from_genome(vec![4]),
            Individual::from_genome(vec![9]),
            Individual::from_genome(vec![1]),
        ];
        let pop = Population::from_individuals(individuals);
        assert_eq!(pop.len(), 3);
        let fitness: Vec<u64> = pop.into_inner().iter().map(Individual::fitness).collect();
        assert_eq!(fitness, vec![4, 9, 1]);
    }

    #[test]
    fn test_remove_and_extend() {
        let mut pop = Population::from_genomes(vec![vec![1], vec![2], vec![3]]);
        let removed = pop.remove(1);
        assert_eq!(removed.fitness(), 2);
        assert_eq!(pop.len(), 2);
        pop.extend(vec![Individual::from_genome(vec![9])]);
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.get(2).map(Individual::fitness), Some(9));
    }
}
