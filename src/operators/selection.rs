use std::fmt::Debug;

use crate::error::{EvoError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection.
///
/// Every strategy assumes the population is sorted best-first (ascending
/// fitness), so an index doubles as a rank.
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Picks the index of one parent from a sorted population of `len` members.
    ///
    /// # Errors
    ///
    /// Returns `EvoError::EmptyPopulation` if `len` is zero.
    fn select_index(&self, len: usize, rng: &mut RandomNumberGenerator) -> Result<usize>;

    /// Picks one parent from a sorted population.
    fn select<'a>(
        &self,
        population: &'a [Individual],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual> {
        let idx = self.select_index(population.len(), rng)?;
        population.get(idx).ok_or_else(|| {
            EvoError::InvariantViolation(format!(
                "selection returned index {} for a population of {}",
                idx,
                population.len()
            ))
        })
    }
}

/// Tournament selection over a sorted population.
///
/// Draws `tournament_size` indices uniformly (with replacement) and returns
/// the smallest, which is the fittest contestant. A size of 1 is uniform
/// random choice; larger sizes bias toward the front of the population.
///
/// # Examples
///
/// ```
/// use evoimage::operators::{SelectionStrategy, TournamentSelection};
/// use evoimage::rng::RandomNumberGenerator;
///
/// let selection = TournamentSelection::new(3).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let idx = selection.select_index(10, &mut rng).unwrap();
/// assert!(idx < 10);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(EvoError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select_index(&self, len: usize, rng: &mut RandomNumberGenerator) -> Result<usize> {
        if len == 0 {
            return Err(EvoError::EmptyPopulation);
        }
        let winner = (0..self.tournament_size)
            .map(|_| rng.gen_index(len))
            .min()
            .unwrap_or(0);
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Color, Gene, Point};

    fn population(n: usize) -> Vec<Individual> {
        (0..n)
            .map(|i| {
                Individual::from_genes(vec![Gene::rectangle(
                    Point::new(0, 0),
                    Point::new(1, 1),
                    Color::opaque(i as u8, 0, 0),
                )])
            })
            .collect()
    }

    fn mean_rank(size: usize, trials: usize, seed: u64) -> f64 {
        let selection = TournamentSelection::new(size).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let total: usize = (0..trials)
            .map(|_| selection.select_index(20, &mut rng).unwrap())
            .sum();
        total as f64 / trials as f64
    }

    #[test]
    fn test_select_returns_member() {
        let pop = population(5);
        let mut rng = RandomNumberGenerator::from_seed(42);
        let selection = TournamentSelection::default();
        for _ in 0..100 {
            let chosen = selection.select(&pop, &mut rng).unwrap();
            assert!(pop.iter().any(|ind| ind.genes() == chosen.genes()));
        }
    }

    #[test]
    fn test_empty_population() {
        let mut rng = RandomNumberGenerator::from_seed(42);
        let selection = TournamentSelection::default();
        assert!(matches!(
            selection.select(&[], &mut rng),
            Err(EvoError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_invalid_size() {
        assert!(TournamentSelection::new(0).is_err());
        assert_eq!(TournamentSelection::new(4).unwrap().tournament_size(), 4);
        assert_eq!(TournamentSelection::default().tournament_size(), 2);
    }

    #[test]
    fn test_single_member_always_wins() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let selection = TournamentSelection::new(5).unwrap();
        for _ in 0..50 {
            assert_eq!(selection.select_index(1, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_larger_tournaments_pick_better_ranks() {
        let ranks: Vec<f64> = (1..=6).map(|size| mean_rank(size, 5000, 17)).collect();
        for pair in ranks.windows(2) {
            assert!(pair[1] <= pair[0], "mean ranks not monotone: {:?}", ranks);
        }
        // Size 1 is uniform over 0..20
        assert!((ranks[0] - 9.5).abs() < 0.5);
    }
}
