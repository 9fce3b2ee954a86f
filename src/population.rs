//! # Population
//!
//! An ordered collection of individuals with aggregate fitness statistics.
//! After [`Population::sort`], index 0 is the best (lowest fitness) and the
//! last index the worst. Aggregates read cached fitness only, so the
//! population must be evaluated first.

use crate::error::{EvoError, OptionExt, Result};
use crate::genome::PrimitiveKind;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;
use crate::target::Target;

#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Creates `size` random individuals of `genome_length` genes each.
    pub fn random(
        size: usize,
        kind: &PrimitiveKind,
        genome_length: usize,
        target: &Target,
        initial_alpha: Option<u8>,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(kind, genome_length, target, initial_alpha, rng))
            .collect();
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn as_mut_slice(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Cached fitness of every member, in population order.
    ///
    /// # Errors
    ///
    /// Returns `EvoError::NotEvaluated` if any member has no cached fitness.
    pub fn fitness_values(&self) -> Result<Vec<f64>> {
        self.individuals
            .iter()
            .map(|ind| ind.cached_fitness().ok_or(EvoError::NotEvaluated))
            .collect()
    }

    /// Orders the population best-first (ascending fitness).
    pub fn sort(&mut self) -> Result<()> {
        // Check up front so the comparator never sees a missing score.
        self.fitness_values()?;
        self.individuals.sort_by(|a, b| {
            let fa = a.cached_fitness().unwrap_or(f64::INFINITY);
            let fb = b.cached_fitness().unwrap_or(f64::INFINITY);
            fa.total_cmp(&fb)
        });
        Ok(())
    }

    pub fn best(&self) -> Result<&Individual> {
        self.individuals
            .first()
            .ok_or_else_evo(|| EvoError::EmptyPopulation)
    }

    pub fn worst(&self) -> Result<&Individual> {
        self.individuals
            .last()
            .ok_or_else_evo(|| EvoError::EmptyPopulation)
    }

    pub fn total_fitness(&self) -> Result<f64> {
        Ok(self.fitness_values()?.iter().sum())
    }

    pub fn mean_fitness(&self) -> Result<f64> {
        if self.individuals.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }
        Ok(self.total_fitness()? / self.individuals.len() as f64)
    }
}
