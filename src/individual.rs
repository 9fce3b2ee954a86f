//! # Individual
//!
//! One candidate image: a fixed-length ordered genome plus a lazily filled
//! evaluation cache. The cache is the only place a fitness value lives, and
//! every path that changes gene content goes through [`Individual::modify`] or
//! [`Individual::replace_gene`], which drop it. An individual with no cached
//! evaluation "needs render".

use std::sync::Arc;

use image::RgbaImage;

use crate::error::{EvoError, Result};
use crate::fitness::{Challenge, Evaluation};
use crate::genome::{Gene, PrimitiveKind};
use crate::rng::RandomNumberGenerator;
use crate::target::Target;

#[derive(Debug, Clone)]
pub struct Individual {
    genes: Vec<Gene>,
    evaluation: Option<Evaluation>,
}

impl Individual {
    /// Creates an unevaluated individual from an existing genome.
    pub fn from_genes(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            evaluation: None,
        }
    }

    /// Creates an individual with `length` fresh random genes.
    pub fn random(
        kind: &PrimitiveKind,
        length: usize,
        target: &Target,
        initial_alpha: Option<u8>,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let extent = target.extent();
        let genes = (0..length)
            .map(|_| Gene::random(kind, extent, initial_alpha, rng))
            .collect();
        Self::from_genes(genes)
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn needs_render(&self) -> bool {
        self.evaluation.is_none()
    }

    /// The cached fitness, if this individual has been evaluated.
    pub fn cached_fitness(&self) -> Option<f64> {
        self.evaluation.as_ref().map(Evaluation::fitness)
    }

    /// The cached canvas, if this individual has been evaluated.
    pub fn rendered(&self) -> Option<&Arc<RgbaImage>> {
        self.evaluation.as_ref().map(Evaluation::raster)
    }

    /// Returns the fitness, rendering and scoring first if the cache is empty.
    ///
    /// Repeated calls on an unchanged genome return the identical value
    /// without re-rendering.
    pub fn fitness<C: Challenge + ?Sized>(&mut self, challenge: &C) -> Result<f64> {
        Ok(self.evaluate(challenge)?.fitness())
    }

    /// Returns the rendered canvas, rendering first if the cache is empty.
    pub fn save<C: Challenge + ?Sized>(&mut self, challenge: &C) -> Result<Arc<RgbaImage>> {
        Ok(self.evaluate(challenge)?.raster().clone())
    }

    fn evaluate<C: Challenge + ?Sized>(&mut self, challenge: &C) -> Result<&Evaluation> {
        if self.evaluation.is_none() {
            self.evaluation = Some(challenge.evaluate(&self.genes)?);
        }
        self.evaluation.as_ref().ok_or(EvoError::NotEvaluated)
    }

    /// Drops the cached evaluation.
    pub fn invalidate(&mut self) {
        self.evaluation = None;
    }

    /// Replaces one gene and invalidates the cache.
    pub fn replace_gene(&mut self, index: usize, gene: Gene) -> Result<()> {
        let len = self.genes.len();
        let slot = self.genes.get_mut(index).ok_or_else(|| {
            EvoError::InvariantViolation(format!(
                "gene index {} out of range for genome of length {}",
                index, len
            ))
        })?;
        *slot = gene;
        self.invalidate();
        Ok(())
    }

    /// Edits the genome in place and drops the cache.
    ///
    /// The closure's return value is passed through as a report of whether
    /// anything changed; the cache is dropped either way. The genome length
    /// cannot change through this method.
    pub fn modify<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut [Gene]) -> bool,
    {
        let changed = edit(&mut self.genes);
        self.invalidate();
        changed
    }
}
