use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Returns a new individual holding copies of the same genes in a uniformly
/// random order.
///
/// Gene content is untouched, but paint order is part of the phenotype, so
/// the result generally renders differently wherever genes overlap.
pub fn shuffle(individual: &Individual, rng: &mut RandomNumberGenerator) -> Individual {
    let mut genes = individual.genes().to_vec();
    rng.shuffle(&mut genes);
    Individual::from_genes(genes)
}
