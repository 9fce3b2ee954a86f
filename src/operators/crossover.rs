use crate::error::{EvoError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Uniform gene-wise crossover.
///
/// Child 1 starts as a copy of `parent1` and child 2 of `parent2`; at each
/// position, independently with probability `rate`, the two children swap the
/// gene they receive. Genes are cloned, never shared, and both children come
/// back unevaluated.
///
/// # Errors
///
/// Returns `EvoError::GenomeLengthMismatch` if the parents differ in length.
///
/// # Examples
///
/// ```
/// use evoimage::genome::{Color, Gene, Point};
/// use evoimage::individual::Individual;
/// use evoimage::operators::crossover;
/// use evoimage::rng::RandomNumberGenerator;
///
/// let a = Individual::from_genes(vec![Gene::rectangle(Point::new(0, 0), Point::new(1, 1), Color::opaque(1, 0, 0))]);
/// let b = Individual::from_genes(vec![Gene::rectangle(Point::new(0, 0), Point::new(1, 1), Color::opaque(2, 0, 0))]);
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let (c1, c2) = crossover(&a, &b, 1.0, &mut rng).unwrap();
/// assert_eq!(c1.genes(), b.genes());
/// assert_eq!(c2.genes(), a.genes());
/// ```
pub fn crossover(
    parent1: &Individual,
    parent2: &Individual,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<(Individual, Individual)> {
    if parent1.len() != parent2.len() {
        return Err(EvoError::GenomeLengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }

    let mut genes1 = Vec::with_capacity(parent1.len());
    let mut genes2 = Vec::with_capacity(parent2.len());

    for (g1, g2) in parent1.genes().iter().zip(parent2.genes()) {
        let (from1, from2) = if rng.gen_probability() < rate {
            (g2, g1)
        } else {
            (g1, g2)
        };
        genes1.push(from1.clone());
        genes2.push(from2.clone());
    }

    Ok((Individual::from_genes(genes1), Individual::from_genes(genes2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Color, Gene, Point};

    fn individual(shade: u8, n: usize) -> Individual {
        Individual::from_genes(
            (0..n)
                .map(|i| {
                    Gene::polygon(
                        vec![Point::new(i as i32, 0), Point::new(0, 1), Point::new(1, 1)],
                        Color::opaque(shade, i as u8, 0),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_rate_zero_copies_parents() {
        let p1 = individual(10, 8);
        let p2 = individual(20, 8);
        let mut rng = RandomNumberGenerator::from_seed(1);

        let (c1, c2) = crossover(&p1, &p2, 0.0, &mut rng).unwrap();
        assert_eq!(c1.genes(), p1.genes());
        assert_eq!(c2.genes(), p2.genes());
        assert!(c1.needs_render() && c2.needs_render());
    }

    #[test]
    fn test_rate_one_swaps_everything() {
        let p1 = individual(10, 8);
        let p2 = individual(20, 8);
        let mut rng = RandomNumberGenerator::from_seed(2);

        let (c1, c2) = crossover(&p1, &p2, 1.0, &mut rng).unwrap();
        assert_eq!(c1.genes(), p2.genes());
        assert_eq!(c2.genes(), p1.genes());
    }

    #[test]
    fn test_children_partition_parent_genes() {
        let p1 = individual(10, 64);
        let p2 = individual(20, 64);
        let mut rng = RandomNumberGenerator::from_seed(3);

        let (c1, c2) = crossover(&p1, &p2, 0.5, &mut rng).unwrap();
        assert_eq!(c1.len(), 64);
        assert_eq!(c2.len(), 64);
        for i in 0..64 {
            let pair = (&c1.genes()[i], &c2.genes()[i]);
            let straight = (&p1.genes()[i], &p2.genes()[i]);
            let swapped = (&p2.genes()[i], &p1.genes()[i]);
            assert!(pair == straight || pair == swapped);
        }
    }

    #[test]
    fn test_children_do_not_alias_parents() {
        let p1 = individual(10, 4);
        let p2 = individual(20, 4);
        let mut rng = RandomNumberGenerator::from_seed(4);

        let (mut c1, _) = crossover(&p1, &p2, 0.0, &mut rng).unwrap();
        c1.modify(|genes| {
            genes[0].color_mut().r = 255;
            true
        });
        assert_eq!(p1.genes()[0].color().r, 10);
    }

    #[test]
    fn test_length_mismatch() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let result = crossover(&individual(1, 3), &individual(2, 4), 0.5, &mut rng);
        assert!(matches!(
            result,
            Err(EvoError::GenomeLengthMismatch { left: 3, right: 4 })
        ));
    }
}
