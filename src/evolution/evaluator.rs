//! # ParallelEvaluator
//!
//! Fills the fitness cache of every individual in a generation. Each
//! individual is one unit of work; the pool is created once and reused for
//! the whole run. `evaluate` returns only after every unit has finished, so
//! callers may sort immediately afterwards.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;
use crate::fitness::Challenge;
use crate::individual::Individual;

/// Lower bound on the pool size.
pub const MIN_WORKERS: usize = 2;

#[derive(Debug)]
pub struct ParallelEvaluator {
    pool: ThreadPool,
    parallel_threshold: usize,
}

impl ParallelEvaluator {
    /// Builds a pool of `max(workers, 2)` threads. `None` uses the
    /// available parallelism of the machine.
    ///
    /// # Errors
    ///
    /// Returns `EvoError::WorkerPool` if the threads cannot be spawned.
    pub fn new(workers: Option<usize>, parallel_threshold: usize) -> Result<Self> {
        let requested = workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(MIN_WORKERS)
        });
        let pool = ThreadPoolBuilder::new()
            .num_threads(requested.max(MIN_WORKERS))
            .thread_name(|i| format!("evoimage-eval-{}", i))
            .build()?;
        Ok(Self {
            pool,
            parallel_threshold,
        })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Evaluates every individual that needs it.
    ///
    /// Individuals with a valid cache are left alone. Small batches (below
    /// the parallel threshold) run on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the first rendering or scoring error encountered.
    pub fn evaluate<C>(&self, challenge: &C, individuals: &mut [Individual]) -> Result<()>
    where
        C: Challenge + ?Sized,
    {
        if individuals.len() < self.parallel_threshold {
            for individual in individuals.iter_mut() {
                individual.fitness(challenge)?;
            }
            return Ok(());
        }

        self.pool.install(|| {
            individuals
                .par_iter_mut()
                .try_for_each(|individual| individual.fitness(challenge).map(|_| ()))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fitness::{ColorMetric, ImageChallenge};
    use crate::genome::PrimitiveKind;
    use crate::rng::RandomNumberGenerator;
    use crate::target::Target;
    use image::{Rgba, RgbaImage};

    fn setup(n: usize) -> (ImageChallenge, Vec<Individual>) {
        let target = Arc::new(
            Target::from_rgba(RgbaImage::from_pixel(12, 9, Rgba([10, 140, 220, 255]))).unwrap(),
        );
        let mut rng = RandomNumberGenerator::from_seed(17);
        let individuals = (0..n)
            .map(|_| {
                Individual::random(
                    &PrimitiveKind::Polygon { vertices: 4 },
                    5,
                    &target,
                    None,
                    &mut rng,
                )
            })
            .collect();
        (ImageChallenge::new(target, ColorMetric::Rgb), individuals)
    }

    #[test]
    fn test_pool_has_at_least_two_workers() {
        let evaluator = ParallelEvaluator::new(Some(1), 2).unwrap();
        assert_eq!(evaluator.workers(), 2);
        let evaluator = ParallelEvaluator::new(Some(3), 2).unwrap();
        assert_eq!(evaluator.workers(), 3);
    }

    #[test]
    fn test_every_individual_evaluated() {
        let (challenge, mut individuals) = setup(40);
        let evaluator = ParallelEvaluator::new(Some(4), 2).unwrap();
        evaluator.evaluate(&challenge, &mut individuals).unwrap();
        assert!(individuals.iter().all(|ind| !ind.needs_render()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (challenge, mut parallel) = setup(24);
        let mut sequential = parallel.clone();

        ParallelEvaluator::new(Some(4), 1)
            .unwrap()
            .evaluate(&challenge, &mut parallel)
            .unwrap();
        ParallelEvaluator::new(Some(2), usize::MAX)
            .unwrap()
            .evaluate(&challenge, &mut sequential)
            .unwrap();

        for (a, b) in parallel.iter().zip(sequential.iter()) {
            assert_eq!(a.cached_fitness(), b.cached_fitness());
        }
    }
}
