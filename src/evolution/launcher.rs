use chrono::Local;
use tracing::{debug, info};

use super::{
    adaptation::{AdaptedParameters, Adaptation, StallTracker},
    evaluator::ParallelEvaluator,
    options::{EvolutionOptions, LogLevel},
    report::{GenerationObserver, GenerationReport},
    termination::{check_termination, TerminationReason},
};
use crate::{
    error::{EvoError, Result},
    fitness::Challenge,
    genome::Extent,
    individual::Individual,
    operators::{crossover, shuffle, GaussianMutation, SelectionStrategy, TournamentSelection},
    population::Population,
    rng::RandomNumberGenerator,
};

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual of the final generation, with its evaluation cached.
    pub best: Individual,
    pub best_fitness: f64,
    /// Number of generations evaluated.
    pub generations: usize,
    pub reason: TerminationReason,
    /// Report of the final generation.
    pub last_report: GenerationReport,
}

/// Drives the generational loop for one challenge.
#[derive(Debug)]
pub struct EvolutionLauncher<C: Challenge> {
    challenge: C,
    options: EvolutionOptions,
    evaluator: ParallelEvaluator,
}

impl<C: Challenge> EvolutionLauncher<C> {
    /// Creates a launcher and its worker pool.
    ///
    /// # Errors
    ///
    /// Returns `EvoError::Configuration` if the options are invalid, or
    /// `EvoError::WorkerPool` if the pool cannot be started. Nothing is
    /// evaluated in either case.
    pub fn new(challenge: C, options: EvolutionOptions) -> Result<Self> {
        options.validate()?;
        let evaluator =
            ParallelEvaluator::new(options.get_workers(), options.get_parallel_threshold())?;
        Ok(Self {
            challenge,
            options,
            evaluator,
        })
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn evaluator(&self) -> &ParallelEvaluator {
        &self.evaluator
    }

    /// Runs the evolution from a random initial population until a
    /// termination condition is met.
    ///
    /// Every generation goes through evaluate, sort, measure, the
    /// termination check, the observer, adaptation and reproduction. The
    /// generation that ends the run is not passed to the observer; it is
    /// returned in the result instead.
    ///
    /// # Errors
    ///
    /// Fails on any rendering or scoring error, on an observer error, or
    /// on an internal invariant violation. No partial result is returned.
    pub fn evolve<O>(
        &self,
        rng: &mut RandomNumberGenerator,
        observer: &mut O,
    ) -> Result<EvolutionResult>
    where
        O: GenerationObserver + ?Sized,
    {
        let population = Population::random(
            self.options.get_population_size(),
            self.options.get_primitive(),
            self.options.get_genome_length(),
            self.challenge.target(),
            self.options.get_initial_alpha(),
            rng,
        );
        self.evolve_from(population, rng, observer)
    }

    /// Runs the evolution from a caller-supplied initial population.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`Self::evolve`], fails with
    /// `EvoError::EmptyPopulation` or `EvoError::GenomeLengthMismatch` if the
    /// population does not fit the configured genome length.
    pub fn evolve_from<O>(
        &self,
        mut population: Population,
        rng: &mut RandomNumberGenerator,
        observer: &mut O,
    ) -> Result<EvolutionResult>
    where
        O: GenerationObserver + ?Sized,
    {
        self.check_initial(&population)?;

        let options = &self.options;
        let log_level = *options.get_log_level();
        let extent = self.challenge.target().extent();
        let mut stall = StallTracker::new(options.get_stall_epsilon());
        let mut adaptation = Adaptation::new(options);

        if log_level != LogLevel::None {
            info!(
                workers = self.evaluator.workers(),
                population_size = population.len(),
                genome_length = options.get_genome_length(),
                "Starting evolution"
            );
        }

        let mut generation = 0;
        loop {
            // Evaluate + Sort
            self.evaluator
                .evaluate(&self.challenge, population.as_mut_slice())?;
            population.sort()?;

            // Measure
            let best = fitness_of(population.best()?)?;
            let worst = fitness_of(population.worst()?)?;
            let mean = population.mean_fitness()?;
            let stall_count = stall.observe(best);
            let params = adaptation.adapt(best, stall_count);

            let report = GenerationReport {
                generation,
                best,
                worst,
                mean,
                population_size: population.len(),
                stall_count,
                tournament_size: params.tournament_size,
                mutation_rate: params.mutation_rate,
                timestamp: Local::now(),
            };

            if log_level != LogLevel::None {
                info!(
                    generation,
                    population_size = report.population_size,
                    stall_count,
                    tournament_size = params.tournament_size,
                    mutation_rate = params.mutation_rate,
                    best,
                    mean,
                    worst,
                    "Generation evaluated"
                );
            }

            if let Some(reason) = check_termination(options, generation, best, stall_count) {
                if log_level != LogLevel::None {
                    info!(%reason, generation, best, "Evolution finished");
                }
                let best_individual = population.best()?.clone();
                return Ok(EvolutionResult {
                    best: best_individual,
                    best_fitness: best,
                    generations: generation + 1,
                    reason,
                    last_report: report,
                });
            }

            // Persist
            observer.on_generation(&report, population.best()?)?;

            // Adapt + Reproduce
            population = self.reproduce(&population, &params, stall_count, extent, rng)?;
            generation += 1;
        }
    }

    fn check_initial(&self, population: &Population) -> Result<()> {
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }
        let expected = self.options.get_genome_length();
        match population.iter().find(|ind| ind.len() != expected) {
            Some(ind) => Err(EvoError::GenomeLengthMismatch {
                left: expected,
                right: ind.len(),
            }),
            None => Ok(()),
        }
    }

    /// Builds the next generation from a sorted, evaluated one.
    fn reproduce(
        &self,
        previous: &Population,
        params: &AdaptedParameters,
        stall_count: usize,
        extent: Extent,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let options = &self.options;
        let selection = TournamentSelection::new(params.tournament_size)?;
        let mutation = GaussianMutation::new(
            params.mutation_rate,
            options.get_color_stddev(),
            options.get_geometry_stddev(),
        )?;

        let elites = options.get_elite_count().min(previous.len());
        let injected = match options.get_random_injection_divisor() {
            0 => 0,
            divisor => stall_count / divisor,
        };
        let mut next = Population::with_capacity(params.population_size + 2 * elites + injected);

        // Elitism: survivors keep their cached evaluation
        for elite in previous.iter().take(elites) {
            next.push(elite.clone());
            if options.get_shuffle_elites() {
                next.push(shuffle(elite, rng));
            }
        }

        let mut offspring = 0;
        while next.len() < params.population_size {
            let parent1 = selection.select(previous.as_slice(), rng)?;
            let parent2 = selection.select(previous.as_slice(), rng)?;

            let (mut child1, mut child2) =
                crossover(parent1, parent2, options.get_crossover_rate(), rng)?;
            mutation.mutate(&mut child1, extent, rng);
            mutation.mutate(&mut child2, extent, rng);

            next.push(child1);
            next.push(child2);
            offspring += 2;
        }

        for _ in 0..injected {
            next.push(Individual::random(
                options.get_primitive(),
                options.get_genome_length(),
                self.challenge.target(),
                options.get_initial_alpha(),
                rng,
            ));
        }

        if *options.get_log_level() == LogLevel::Verbose {
            debug!(
                elites,
                shuffled = if options.get_shuffle_elites() { elites } else { 0 },
                offspring,
                injected,
                next_size = next.len(),
                "Reproduced population"
            );
        }

        Ok(next)
    }
}

fn fitness_of(individual: &Individual) -> Result<f64> {
    individual.cached_fitness().ok_or(EvoError::NotEvaluated)
}
