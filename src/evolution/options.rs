//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds every run parameter of the generational
//! controller: operator rates, population and genome sizes, the primitive
//! kind, termination limits, adaptation constants, worker-pool settings and
//! the logging level.
//!
//! ## Example
//!
//! ```rust
//! use evoimage::evolution::options::{EvolutionOptions, LogLevel, TournamentSchedule};
//! use evoimage::genome::PrimitiveKind;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .genome_length(64)
//!     .primitive(PrimitiveKind::Rectangle)
//!     .tournament(TournamentSchedule::Cycle { min: 2, max: 5 })
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_population_size(), 50);
//!
//! let defaults = EvolutionOptions::default();
//! assert_eq!(defaults.get_genome_length(), 700);
//! ```
//!
//! ## `LogLevel`
//!
//! - `Verbose`: per-generation summaries plus adaptation and reproduction details.
//! - `Minimal`: one summary event per generation, plus start and finish.
//! - `None`: no events.
//!
//! ## `TournamentSchedule`
//!
//! - `Fixed(k)`: the same tournament size every generation.
//! - `Cycle { min, max }`: starts at `min`, grows by one per generation and
//!   wraps back to `min` after passing `max`.
//! - `Adaptive { min, max, stall_period }`: shrinks toward `min` as the best
//!   fitness improves on the first generation's best, then grows by one for
//!   every `stall_period` stalled generations, capped at `max`.

use crate::error::{EvoError, Result};
use crate::genome::PrimitiveKind;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentSchedule {
    Fixed(usize),
    Cycle {
        min: usize,
        max: usize,
    },
    Adaptive {
        min: usize,
        max: usize,
        stall_period: usize,
    },
}

impl TournamentSchedule {
    /// Smallest size the schedule can produce.
    pub fn min(&self) -> usize {
        match *self {
            Self::Fixed(k) => k,
            Self::Cycle { min, .. } | Self::Adaptive { min, .. } => min,
        }
    }

    /// Largest size the schedule can produce.
    pub fn max(&self) -> usize {
        match *self {
            Self::Fixed(k) => k,
            Self::Cycle { max, .. } | Self::Adaptive { max, .. } => max,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.min() == 0 {
            return Err(EvoError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.min() > self.max() {
            return Err(EvoError::Configuration(format!(
                "Tournament minimum {} exceeds maximum {}",
                self.min(),
                self.max()
            )));
        }
        if let Self::Adaptive { stall_period: 0, .. } = self {
            return Err(EvoError::Configuration(
                "Adaptive tournament stall period cannot be zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TournamentSchedule {
    fn default() -> Self {
        Self::Adaptive {
            min: 2,
            max: 5,
            stall_period: 10,
        }
    }
}

/// Smallest population the controller accepts.
pub const MIN_POPULATION_SIZE: usize = 10;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    mutation_rate: f64,
    crossover_rate: f64,
    population_size: usize,
    genome_length: usize,
    primitive: PrimitiveKind,
    /// Alpha of freshly created genes; `None` draws it at random.
    initial_alpha: Option<u8>,
    color_stddev: f64,
    /// Fraction of the axis length.
    geometry_stddev: f64,
    max_generations: usize,
    max_stall: usize,
    convergence_threshold: f64,
    stall_epsilon: f64,
    elite_count: usize,
    shuffle_elites: bool,
    mutation_rate_step: f64,
    max_mutation_rate: f64,
    population_growth: usize,
    /// `0` disables random injection.
    random_injection_divisor: usize,
    tournament: TournamentSchedule,
    /// `None` uses the available parallelism.
    workers: Option<usize>,
    /// Minimum number of individuals to evaluate in parallel.
    parallel_threshold: usize,
    log_level: LogLevel,
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            mutation_rate: 0.08,
            crossover_rate: 0.60,
            population_size: 200,
            genome_length: 700,
            primitive: PrimitiveKind::default(),
            initial_alpha: Some(0),
            color_stddev: 16.0,
            geometry_stddev: 0.05,
            max_generations: 100_000,
            max_stall: 1_000,
            convergence_threshold: 0.01,
            stall_epsilon: 1e-7,
            elite_count: 5,
            shuffle_elites: true,
            mutation_rate_step: 0.015,
            max_mutation_rate: 0.25,
            population_growth: 2,
            random_injection_divisor: 2,
            tournament: TournamentSchedule::default(),
            workers: None,
            parallel_threshold: 2,
            log_level: LogLevel::None,
        }
    }
}

impl EvolutionOptions {
    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// Unset fields keep their defaults.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    /// Checks every parameter. Called once by the launcher before any
    /// population is created.
    ///
    /// # Errors
    ///
    /// Returns `EvoError::Configuration` naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("Mutation rate", self.mutation_rate),
            ("Crossover rate", self.crossover_rate),
        ] {
            if !(rate > 0.0 && rate < 1.0) {
                return Err(EvoError::Configuration(format!(
                    "{} must be within (0, 1), got {}",
                    name, rate
                )));
            }
        }
        if !(self.max_mutation_rate >= self.mutation_rate && self.max_mutation_rate <= 1.0) {
            return Err(EvoError::Configuration(format!(
                "Maximum mutation rate must be within [{}, 1], got {}",
                self.mutation_rate, self.max_mutation_rate
            )));
        }
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(EvoError::Configuration(format!(
                "Population size must be at least {}, got {}",
                MIN_POPULATION_SIZE, self.population_size
            )));
        }
        if self.genome_length == 0 {
            return Err(EvoError::Configuration(
                "Genome length cannot be zero".to_string(),
            ));
        }
        self.primitive.validate()?;
        if self.elite_count >= self.population_size {
            return Err(EvoError::Configuration(format!(
                "Elite count {} must be smaller than the population size {}",
                self.elite_count, self.population_size
            )));
        }
        self.tournament.validate()?;
        for (name, value) in [
            ("color standard deviation", self.color_stddev),
            ("geometry standard deviation", self.geometry_stddev),
            ("mutation rate step", self.mutation_rate_step),
            ("convergence threshold", self.convergence_threshold),
            ("stall epsilon", self.stall_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EvoError::Configuration(format!(
                    "Invalid {}: {}",
                    name, value
                )));
            }
        }
        if self.max_generations == 0 {
            return Err(EvoError::Configuration(
                "Maximum generation count cannot be zero".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(EvoError::Configuration(
                "Worker count cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_genome_length(&self) -> usize {
        self.genome_length
    }

    pub fn get_primitive(&self) -> &PrimitiveKind {
        &self.primitive
    }

    pub fn get_initial_alpha(&self) -> Option<u8> {
        self.initial_alpha
    }

    pub fn get_color_stddev(&self) -> f64 {
        self.color_stddev
    }

    pub fn get_geometry_stddev(&self) -> f64 {
        self.geometry_stddev
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_max_stall(&self) -> usize {
        self.max_stall
    }

    pub fn get_convergence_threshold(&self) -> f64 {
        self.convergence_threshold
    }

    pub fn get_stall_epsilon(&self) -> f64 {
        self.stall_epsilon
    }

    pub fn get_elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn get_shuffle_elites(&self) -> bool {
        self.shuffle_elites
    }

    pub fn get_mutation_rate_step(&self) -> f64 {
        self.mutation_rate_step
    }

    pub fn get_max_mutation_rate(&self) -> f64 {
        self.max_mutation_rate
    }

    pub fn get_population_growth(&self) -> usize {
        self.population_growth
    }

    pub fn get_random_injection_divisor(&self) -> usize {
        self.random_injection_divisor
    }

    pub fn get_tournament(&self) -> &TournamentSchedule {
        &self.tournament
    }

    pub fn get_workers(&self) -> Option<usize> {
        self.workers
    }

    /// Returns the minimum number of individuals to evaluate in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }

    pub fn set_mutation_rate(&mut self, value: f64) {
        self.mutation_rate = value;
    }

    pub fn set_crossover_rate(&mut self, value: f64) {
        self.crossover_rate = value;
    }

    pub fn set_population_size(&mut self, value: usize) {
        self.population_size = value;
    }

    pub fn set_genome_length(&mut self, value: usize) {
        self.genome_length = value;
    }

    pub fn set_primitive(&mut self, value: PrimitiveKind) {
        self.primitive = value;
    }

    pub fn set_initial_alpha(&mut self, value: Option<u8>) {
        self.initial_alpha = value;
    }

    pub fn set_color_stddev(&mut self, value: f64) {
        self.color_stddev = value;
    }

    pub fn set_geometry_stddev(&mut self, value: f64) {
        self.geometry_stddev = value;
    }

    pub fn set_max_generations(&mut self, value: usize) {
        self.max_generations = value;
    }

    pub fn set_max_stall(&mut self, value: usize) {
        self.max_stall = value;
    }

    pub fn set_convergence_threshold(&mut self, value: f64) {
        self.convergence_threshold = value;
    }

    pub fn set_stall_epsilon(&mut self, value: f64) {
        self.stall_epsilon = value;
    }

    pub fn set_elite_count(&mut self, value: usize) {
        self.elite_count = value;
    }

    pub fn set_shuffle_elites(&mut self, value: bool) {
        self.shuffle_elites = value;
    }

    pub fn set_mutation_rate_step(&mut self, value: f64) {
        self.mutation_rate_step = value;
    }

    pub fn set_max_mutation_rate(&mut self, value: f64) {
        self.max_mutation_rate = value;
    }

    pub fn set_population_growth(&mut self, value: usize) {
        self.population_growth = value;
    }

    pub fn set_random_injection_divisor(&mut self, value: usize) {
        self.random_injection_divisor = value;
    }

    pub fn set_tournament(&mut self, value: TournamentSchedule) {
        self.tournament = value;
    }

    pub fn set_workers(&mut self, value: Option<usize>) {
        self.workers = value;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, value: usize) {
        self.parallel_threshold = value;
    }

    pub fn set_log_level(&mut self, value: LogLevel) {
        self.log_level = value;
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// `build` does not validate; the launcher does.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    options: EvolutionOptions,
}

macro_rules! builder_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        impl EvolutionOptionsBuilder {
            $(
                pub fn $name(mut self, value: $ty) -> Self {
                    self.options.$name = value;
                    self
                }
            )*
        }
    };
}

builder_setters! {
    mutation_rate: f64,
    crossover_rate: f64,
    population_size: usize,
    genome_length: usize,
    primitive: PrimitiveKind,
    initial_alpha: Option<u8>,
    color_stddev: f64,
    geometry_stddev: f64,
    max_generations: usize,
    max_stall: usize,
    convergence_threshold: f64,
    stall_epsilon: f64,
    elite_count: usize,
    shuffle_elites: bool,
    mutation_rate_step: f64,
    max_mutation_rate: f64,
    population_growth: usize,
    random_injection_divisor: usize,
    tournament: TournamentSchedule,
    workers: Option<usize>,
    parallel_threshold: usize,
    log_level: LogLevel,
}

impl EvolutionOptionsBuilder {
    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        self.options
    }
}
