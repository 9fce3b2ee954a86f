//! # evoimage
//!
//! Approximates a target image with a fixed number of colored polygons or
//! rectangles, using a generational genetic algorithm with elitism,
//! tournament selection, uniform crossover, Gaussian mutation and parallel
//! fitness evaluation.
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod genome;
pub mod individual;
pub mod operators;
pub mod population;
pub mod rng;
pub mod target;

// Re-export commonly used types for convenience
pub use error::{EvoError, OptionExt, Result};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult, TerminationReason};
pub use fitness::{Challenge, ColorMetric, ImageChallenge};
pub use individual::Individual;
pub use population::Population;
pub use rng::RandomNumberGenerator;
pub use target::Target;
