//! # Evolution
//!
//! The generational controller. [`EvolutionLauncher`] owns a challenge, the
//! validated [`EvolutionOptions`] and a [`ParallelEvaluator`], and runs the
//! loop until a [`TerminationReason`] applies.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use evoimage::evolution::{EvolutionLauncher, EvolutionOptions, NoopObserver};
//! use evoimage::fitness::{ColorMetric, ImageChallenge};
//! use evoimage::rng::RandomNumberGenerator;
//! use evoimage::target::Target;
//!
//! # fn main() -> evoimage::Result<()> {
//! let bytes = std::fs::read("target.jpg").expect("target image");
//! let target = Arc::new(Target::decode(&bytes)?);
//! let challenge = ImageChallenge::new(target, ColorMetric::Rgb);
//!
//! let launcher = EvolutionLauncher::new(challenge, EvolutionOptions::default())?;
//! let mut rng = RandomNumberGenerator::new();
//! let result = launcher.evolve(&mut rng, &mut NoopObserver)?;
//! println!("{} after {} generations", result.reason, result.generations);
//! # Ok(())
//! # }
//! ```
pub mod adaptation;
pub mod evaluator;
pub mod launcher;
pub mod options;
pub mod report;
pub mod termination;

pub use adaptation::{AdaptedParameters, Adaptation, StallTracker};
pub use evaluator::ParallelEvaluator;
pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel, TournamentSchedule};
pub use report::{GenerationObserver, GenerationReport, NoopObserver};
pub use termination::{check_termination, TerminationReason};
