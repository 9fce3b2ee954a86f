//! # Error Types
//!
//! This module defines the error type shared by every part of the image
//! evolution engine. Failures fall into three groups:
//!
//! - configuration problems, detected once before a run starts,
//! - decode problems with the target image, surfaced before any population exists,
//! - invariant violations, which indicate a programming error and abort the run.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use evoimage::error::{EvoError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if rate <= 0.0 || rate >= 1.0 {
//!         return Err(EvoError::Configuration(
//!             "Invalid mutation rate - must be between 0 and 1".to_string(),
//!         ));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.08).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use evoimage::error::{EvoError, OptionExt};
//!
//! fn first_score(scores: &[f64]) -> evoimage::error::Result<f64> {
//!     scores.first().copied().ok_or_else_evo(|| EvoError::EmptyPopulation)
//! }
//!
//! assert!(first_score(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while evolving an image.
#[derive(Error, Debug)]
pub enum EvoError {
    /// Invalid run parameters. Detected at startup; no partial run is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The target image could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The target image decoded to zero pixels.
    #[error("Decode error: target image has no pixels")]
    EmptyImage,

    /// An internal consistency check failed.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// An operation that needs at least one individual received none.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Two genomes that must have equal length did not.
    #[error("Invariant violation: genome lengths differ ({left} vs {right})")]
    GenomeLengthMismatch { left: usize, right: usize },

    /// A fitness value was requested from an individual that was never evaluated.
    #[error("Invariant violation: individual has not been evaluated")]
    NotEvaluated,

    /// The fitness function produced an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// The rasterizer could not produce a canvas.
    #[error("Render error: {0}")]
    Render(String),

    /// The worker pool could not be started.
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// A generation observer asked the run to stop.
    #[error("Observer error: {0}")]
    Observer(String),
}

/// A specialized Result type for image evolution operations.
pub type Result<T> = std::result::Result<T, EvoError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to build the error.
    fn ok_or_else_evo<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> EvoError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_evo<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> EvoError,
    {
        self.ok_or_else(err_fn)
    }
}
