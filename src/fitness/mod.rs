//! # Fitness
//!
//! A [`Challenge`] turns a genome into a rendered canvas and a scalar
//! badness score. [`ImageChallenge`] is the pixel-distance challenge:
//!
//! 1. fill a target-sized canvas with the target's mode color,
//! 2. composite every gene over it in genome order,
//! 3. sum the per-pixel color distance to the target,
//! 4. divide by the worst possible sum and scale to `[0, 100]`.
//!
//! Lower is better and `0` is an exact match. No randomness enters
//! evaluation, so the same genome always scores the same.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use evoimage::fitness::{Challenge, ColorMetric, ImageChallenge};
//! use evoimage::genome::{Color, Gene, Point};
//! use evoimage::target::Target;
//! use image::{Rgba, RgbaImage};
//!
//! let target = Target::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))).unwrap();
//! let challenge = ImageChallenge::new(Arc::new(target), ColorMetric::Rgb);
//!
//! let genes = vec![Gene::rectangle(Point::new(0, 0), Point::new(2, 2), Color::opaque(255, 0, 0))];
//! let evaluation = challenge.evaluate(&genes).unwrap();
//! assert_eq!(evaluation.fitness(), 0.0);
//! ```
pub mod metric;
pub mod render;

use std::sync::Arc;

use image::RgbaImage;

use crate::error::{EvoError, Result};
use crate::genome::Gene;
use crate::target::Target;

pub use metric::ColorMetric;

/// The cached outcome of evaluating one genome.
#[derive(Debug, Clone)]
pub struct Evaluation {
    fitness: f64,
    raster: Arc<RgbaImage>,
}

impl Evaluation {
    pub fn new(fitness: f64, raster: RgbaImage) -> Self {
        Self {
            fitness,
            raster: Arc::new(raster),
        }
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The rendered canvas. Shared, never mutated after evaluation.
    pub fn raster(&self) -> &Arc<RgbaImage> {
        &self.raster
    }
}

/// Scores genomes against a target.
///
/// Implementations are shared read-only between evaluation workers.
pub trait Challenge: Send + Sync {
    /// The image being approximated.
    fn target(&self) -> &Target;

    /// Rasterizes a genome.
    fn render(&self, genes: &[Gene]) -> Result<RgbaImage>;

    /// Scores a rendered canvas. Lower is better.
    fn score(&self, canvas: &RgbaImage) -> f64;

    /// Renders and scores a genome, rejecting non-finite scores.
    fn evaluate(&self, genes: &[Gene]) -> Result<Evaluation> {
        let canvas = self.render(genes)?;
        let fitness = self.score(&canvas);
        if !fitness.is_finite() {
            return Err(EvoError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {}",
                fitness
            )));
        }
        Ok(Evaluation::new(fitness, canvas))
    }
}

/// Normalized pixel-distance fitness against a target image.
#[derive(Debug, Clone)]
pub struct ImageChallenge {
    target: Arc<Target>,
    metric: ColorMetric,
    anti_alias: bool,
    normalizer: f64,
}

impl ImageChallenge {
    pub fn new(target: Arc<Target>, metric: ColorMetric) -> Self {
        let normalizer = target.extent().pixel_count() as f64 * metric.max_distance();
        Self {
            target,
            metric,
            anti_alias: true,
            normalizer,
        }
    }

    /// Turns polygon anti-aliasing on or off.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn metric(&self) -> ColorMetric {
        self.metric
    }

    pub fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    /// The raw error that maps to a score of 100.
    pub fn normalizer(&self) -> f64 {
        self.normalizer
    }
}

impl Challenge for ImageChallenge {
    fn target(&self) -> &Target {
        &self.target
    }

    fn render(&self, genes: &[Gene]) -> Result<RgbaImage> {
        render::render_genes(
            self.target.extent(),
            self.target.mode_color(),
            genes,
            self.anti_alias,
        )
    }

    fn score(&self, canvas: &RgbaImage) -> f64 {
        let raw = self.metric.raw_error(canvas, self.target.image());
        (raw / self.normalizer) * 100.0
    }
}
