use crate::error::{EvoError, Result};
use crate::genome::{Bounds, Color, Extent, Gene};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Forces a perturbation to move by at least one unit.
///
/// Magnitudes below 1 become exactly `±1`, keeping the sign; zero becomes `+1`.
pub fn floor_delta(delta: f64) -> f64 {
    if delta.abs() < 1.0 {
        if delta < 0.0 {
            -1.0
        } else {
            1.0
        }
    } else {
        delta
    }
}

/// Bounded Gaussian perturbation of an integer attribute.
///
/// Draws `delta ~ Normal(0, stddev)`, applies [`floor_delta`], rounds, and
/// returns `value + delta` clamped into `[min, max]`.
///
/// # Examples
///
/// ```
/// use evoimage::operators::mutate_norm;
/// use evoimage::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// // With no spread the floor rule still moves the value by one.
/// assert_eq!(mutate_norm(10, 0.0, 0, 255, &mut rng), 11);
/// // The result is always clamped.
/// assert_eq!(mutate_norm(255, 0.0, 0, 255, &mut rng), 255);
/// ```
pub fn mutate_norm(
    value: i32,
    stddev: f64,
    min: i32,
    max: i32,
    rng: &mut RandomNumberGenerator,
) -> i32 {
    let delta = floor_delta(rng.gen_normal(stddev)).round();
    let moved = f64::from(value) + delta;
    moved.clamp(f64::from(min), f64::from(max)) as i32
}

/// Per-attribute Gaussian mutation.
///
/// Every color channel and every geometry coordinate of every gene is
/// perturbed independently with probability `rate`. Color channels move with
/// `color_stddev` inside `[0, 255]`; coordinates move with
/// `geometry_stddev × axis length` inside the canvas.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMutation {
    rate: f64,
    color_stddev: f64,
    geometry_stddev: f64,
}

impl GaussianMutation {
    /// # Errors
    ///
    /// Returns an error if `rate` lies outside `[0, 1]` or a standard
    /// deviation is negative or not finite.
    pub fn new(rate: f64, color_stddev: f64, geometry_stddev: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(EvoError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                rate
            )));
        }
        for (name, value) in [("color", color_stddev), ("geometry", geometry_stddev)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EvoError::Configuration(format!(
                    "Invalid {} standard deviation: {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            rate,
            color_stddev,
            geometry_stddev,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Mutates `individual` in place and drops its cached evaluation.
    /// Returns `true` if any attribute changed.
    pub fn mutate(
        &self,
        individual: &mut Individual,
        extent: Extent,
        rng: &mut RandomNumberGenerator,
    ) -> bool {
        individual.modify(|genes| {
            let mut changed = false;
            for gene in genes.iter_mut() {
                changed |= self.mutate_gene(gene, extent, rng);
            }
            changed
        })
    }

    fn mutate_gene(&self, gene: &mut Gene, extent: Extent, rng: &mut RandomNumberGenerator) -> bool {
        let mut changed = self.mutate_color(gene.color_mut(), rng);

        let sx = self.geometry_stddev * f64::from(extent.width);
        let sy = self.geometry_stddev * f64::from(extent.height);

        match gene {
            Gene::Polygon(poly) => {
                for v in poly.vertices.iter_mut() {
                    changed |= self.maybe_mutate(&mut v.x, sx, extent.max_x(), rng);
                    changed |= self.maybe_mutate(&mut v.y, sy, extent.max_y(), rng);
                }
            }
            Gene::Rectangle(rect) => {
                let mut c = rect.bounds.coordinates();
                let axes = [
                    (sx, extent.max_x()),
                    (sy, extent.max_y()),
                    (sx, extent.max_x()),
                    (sy, extent.max_y()),
                ];
                for (coord, (stddev, max)) in c.iter_mut().zip(axes) {
                    changed |= self.maybe_mutate(coord, stddev, max, rng);
                }
                rect.bounds = Bounds::from_coordinates(c);
            }
        }
        changed
    }

    fn mutate_color(&self, color: &mut Color, rng: &mut RandomNumberGenerator) -> bool {
        let mut changed = false;
        for channel in [&mut color.r, &mut color.g, &mut color.b, &mut color.a] {
            let mut value = i32::from(*channel);
            if self.maybe_mutate(&mut value, self.color_stddev, 255, rng) {
                *channel = value as u8;
                changed = true;
            }
        }
        changed
    }

    /// Perturbs `value` within `[0, max]` with probability `rate`.
    fn maybe_mutate(&self, value: &mut i32, stddev: f64, max: i32, rng: &mut RandomNumberGenerator) -> bool {
        if rng.gen_probability() >= self.rate {
            return false;
        }
        let next = mutate_norm(*value, stddev, 0, max, rng);
        let changed = next != *value;
        *value = next;
        changed
    }
}
