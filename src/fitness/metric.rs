use image::{Rgba, RgbaImage};

use crate::target::MAX_RGB_DISTANCE;

/// Largest possible RGBA distance between two pixels: √(4·255²).
pub const MAX_RGBA_DISTANCE: f64 = 510.0;

/// Which channels take part in the per-pixel color distance.
///
/// The choice changes which genomes are optimal, so it is fixed for a run
/// rather than chosen per call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMetric {
    /// Euclidean distance over R, G and B; alpha is ignored.
    #[default]
    Rgb,
    /// Euclidean distance over R, G, B and A, all at full weight.
    Rgba,
}

impl ColorMetric {
    /// Distance between two pixels in color space.
    pub fn distance(&self, a: &Rgba<u8>, b: &Rgba<u8>) -> f64 {
        let channels = match self {
            ColorMetric::Rgb => 3,
            ColorMetric::Rgba => 4,
        };
        a.0.iter()
            .zip(b.0.iter())
            .take(channels)
            .map(|(x, y)| {
                let d = f64::from(*x) - f64::from(*y);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Largest value `distance` can return.
    pub fn max_distance(&self) -> f64 {
        match self {
            ColorMetric::Rgb => MAX_RGB_DISTANCE,
            ColorMetric::Rgba => MAX_RGBA_DISTANCE,
        }
    }

    /// Summed distance over every pixel of two equally sized rasters.
    pub fn raw_error(&self, canvas: &RgbaImage, target: &RgbaImage) -> f64 {
        canvas
            .pixels()
            .zip(target.pixels())
            .map(|(a, b)| self.distance(a, b))
            .sum()
    }
}
