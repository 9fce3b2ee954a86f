//! # Target
//!
//! The immutable raster the population evolves toward, plus statistics
//! derived from it. The mode and mean colors are computed together by one
//! full scan the first time either is requested; the scan is guarded by a
//! `OnceLock`, so concurrent workers asking at the same time still trigger it
//! only once.
//!
//! ## Example
//!
//! ```rust
//! use evoimage::genome::Color;
//! use evoimage::target::Target;
//! use image::{Rgba, RgbaImage};
//!
//! let target = Target::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))).unwrap();
//! assert_eq!(target.mode_color(), Color::opaque(255, 0, 0));
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use image::{DynamicImage, RgbaImage};
use tracing::debug;

use crate::error::{EvoError, Result};
use crate::genome::{Color, Extent};

/// Largest possible RGB distance between two pixels: √(3·255²).
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

#[derive(Debug, Clone, Copy)]
struct ColorStats {
    mode: Color,
    mean: Color,
}

/// The decoded target image.
#[derive(Debug)]
pub struct Target {
    image: RgbaImage,
    max_fitness: f64,
    stats: OnceLock<ColorStats>,
}

impl Target {
    /// Wraps an already-decoded RGBA raster.
    pub fn from_rgba(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EvoError::EmptyImage);
        }

        let pixels = u64::from(image.width()) * u64::from(image.height());
        let max_fitness = pixels as f64 * MAX_RGB_DISTANCE;

        debug!(
            width = image.width(),
            height = image.height(),
            max_fitness,
            "Target loaded"
        );

        Ok(Self {
            image,
            max_fitness,
            stats: OnceLock::new(),
        })
    }

    /// Normalizes any decoded image into straight 8-bit RGBA.
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        Self::from_rgba(image.into_rgba8())
    }

    /// Decodes an encoded image (JPEG or PNG).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Self::from_image(image)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.image.width(), self.image.height())
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Worst-case summed RGB distance, `W·H·√(3·255²)`.
    pub fn max_fitness(&self) -> f64 {
        self.max_fitness
    }

    /// Most frequent pixel color.
    pub fn mode_color(&self) -> Color {
        self.stats().mode
    }

    /// Per-channel average color, truncated toward zero.
    pub fn mean_color(&self) -> Color {
        self.stats().mean
    }

    fn stats(&self) -> ColorStats {
        *self.stats.get_or_init(|| compute_stats(&self.image))
    }
}

fn compute_stats(image: &RgbaImage) -> ColorStats {
    let mut counts: HashMap<[u8; 4], u32> = HashMap::new();
    let mut sums = [0u64; 4];

    for px in image.pixels() {
        *counts.entry(px.0).or_insert(0) += 1;
        for (sum, channel) in sums.iter_mut().zip(px.0) {
            *sum += u64::from(channel);
        }
    }

    // Ties go to the numerically smallest color so the result is stable.
    let (mode, mode_count) = counts
        .iter()
        .max_by(|(ca, na), (cb, nb)| na.cmp(nb).then_with(|| cb.cmp(ca)))
        .map(|(c, n)| (*c, *n))
        .unwrap_or(([0; 4], 0));

    let n = u64::from(image.width()) * u64::from(image.height());
    let mean = sums.map(|s| (s / n.max(1)) as u8);

    let stats = ColorStats {
        mode: Color::new(mode[0], mode[1], mode[2], mode[3]),
        mean: Color::new(mean[0], mean[1], mean[2], mean[3]),
    };
    debug!(mode = ?stats.mode, mode_count, mean = ?stats.mean, "Target colour statistics");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn striped() -> RgbaImage {
        // 3 red pixels, 1 blue pixel
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
        img
    }

    #[test]
    fn test_mode_and_mean() {
        let target = Target::from_rgba(striped()).unwrap();
        assert_eq!(target.mode_color(), Color::opaque(255, 0, 0));
        // (3 * 255) / 4 = 191, 255 / 4 = 63
        assert_eq!(target.mean_color(), Color::new(191, 0, 63, 255));
        // Second call hits the cache and agrees
        assert_eq!(target.mode_color(), Color::opaque(255, 0, 0));
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([9, 9, 9, 255]));
        img.put_pixel(1, 0, Rgba([1, 1, 1, 255]));
        let target = Target::from_rgba(img).unwrap();
        assert_eq!(target.mode_color(), Color::opaque(1, 1, 1));
    }

    #[test]
    fn test_max_fitness() {
        let target = Target::from_rgba(striped()).unwrap();
        let expected = 4.0 * (3.0f64 * 255.0 * 255.0).sqrt();
        assert!((target.max_fitness() - expected).abs() < 1e-9);
        assert!((MAX_RGB_DISTANCE - (3.0f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_image_rejected() {
        let result = Target::from_rgba(RgbaImage::new(0, 5));
        assert!(matches!(result, Err(EvoError::EmptyImage)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = Target::decode(b"definitely not an image");
        assert!(matches!(result, Err(EvoError::Decode(_))));
    }

    #[test]
    fn test_decode_png() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(striped())
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let target = Target::decode(&bytes).unwrap();
        assert_eq!(target.extent(), Extent::new(2, 2));
        assert_eq!(target.image().get_pixel(1, 1).0, [0, 0, 255, 255]);
    }
}
