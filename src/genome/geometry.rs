//! Canvas-space geometry shared by the primitive variants.
//!
//! Coordinates are integers on the closed range `[0, width] × [0, height]`:
//! the right and bottom edges are addressable so that a rectangle from
//! `(0, 0)` to `(width, height)` covers every pixel of the canvas.

/// A canvas-space point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, always stored with `min <= max` on both axes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Builds bounds from two opposite corners given in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Corner coordinates in the order `[min.x, min.y, max.x, max.y]`.
    pub fn coordinates(&self) -> [i32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Rebuilds bounds from `[x1, y1, x2, y2]`, normalizing the corners.
    pub fn from_coordinates(c: [i32; 4]) -> Self {
        Self::new(Point::new(c[0], c[1]), Point::new(c[2], c[3]))
    }
}

/// Pixel dimensions of the canvas every gene is drawn onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest valid x coordinate.
    pub fn max_x(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Largest valid y coordinate.
    pub fn max_y(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Bounds covering the whole canvas.
    pub fn full_bounds(&self) -> Bounds {
        Bounds::new(Point::new(0, 0), Point::new(self.max_x(), self.max_y()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_normalize_corner_order() {
        let b = Bounds::new(Point::new(9, 1), Point::new(2, 7));
        assert_eq!(b.min(), Point::new(2, 1));
        assert_eq!(b.max(), Point::new(9, 7));
        assert_eq!(b.width(), 7);
        assert_eq!(b.height(), 6);

        let same = Bounds::from_coordinates([2, 7, 9, 1]);
        assert_eq!(b, same);
    }

    #[test]
    fn test_extent() {
        let e = Extent::new(4, 3);
        assert_eq!(e.pixel_count(), 12);
        assert_eq!(e.full_bounds().coordinates(), [0, 0, 4, 3]);
    }
}
