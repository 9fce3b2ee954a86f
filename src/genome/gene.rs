use super::{Bounds, Color, Extent, Point};
use crate::error::{EvoError, Result};
use crate::rng::RandomNumberGenerator;

/// The primitive shape every gene of a run uses.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Closed polygon with a fixed number of vertices (at least 3).
    Polygon { vertices: usize },
    /// Axis-aligned rectangle.
    Rectangle,
}

impl PrimitiveKind {
    pub fn validate(&self) -> Result<()> {
        match self {
            PrimitiveKind::Polygon { vertices } if *vertices < 3 => Err(EvoError::Configuration(
                format!("Polygon genes need at least 3 vertices, got {}", vertices),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for PrimitiveKind {
    fn default() -> Self {
        PrimitiveKind::Polygon { vertices: 3 }
    }
}

/// Polygon primitive: vertices in paint order, closed back to the first one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    pub vertices: Vec<Point>,
    pub color: Color,
}

/// Rectangle primitive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub bounds: Bounds,
    pub color: Color,
}

/// One heritable visual unit: geometry plus a color.
///
/// A gene owns all of its data, so `clone` is a deep copy; no two
/// individuals ever share a gene's vertices or color.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gene {
    Polygon(Polygon),
    Rectangle(Rectangle),
}

impl Gene {
    /// Draws a random gene of the given kind inside `extent`.
    ///
    /// Geometry is uniform over the canvas and RGB is uniform over `[0, 255]`.
    /// With `initial_alpha` set, every new gene gets that alpha, so a fresh
    /// population starts (nearly) invisible; `None` draws alpha at random too.
    pub fn random(
        kind: &PrimitiveKind,
        extent: Extent,
        initial_alpha: Option<u8>,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let random_point = |rng: &mut RandomNumberGenerator| {
            let x = rng.gen_coordinate(extent.max_x());
            let y = rng.gen_coordinate(extent.max_y());
            Point::new(x, y)
        };

        match kind {
            PrimitiveKind::Polygon { vertices } => {
                let vertices = (0..*vertices).map(|_| random_point(rng)).collect();
                Gene::Polygon(Polygon {
                    vertices,
                    color: random_color(initial_alpha, rng),
                })
            }
            PrimitiveKind::Rectangle => {
                let a = random_point(rng);
                let b = random_point(rng);
                Gene::Rectangle(Rectangle {
                    bounds: Bounds::new(a, b),
                    color: random_color(initial_alpha, rng),
                })
            }
        }
    }

    /// Convenience constructor for a polygon gene.
    pub fn polygon(vertices: Vec<Point>, color: Color) -> Self {
        Gene::Polygon(Polygon { vertices, color })
    }

    /// Convenience constructor for a rectangle gene from two corners in any order.
    pub fn rectangle(a: Point, b: Point, color: Color) -> Self {
        Gene::Rectangle(Rectangle {
            bounds: Bounds::new(a, b),
            color,
        })
    }

    pub fn color(&self) -> Color {
        match self {
            Gene::Polygon(p) => p.color,
            Gene::Rectangle(r) => r.color,
        }
    }

    pub fn color_mut(&mut self) -> &mut Color {
        match self {
            Gene::Polygon(p) => &mut p.color,
            Gene::Rectangle(r) => &mut r.color,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Gene::Polygon(p) => PrimitiveKind::Polygon {
                vertices: p.vertices.len(),
            },
            Gene::Rectangle(_) => PrimitiveKind::Rectangle,
        }
    }
}

fn random_color(initial_alpha: Option<u8>, rng: &mut RandomNumberGenerator) -> Color {
    let r = rng.gen_channel();
    let g = rng.gen_channel();
    let b = rng.gen_channel();
    let a = match initial_alpha {
        Some(alpha) => alpha,
        None => rng.gen_channel(),
    };
    Color::new(r, g, b, a)
}
