//! # Genome
//!
//! Value types that make up a genome: colors, canvas geometry and the
//! [`Gene`] itself. A genome is an ordered `Vec<Gene>`; later genes are
//! painted over earlier ones, so order is part of the phenotype.
pub mod color;
pub mod gene;
pub mod geometry;

pub use color::Color;
pub use gene::{Gene, Polygon, PrimitiveKind, Rectangle};
pub use geometry::{Bounds, Extent, Point};
