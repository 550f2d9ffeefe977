//! The generated result handed to renderers.

use crate::palette::{Gradient, GradientDirection};
use crate::seed::Seed;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};

/// Sentinel reported as the background color of transparent artwork.
pub const TRANSPARENT: &str = "transparent";

/// A complete artwork: ordered shapes plus the gradients they reference.
///
/// Draw order is background (when opaque), doubles, cells, then nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub width: f64,
    pub height: f64,
    /// Configured background, or [`TRANSPARENT`].
    pub background_color: String,
    pub shapes: Vec<Shape>,
    pub gradients: Vec<Gradient>,
    /// Tone shared by every gradient.
    pub gradient_color: String,
    /// Seed that reproduces this artwork.
    pub seed: Seed,
}

/// What a shape's `fill` attribute paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint<'a> {
    Solid(&'a str),
    Gradient(&'a Gradient),
}

impl Artwork {
    pub fn is_transparent(&self) -> bool {
        self.background_color == TRANSPARENT
    }

    /// Gradient by name, e.g. `"top-left"`.
    pub fn gradient(&self, name: &str) -> Option<&Gradient> {
        self.gradients.iter().find(|g| g.name == name)
    }

    /// Resolves a fill value. `url(#gradient-…)` references must name one of
    /// this artwork's gradients; anything else is a solid color.
    pub fn resolve_fill<'a>(&'a self, fill: &'a str) -> Option<Paint<'a>> {
        if !fill.starts_with("url(") {
            return Some(Paint::Solid(fill));
        }
        let name = GradientDirection::from_url(fill)?.name();
        self.gradient(name).map(Paint::Gradient)
    }

    /// Pixel endpoints `[x1, y1, x2, y2]` of a gradient-filled shape, mapped
    /// onto its originating box.
    pub fn gradient_span(&self, shape: &Shape) -> Option<[f64; 4]> {
        let direction = GradientDirection::from_url(shape.fill()?)?;
        let (position, size) = shape.bounds()?;
        Some(direction.span(position.x, position.y, size.x, size.y))
    }

    /// Shapes excluding the background rectangle.
    pub fn primitives(&self) -> &[Shape] {
        let skip = usize::from(!self.is_transparent() && !self.shapes.is_empty());
        &self.shapes[skip..]
    }
}
