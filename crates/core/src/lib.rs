#![deny(unsafe_code)]
//! Core of the sigil identity-artwork generator.
//!
//! A seed and a [`Config`] deterministically produce an [`Artwork`]: a grid
//! of squares, circles, crosses and diagonals with tones and gradients
//! derived from two colors. Provides the seeded source ([`SeededRng`]),
//! palette derivation, grid and primitive construction, the shape factory
//! with rounded-corner path math, toroidal offset wrapping, and the
//! [`generate`] pipeline that ties them together.

pub mod artwork;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod mask;
pub mod noise;
pub mod palette;
pub mod params;
pub mod pipeline;
pub mod primitive;
pub mod prng;
pub mod seed;
pub mod shape;
pub mod wrap;

pub use artwork::{Artwork, Paint};
pub use color::Rgba;
pub use config::{Config, Mode};
pub use error::EngineError;
pub use geometry::CornerStyle;
pub use mask::{ExclusionMask, GlyphSource, TextGlyphs};
pub use palette::{Fill, Palette};
pub use pipeline::generate;
pub use prng::{SeededRng, Xorshift64};
pub use seed::Seed;
pub use shape::{Shape, ShapeType};
