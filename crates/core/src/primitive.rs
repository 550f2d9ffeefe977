//! Grid primitives: single cells, 2×2 nodes and 1×2 doubles.
//!
//! Every primitive carries a [`Tile`] (grid position, pixel box, shape kind,
//! rotation, fill). Nodes and doubles additionally record which cells they
//! cover; those indices refer into the grid's cell list but do not own it.

use crate::palette::Fill;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Geometric family of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Square,
    FullCircle,
    HalfCircle,
    QuarterCircle,
    Cross,
    Diagonal,
}

impl ShapeKind {
    /// Kinds a single cell may take, in draw order.
    pub const CELL_KINDS: [ShapeKind; 2] = [ShapeKind::Square, ShapeKind::QuarterCircle];
    /// Kinds a node may take, in draw order.
    pub const NODE_KINDS: [ShapeKind; 3] = [ShapeKind::Cross, ShapeKind::FullCircle, ShapeKind::Diagonal];

    /// Rotations a kind may be drawn with.
    pub fn rotations(self) -> &'static [Rotation] {
        match self {
            ShapeKind::Square | ShapeKind::Cross | ShapeKind::FullCircle => &[Rotation::Zero],
            ShapeKind::HalfCircle => &[Rotation::Zero, Rotation::Half],
            ShapeKind::Diagonal => &[Rotation::Zero, Rotation::Quarter],
            ShapeKind::QuarterCircle => &[
                Rotation::Zero,
                Rotation::Quarter,
                Rotation::Half,
                Rotation::ThreeQuarter,
            ],
        }
    }
}

/// One of the four right-angle rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    Zero,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn radians(self) -> f64 {
        match self {
            Rotation::Zero => 0.0,
            Rotation::Quarter => FRAC_PI_2,
            Rotation::Half => PI,
            Rotation::ThreeQuarter => 3.0 * FRAC_PI_2,
        }
    }
}

/// Long axis of a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A positioned, typed and filled grid box, ready for shape emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub column: usize,
    pub row: usize,
    /// Top-left corner in pixels.
    pub position: DVec2,
    pub size: DVec2,
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub fill: Fill,
}

impl Tile {
    /// Bottom-right corner in pixels.
    pub fn max(&self) -> DVec2 {
        self.position + self.size
    }
}

/// What a primitive is, beyond its tile.
#[derive(Debug, Clone, PartialEq)]
pub enum Role {
    Cell,
    Node {
        /// Covered cells: top-left, top-right, bottom-right, bottom-left.
        cells: [usize; 4],
        /// Index arithmetic over the column-major layout; may fall outside the grid.
        neighbours: [i64; 8],
        /// Present cells of the 2×2 blocks two steps away on each side.
        neighbour_cells: Vec<usize>,
    },
    Double {
        orientation: Orientation,
        cells: [usize; 2],
        /// Present cells of the ten-cell ring around the pair.
        neighbour_cells: Vec<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Cell and node index is the column-major grid index; a double's index is
    /// its position in the double list.
    pub index: usize,
    pub tile: Tile,
    pub role: Role,
}

impl Primitive {
    /// Cell indices this primitive occupies. A cell occupies itself.
    pub fn covered_cells(&self) -> &[usize] {
        match &self.role {
            Role::Cell => std::slice::from_ref(&self.index),
            Role::Node { cells, .. } => cells,
            Role::Double { cells, .. } => cells,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self.role, Role::Node { .. })
    }

    pub fn is_double(&self) -> bool {
        matches!(self.role, Role::Double { .. })
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match self.role {
            Role::Double { orientation, .. } => Some(orientation),
            _ => None,
        }
    }
}
