//! Toroidal offsets and wrap splitting.
//!
//! Every row may shift horizontally and every column vertically, on top of a
//! global offset. A cell at `(column, row)` moves to
//!
//! ```text
//! column' = (column + (offset_x + offsets_rows[row]) mod columns) mod columns
//! row'    = (row + (offset_y + offsets_cols[column]) mod rows) mod rows
//! ```
//!
//! Multi-cell primitives that end up straddling the grid edge (or, for
//! doubles, whose two cells receive different shifts) are split into smaller
//! pieces that redraw the same silhouette on both sides of the seam. The
//! split rules live in two lookup tables, [`node_pieces`] and
//! [`double_rotations`].

use crate::grid::GridLayout;
use crate::primitive::{Orientation, Primitive, Role, Rotation, ShapeKind, Tile};
use serde::{Deserialize, Serialize};

/// Shift amounts, in cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetConfig {
    pub offset_x: i64,
    pub offset_y: i64,
    /// Extra horizontal shift per row, indexed cyclically.
    pub offsets_rows: Vec<i64>,
    /// Extra vertical shift per column, indexed cyclically.
    pub offsets_cols: Vec<i64>,
}

impl OffsetConfig {
    /// Horizontal shift applied to every cell of `row`, in `0..columns`.
    pub fn column_shift(&self, row: usize, columns: usize) -> usize {
        let extra = cyclic(&self.offsets_rows, row);
        (self.offset_x + extra).rem_euclid(columns as i64) as usize
    }

    /// Vertical shift applied to every cell of `column`, in `0..rows`.
    pub fn row_shift(&self, column: usize, rows: usize) -> usize {
        let extra = cyclic(&self.offsets_cols, column);
        (self.offset_y + extra).rem_euclid(rows as i64) as usize
    }

    pub fn is_identity(&self) -> bool {
        self.offset_x == 0
            && self.offset_y == 0
            && self.offsets_rows.iter().all(|&o| o == 0)
            && self.offsets_cols.iter().all(|&o| o == 0)
    }
}

fn cyclic(values: &[i64], index: usize) -> i64 {
    if values.is_empty() {
        0
    } else {
        values[index % values.len()]
    }
}

/// Axes along which a shifted primitive crosses the grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seam {
    None,
    Columns,
    Rows,
    Both,
}

impl Seam {
    fn from_axes(columns: bool, rows: bool) -> Self {
        match (columns, rows) {
            (false, false) => Seam::None,
            (true, false) => Seam::Columns,
            (false, true) => Seam::Rows,
            (true, true) => Seam::Both,
        }
    }
}

/// One output piece of a split node, relative to the node's anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Cell offset from the anchor, before wrapping.
    pub at: (usize, usize),
    /// Extent in cells.
    pub span: (usize, usize),
    pub kind: ShapeKind,
    pub rotation: Rotation,
}

const fn piece(at: (usize, usize), span: (usize, usize), kind: ShapeKind, rotation: Rotation) -> Piece {
    Piece {
        at,
        span,
        kind,
        rotation,
    }
}

const TL: (usize, usize) = (0, 0);
const TR: (usize, usize) = (1, 0);
const BR: (usize, usize) = (1, 1);
const BL: (usize, usize) = (0, 1);
const CELL: (usize, usize) = (1, 1);

const SQUARES: [Piece; 4] = [
    piece(TL, CELL, ShapeKind::Square, Rotation::Zero),
    piece(TR, CELL, ShapeKind::Square, Rotation::Zero),
    piece(BR, CELL, ShapeKind::Square, Rotation::Zero),
    piece(BL, CELL, ShapeKind::Square, Rotation::Zero),
];
const MAIN_DIAGONAL: [Piece; 2] = [
    piece(TL, CELL, ShapeKind::Square, Rotation::Zero),
    piece(BR, CELL, ShapeKind::Square, Rotation::Zero),
];
const ANTI_DIAGONAL: [Piece; 2] = [
    piece(TR, CELL, ShapeKind::Square, Rotation::Zero),
    piece(BL, CELL, ShapeKind::Square, Rotation::Zero),
];
/// Left and right halves of a disc cut by a vertical seam.
const DISC_COLUMNS: [Piece; 2] = [
    piece(TL, (1, 2), ShapeKind::HalfCircle, Rotation::Zero),
    piece(TR, (1, 2), ShapeKind::HalfCircle, Rotation::Half),
];
/// Top and bottom halves of a disc cut by a horizontal seam.
const DISC_ROWS: [Piece; 2] = [
    piece(TL, (2, 1), ShapeKind::HalfCircle, Rotation::Zero),
    piece(BL, (2, 1), ShapeKind::HalfCircle, Rotation::Half),
];
/// Four quarters of a disc, each with its corner at the disc center.
const DISC_BOTH: [Piece; 4] = [
    piece(TL, CELL, ShapeKind::QuarterCircle, Rotation::Quarter),
    piece(TR, CELL, ShapeKind::QuarterCircle, Rotation::Zero),
    piece(BR, CELL, ShapeKind::QuarterCircle, Rotation::ThreeQuarter),
    piece(BL, CELL, ShapeKind::QuarterCircle, Rotation::Half),
];

/// Split rule for a node of `kind`/`rotation` crossing `seam`.
///
/// Returns an empty slice for [`Seam::None`]: the node is kept whole.
pub fn node_pieces(kind: ShapeKind, rotation: Rotation, seam: Seam) -> &'static [Piece] {
    match (kind, seam) {
        (_, Seam::None) => &[],
        (ShapeKind::Diagonal, _) if rotation == Rotation::Zero => &MAIN_DIAGONAL,
        (ShapeKind::Diagonal, _) => &ANTI_DIAGONAL,
        (ShapeKind::FullCircle, Seam::Columns) => &DISC_COLUMNS,
        (ShapeKind::FullCircle, Seam::Rows) => &DISC_ROWS,
        (ShapeKind::FullCircle, Seam::Both) => &DISC_BOTH,
        _ => &SQUARES,
    }
}

/// Quarter-circle rotations for the first and second cell of a split double,
/// so that the two pieces redraw the half disc on each side of the seam.
pub fn double_rotations(orientation: Orientation, rotation: Rotation) -> (Rotation, Rotation) {
    match (orientation, rotation) {
        (Orientation::Horizontal, Rotation::Zero) => (Rotation::Quarter, Rotation::Zero),
        (Orientation::Horizontal, _) => (Rotation::Half, Rotation::ThreeQuarter),
        (Orientation::Vertical, Rotation::Zero) => (Rotation::Quarter, Rotation::Half),
        (Orientation::Vertical, _) => (Rotation::Zero, Rotation::ThreeQuarter),
    }
}

/// Applies offsets to primitives and splits the ones that cross a seam.
#[derive(Debug, Clone, Copy)]
pub struct OffsetWrapEngine<'a> {
    layout: &'a GridLayout,
    offsets: &'a OffsetConfig,
}

impl<'a> OffsetWrapEngine<'a> {
    pub fn new(layout: &'a GridLayout, offsets: &'a OffsetConfig) -> Self {
        Self { layout, offsets }
    }

    /// Where the cell at `(column, row)` lands after shifting.
    pub fn shift(&self, column: usize, row: usize) -> (usize, usize) {
        let (cols, rows) = (self.layout.columns, self.layout.rows);
        (
            (column + self.offsets.column_shift(row, cols)) % cols,
            (row + self.offsets.row_shift(column, rows)) % rows,
        )
    }

    /// Shifted tiles for one primitive: 1 when kept whole, 2 or 4 when split.
    pub fn apply(&self, primitive: &Primitive) -> Vec<Tile> {
        let tile = &primitive.tile;
        match &primitive.role {
            Role::Cell => {
                let (c, r) = self.shift(tile.column, tile.row);
                vec![self.place(tile, c, r)]
            }
            Role::Double { orientation, .. } => self.apply_double(tile, *orientation),
            Role::Node { .. } => self.apply_node(tile),
        }
    }

    fn apply_double(&self, tile: &Tile, orientation: Orientation) -> Vec<Tile> {
        let (step_c, step_r) = match orientation {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        };
        let first = self.shift(tile.column, tile.row);
        let second = self.shift(tile.column + step_c, tile.row + step_r);

        if second == (first.0 + step_c, first.1 + step_r) {
            return vec![self.place(tile, first.0, first.1)];
        }

        let (rot_a, rot_b) = double_rotations(orientation, tile.rotation);
        [(first, rot_a), (second, rot_b)]
            .into_iter()
            .map(|((c, r), rotation)| Tile {
                kind: ShapeKind::QuarterCircle,
                rotation,
                ..self.place_span(tile, c, r, (1, 1))
            })
            .collect()
    }

    fn apply_node(&self, tile: &Tile) -> Vec<Tile> {
        let (cols, rows) = (self.layout.columns, self.layout.rows);
        let (c, r) = self.shift(tile.column, tile.row);
        let seam = Seam::from_axes(c + 1 >= cols, r + 1 >= rows);

        let pieces = node_pieces(tile.kind, tile.rotation, seam);
        if pieces.is_empty() {
            return vec![self.place(tile, c, r)];
        }
        pieces
            .iter()
            .map(|p| Tile {
                kind: p.kind,
                rotation: p.rotation,
                ..self.place_span(tile, (c + p.at.0) % cols, (r + p.at.1) % rows, p.span)
            })
            .collect()
    }

    /// `tile` moved to `(column, row)`, size unchanged.
    fn place(&self, tile: &Tile, column: usize, row: usize) -> Tile {
        Tile {
            column,
            row,
            position: self.layout.cell_position(column, row),
            ..tile.clone()
        }
    }

    /// `tile` moved to `(column, row)` and resized to `span` cells.
    fn place_span(&self, tile: &Tile, column: usize, row: usize, span: (usize, usize)) -> Tile {
        Tile {
            size: self.layout.span(span.0, span.1),
            ..self.place(tile, column, row)
        }
    }
}
