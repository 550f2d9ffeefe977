//! Exclusion masks and the glyph lookup seam.
//!
//! A mask is a square, column-major boolean grid where `true` removes the
//! cell at `(column, row)` from the artwork. Masks come from a
//! [`GlyphSource`]; the engine ships no letter table of its own.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Square boolean grid, stored column-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionMask {
    size: usize,
    cells: Vec<bool>,
}

impl ExclusionMask {
    /// The mask that excludes nothing, at any grid size.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a mask from `columns[column][row]`.
    pub fn from_columns(columns: Vec<Vec<bool>>) -> Result<Self, EngineError> {
        let size = columns.len();
        if let Some((c, col)) = columns.iter().enumerate().find(|(_, col)| col.len() != size) {
            return Err(EngineError::InvalidMask(format!(
                "column {c} has {} rows, expected {size}",
                col.len()
            )));
        }
        Ok(Self {
            size,
            cells: columns.into_iter().flatten().collect(),
        })
    }

    /// Builds a mask from `rows[row][column]`, transposing into column-major order.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, EngineError> {
        let size = rows.len();
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(EngineError::InvalidMask(format!(
                "row {r} has {} cells, expected {size}",
                row.len()
            )));
        }
        let cells = (0..size)
            .flat_map(|c| rows.iter().map(move |row| row[c]))
            .collect();
        Ok(Self { size, cells })
    }

    /// Parses a row-per-line text grid of exactly `size` rows and columns.
    ///
    /// `#`, `X` and `1` exclude a cell; `.`, `_` and `0` keep it. Cells may be
    /// separated by whitespace or written back to back. Blank lines are ignored.
    pub fn parse(text: &str, size: usize) -> Result<Self, EngineError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() != size {
            return Err(EngineError::InvalidMask(format!(
                "found {} rows, expected {size}",
                lines.len()
            )));
        }

        let rows = lines
            .iter()
            .enumerate()
            .map(|(r, line)| {
                let row = line
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        '#' | 'X' | 'x' | '1' => Ok(true),
                        '.' | '_' | '0' => Ok(false),
                        other => Err(EngineError::InvalidMask(format!(
                            "unexpected '{other}' in row {r}"
                        ))),
                    })
                    .collect::<Result<Vec<bool>, _>>()?;
                if row.len() != size {
                    return Err(EngineError::InvalidMask(format!(
                        "row {r} has {} cells, expected {size}",
                        row.len()
                    )));
                }
                Ok(row)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }

    /// Side length; 0 for the empty mask.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `true` if the cell is excluded. Out-of-range positions are never excluded.
    pub fn is_excluded(&self, column: usize, row: usize) -> bool {
        if column >= self.size || row >= self.size {
            return false;
        }
        self.cells[column * self.size + row]
    }

    /// Number of excluded cells.
    pub fn excluded_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Supplies the exclusion mask for a character.
pub trait GlyphSource {
    /// Mask for `glyph` at the given grid size; `Ok(None)` when the glyph is unknown.
    fn mask(&self, glyph: char, size: usize) -> Result<Option<ExclusionMask>, EngineError>;
}

/// A [`GlyphSource`] backed by caller-supplied text grids.
///
/// Lookup falls back to the uppercase form of the glyph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextGlyphs {
    glyphs: BTreeMap<char, String>,
}

impl TextGlyphs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, glyph: char, grid: impl Into<String>) {
        self.glyphs.insert(glyph, grid.into());
    }

    pub fn with(mut self, glyph: char, grid: impl Into<String>) -> Self {
        self.insert(glyph, grid);
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    fn lookup(&self, glyph: char) -> Option<&String> {
        self.glyphs
            .get(&glyph)
            .or_else(|| glyph.to_uppercase().next().and_then(|u| self.glyphs.get(&u)))
    }
}

impl GlyphSource for TextGlyphs {
    fn mask(&self, glyph: char, size: usize) -> Result<Option<ExclusionMask>, EngineError> {
        self.lookup(glyph)
            .map(|text| ExclusionMask::parse(text, size))
            .transpose()
    }
}
