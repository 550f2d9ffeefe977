//! End-to-end generation.
//!
//! [`generate`] runs every stage in a fixed order. Each stage that draws from
//! the random source does so in a documented sequence, so the same seed and
//! [`Config`] always produce the same [`Artwork`]:
//!
//! 1. validate the config (no draws)
//! 2. resolve the seed and build the source (255 noise draws)
//! 3. derive the palette (no draws)
//! 4. text mode only: re-seed from the input text
//! 5. build the grid (see [`crate::grid`])
//! 6. shuffle doubles, then nodes, keeping each quota
//! 7. drop cells covered by the kept doubles and nodes
//! 8. shuffle cells, nodes, then doubles, trimming each by the white-space ratio
//! 9. offset, split and emit doubles, cells, then nodes

use crate::artwork::{Artwork, TRANSPARENT};
use crate::config::{Config, Mode};
use crate::error::EngineError;
use crate::grid::{Grid, GridBuilder};
use crate::mask::{ExclusionMask, GlyphSource};
use crate::palette::Palette;
use crate::primitive::Primitive;
use crate::prng::SeededRng;
use crate::seed::Seed;
use crate::shape::{Shape, ShapeFactory};
use crate::wrap::OffsetWrapEngine;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Cells per quota unit: a chance of 100% selects one primitive per 1.44 cells.
const QUOTA_CELLS: f64 = 144.0;

/// Generates an artwork. `glyphs` supplies masks for the letter and text
/// modes; without it those modes fall back to the empty mask.
///
/// Fails on an invalid config before any randomness is consumed.
pub fn generate(config: &Config, glyphs: Option<&dyn GlyphSource>) -> Result<Artwork, EngineError> {
    config.validate()?;

    let seed = config.seed.clone().unwrap_or_else(Seed::generate);
    debug!(%seed, mode = %config.mode, "generating");
    let mut rng = SeededRng::new(Some(seed.clone()));

    let palette = Palette::derive(&config.background, &config.foreground);

    let layout = config.layout();
    if config.mode == Mode::Text {
        rng.set_seed(Some(Seed::Text(config.input.clone())));
    }
    let mask = exclusion_mask(config, glyphs, layout.columns);

    let grid = GridBuilder::new(layout).build(&mut rng, &mask)?;
    let selection = Selection::draw(&mut rng, grid, config);

    let factory = ShapeFactory::new(&palette, config.radii(), config.gap).with_style(config.corner_style);
    let offsets = config.offsets();
    let wrap = OffsetWrapEngine::new(&layout, &offsets);

    let mut shapes = Vec::with_capacity(selection.len() + 1);
    if !config.transparent {
        shapes.push(Shape::background(config.width, config.height, &config.background));
    }
    for primitive in selection.in_draw_order() {
        shapes.extend(wrap.apply(primitive).iter().map(|tile| factory.create(tile)));
    }
    debug!(shapes = shapes.len(), "artwork assembled");

    Ok(Artwork {
        width: config.width,
        height: config.height,
        background_color: if config.transparent {
            TRANSPARENT.to_owned()
        } else {
            config.background.clone()
        },
        shapes,
        gradients: palette.gradients().to_vec(),
        gradient_color: palette.gradient_color().to_owned(),
        seed,
    })
}

/// Mask for the glyph modes. Every failure degrades to the empty mask.
fn exclusion_mask(config: &Config, glyphs: Option<&dyn GlyphSource>, size: usize) -> ExclusionMask {
    if !config.mode.uses_glyph() {
        return ExclusionMask::empty();
    }
    let Some(glyph) = config.glyph() else {
        return ExclusionMask::empty();
    };
    let Some(source) = glyphs else {
        warn!(%glyph, "no glyph source, using empty mask");
        return ExclusionMask::empty();
    };
    match source.mask(glyph, size) {
        Ok(Some(mask)) if mask.size() == size => mask,
        Ok(Some(mask)) => {
            warn!(%glyph, expected = size, found = mask.size(), "glyph mask has wrong size, using empty mask");
            ExclusionMask::empty()
        }
        Ok(None) => {
            warn!(%glyph, "unknown glyph, using empty mask");
            ExclusionMask::empty()
        }
        Err(err) => {
            warn!(%glyph, error = %err, "malformed glyph mask, using empty mask");
            ExclusionMask::empty()
        }
    }
}

/// Selection quotas `(doubles, nodes)` for a grid size.
///
/// A 3×3 grid always gets exactly one node.
pub fn quotas(grid_size: usize, half_chance: f64, node_chance: f64) -> (usize, usize) {
    let area = (grid_size * grid_size) as f64;
    let quota = |chance: f64| (area * chance / QUOTA_CELLS).round() as usize;
    let nodes = if grid_size == 3 { 1 } else { quota(node_chance) };
    (quota(half_chance), nodes)
}

/// Number of primitives kept from `len` after white-space trimming.
fn keep_count(len: usize, white_space: f64) -> usize {
    (len as f64 * (1.0 - white_space / 100.0)).floor() as usize
}

/// Primitives that survive selection and trimming.
#[derive(Debug, Clone)]
struct Selection {
    cells: Vec<Primitive>,
    nodes: Vec<Primitive>,
    doubles: Vec<Primitive>,
}

impl Selection {
    fn draw(rng: &mut SeededRng, grid: Grid, config: &Config) -> Self {
        let (half_quota, node_quota) = quotas(
            grid.layout.columns,
            config.half_shapes_chance,
            config.node_shapes_chance,
        );
        debug!(doubles = half_quota, nodes = node_quota, "quotas");

        let mut doubles = rng.shuffle(&grid.doubles);
        doubles.truncate(half_quota);
        let mut nodes = rng.shuffle(&grid.nodes);
        nodes.truncate(node_quota);

        let covered: HashSet<usize> = doubles
            .iter()
            .chain(&nodes)
            .flat_map(|p| p.covered_cells().iter().copied())
            .collect();
        let cells: Vec<Primitive> = grid
            .cells
            .into_iter()
            .filter(|c| !covered.contains(&c.index))
            .collect();

        let mut trim = |items: &[Primitive]| {
            let mut kept = rng.shuffle(items);
            kept.truncate(keep_count(items.len(), config.white_space));
            kept
        };
        let cells = trim(&cells);
        let nodes = trim(&nodes);
        let doubles = trim(&doubles);

        Self {
            cells,
            nodes,
            doubles,
        }
    }

    fn len(&self) -> usize {
        self.cells.len() + self.nodes.len() + self.doubles.len()
    }

    fn in_draw_order(&self) -> impl Iterator<Item = &Primitive> {
        self.doubles.iter().chain(&self.cells).chain(&self.nodes)
    }
}
