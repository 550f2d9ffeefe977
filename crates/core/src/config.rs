//! Generation parameters.
//!
//! [`Config`] is a plain value object. Build it with [`Default`], with
//! struct-update syntax, or leniently from a JSON object via
//! [`Config::from_json`]; then call [`Config::validate`] before generating.

use crate::error::EngineError;
use crate::geometry::CornerStyle;
use crate::grid::GridLayout;
use crate::params::{
    param_bool, param_f64, param_i64, param_i64_list, param_seed, param_string, param_usize,
};
use crate::seed::Seed;
use crate::shape::CornerRadii;
use crate::wrap::OffsetConfig;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Default canvas width and height in pixels.
const DEFAULT_SIZE: f64 = 1024.0;
/// Default number of cells per side.
const DEFAULT_GRID_SIZE: usize = 8;
const DEFAULT_BACKGROUND: &str = "#ffffff";
const DEFAULT_FOREGROUND: &str = "#000000";
/// Default gap between cells in pixels.
const DEFAULT_GAP: f64 = 10.0;
/// Default outer margin in pixels.
const DEFAULT_MARGIN: f64 = 100.0;
/// Default share of primitives dropped after selection, in percent.
const DEFAULT_WHITE_SPACE: f64 = 20.0;
/// Default double and node selection chance, in percent.
const DEFAULT_SHAPE_CHANCE: f64 = 4.0;

/// Smallest and largest accepted grid size.
pub const GRID_SIZE_RANGE: (usize, usize) = (2, 50);
/// Smallest and largest accepted canvas side, in pixels.
pub const CANVAS_RANGE: (f64, f64) = (1.0, 4096.0);
/// Grid size forced by the letter and text modes.
pub const GLYPH_GRID_SIZE: usize = 8;

/// How the exclusion mask is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain grid, nothing excluded.
    #[default]
    None,
    /// Carve the single input character out of an 8×8 grid.
    Letter,
    /// Seed from the input text and carve its first character.
    #[serde(alias = "string")]
    Text,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::None => "none",
            Mode::Letter => "letter",
            Mode::Text => "text",
        }
    }

    /// `true` for modes that force the glyph grid size and read a mask.
    pub fn uses_glyph(self) -> bool {
        !matches!(self, Mode::None)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Mode::None),
            "letter" => Ok(Mode::Letter),
            "text" | "string" => Ok(Mode::Text),
            other => Err(EngineError::config(
                "mode",
                format!("expected none, letter, text or string, got '{other}'"),
            )),
        }
    }
}

/// Every parameter of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub width: f64,
    pub height: f64,
    /// Cells per side. Letter and text modes override it with [`GLYPH_GRID_SIZE`].
    pub grid_size: usize,
    #[serde(alias = "backgroundColor")]
    pub background: String,
    #[serde(alias = "foregroundColor")]
    pub foreground: String,
    /// Skip the background rectangle and report `"transparent"`.
    pub transparent: bool,
    pub gap: f64,
    pub margin: f64,
    /// Percent of each primitive collection dropped after selection.
    pub white_space: f64,
    pub half_shapes_chance: f64,
    pub node_shapes_chance: f64,
    pub square_radius: f64,
    pub cross_radius: f64,
    pub circle_radius: f64,
    pub corner_style: CornerStyle,
    pub mode: Mode,
    /// Letter or text for the glyph modes.
    pub input: String,
    pub offset_x: i64,
    pub offset_y: i64,
    pub offsets_rows: Vec<i64>,
    pub offsets_cols: Vec<i64>,
    /// `None` generates a fresh seed per call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
}

impl Default for Config {
    fn default() -> Self {
        let radii = CornerRadii::default();
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            background: DEFAULT_BACKGROUND.to_owned(),
            foreground: DEFAULT_FOREGROUND.to_owned(),
            transparent: false,
            gap: DEFAULT_GAP,
            margin: DEFAULT_MARGIN,
            white_space: DEFAULT_WHITE_SPACE,
            half_shapes_chance: DEFAULT_SHAPE_CHANCE,
            node_shapes_chance: DEFAULT_SHAPE_CHANCE,
            square_radius: radii.square,
            cross_radius: radii.cross,
            circle_radius: radii.circle,
            corner_style: CornerStyle::default(),
            mode: Mode::None,
            input: String::new(),
            offset_x: 0,
            offset_y: 0,
            offsets_rows: vec![0; DEFAULT_GRID_SIZE],
            offsets_cols: vec![0; DEFAULT_GRID_SIZE],
            seed: None,
        }
    }
}

impl Config {
    /// Builds a config from camelCase JSON keys, falling back to defaults
    /// for anything missing or mistyped.
    ///
    /// Unrecognised `mode` or `cornerStyle` strings are errors rather than
    /// silent fallbacks.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let d = Self::default();
        let mode: Mode = param_string(params, "mode", d.mode.name()).parse()?;
        let corner_style: CornerStyle =
            param_string(params, "cornerStyle", d.corner_style.name()).parse()?;
        Ok(Self {
            width: param_f64(params, "width", d.width),
            height: param_f64(params, "height", d.height),
            grid_size: param_usize(params, "gridSize", d.grid_size),
            background: color_param(params, "background", "backgroundColor", &d.background),
            foreground: color_param(params, "foreground", "foregroundColor", &d.foreground),
            transparent: param_bool(params, "transparent", d.transparent),
            gap: param_f64(params, "gap", d.gap),
            margin: param_f64(params, "margin", d.margin),
            white_space: param_f64(params, "whiteSpace", d.white_space),
            half_shapes_chance: param_f64(params, "halfShapesChance", d.half_shapes_chance),
            node_shapes_chance: param_f64(params, "nodeShapesChance", d.node_shapes_chance),
            square_radius: param_f64(params, "squareRadius", d.square_radius),
            cross_radius: param_f64(params, "crossRadius", d.cross_radius),
            circle_radius: param_f64(params, "circleRadius", d.circle_radius),
            corner_style,
            mode,
            input: param_string(params, "input", &d.input),
            offset_x: param_i64(params, "offsetX", d.offset_x),
            offset_y: param_i64(params, "offsetY", d.offset_y),
            offsets_rows: param_i64_list(params, "offsetsRows", &d.offsets_rows),
            offsets_cols: param_i64_list(params, "offsetsCols", &d.offsets_cols),
            seed: param_seed(params, "seed"),
        })
    }

    /// Character carved out by the glyph modes: the first one of the trimmed
    /// input. Letter mode ignores the rest.
    pub fn glyph(&self) -> Option<char> {
        let mut chars = self.input.trim().chars();
        let glyph = chars.next()?;
        let dropped = chars.count();
        if self.mode == Mode::Letter && dropped > 0 {
            debug!(%glyph, dropped, "letter mode uses only the first character");
        }
        Some(glyph)
    }

    /// Grid size actually used, after the glyph modes force theirs.
    pub fn effective_grid_size(&self) -> usize {
        if self.mode.uses_glyph() {
            GLYPH_GRID_SIZE
        } else {
            self.grid_size
        }
    }

    /// Rejects out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), EngineError> {
        let (min_grid, max_grid) = GRID_SIZE_RANGE;
        if !(min_grid..=max_grid).contains(&self.grid_size) {
            return Err(EngineError::config(
                "gridSize",
                format!("must be in {min_grid}..={max_grid}, got {}", self.grid_size),
            ));
        }

        let (min_side, max_side) = CANVAS_RANGE;
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || !(min_side..=max_side).contains(&value) {
                return Err(EngineError::config(
                    field,
                    format!("must be in [{min_side}, {max_side}], got {value}"),
                ));
            }
        }

        for (field, value) in [("gap", self.gap), ("margin", self.margin)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::config(
                    field,
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }

        for (field, value) in [
            ("whiteSpace", self.white_space),
            ("halfShapesChance", self.half_shapes_chance),
            ("nodeShapesChance", self.node_shapes_chance),
            ("squareRadius", self.square_radius),
            ("crossRadius", self.cross_radius),
            ("circleRadius", self.circle_radius),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(EngineError::config(
                    field,
                    format!("must be a percentage in [0, 100], got {value}"),
                ));
            }
        }

        let cell = self.layout().cell_size;
        if cell.x <= 0.0 || cell.y <= 0.0 {
            return Err(EngineError::config(
                "gridSize",
                format!(
                    "{} cells do not fit in {}x{} with gap {} and margin {}",
                    self.effective_grid_size(),
                    self.width,
                    self.height,
                    self.gap,
                    self.margin
                ),
            ));
        }

        match self.mode {
            Mode::Letter if self.input.trim().is_empty() => {
                Err(EngineError::config("input", "letter mode needs a character"))
            }
            Mode::Text if self.input.is_empty() => {
                Err(EngineError::config("input", "text mode needs a non-empty input"))
            }
            _ => Ok(()),
        }
    }

    /// Pixel layout of the effective grid.
    pub fn layout(&self) -> GridLayout {
        let n = self.effective_grid_size();
        GridLayout::new(self.width, self.height, n, n, self.gap, self.margin)
    }

    pub fn radii(&self) -> CornerRadii {
        CornerRadii {
            square: self.square_radius,
            cross: self.cross_radius,
            circle: self.circle_radius,
        }
    }

    pub fn offsets(&self) -> OffsetConfig {
        OffsetConfig {
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            offsets_rows: self.offsets_rows.clone(),
            offsets_cols: self.offsets_cols.clone(),
        }
    }

    /// Type, default, range and description of every parameter.
    pub fn param_schema() -> Value {
        let d = Self::default();
        let percent = |default: f64, description: &str| {
            json!({
                "type": "number",
                "default": default,
                "min": 0.0,
                "max": 100.0,
                "description": description
            })
        };
        json!({
            "width": {
                "type": "number",
                "default": d.width,
                "min": CANVAS_RANGE.0,
                "max": CANVAS_RANGE.1,
                "description": "Canvas width in pixels"
            },
            "height": {
                "type": "number",
                "default": d.height,
                "min": CANVAS_RANGE.0,
                "max": CANVAS_RANGE.1,
                "description": "Canvas height in pixels"
            },
            "gridSize": {
                "type": "integer",
                "default": d.grid_size,
                "min": GRID_SIZE_RANGE.0,
                "max": GRID_SIZE_RANGE.1,
                "description": "Cells per side; forced to 8 in letter and text modes"
            },
            "background": {
                "type": "color",
                "default": d.background,
                "description": "Background color"
            },
            "foreground": {
                "type": "color",
                "default": d.foreground,
                "description": "Foreground color the tones blend towards"
            },
            "transparent": {
                "type": "boolean",
                "default": d.transparent,
                "description": "Omit the background rectangle"
            },
            "gap": {
                "type": "number",
                "default": d.gap,
                "min": 0.0,
                "description": "Space between cells in pixels"
            },
            "margin": {
                "type": "number",
                "default": d.margin,
                "min": 0.0,
                "description": "Outer margin in pixels"
            },
            "whiteSpace": percent(d.white_space, "Share of primitives dropped after selection"),
            "halfShapesChance": percent(d.half_shapes_chance, "Double selection quota, per 144 cells"),
            "nodeShapesChance": percent(d.node_shapes_chance, "Node selection quota, per 144 cells"),
            "squareRadius": percent(d.square_radius, "Square corner radius, percent of cell width"),
            "crossRadius": percent(d.cross_radius, "Cross and diagonal corner radius"),
            "circleRadius": percent(d.circle_radius, "Quarter and half circle edge rounding"),
            "cornerStyle": {
                "type": "enum",
                "default": d.corner_style.name(),
                "values": ["circle", "approx", "hand"],
                "description": "Bezier control rule for rounded corners"
            },
            "mode": {
                "type": "enum",
                "default": d.mode.name(),
                "values": ["none", "letter", "text", "string"],
                "description": "Exclusion mask source"
            },
            "input": {
                "type": "string",
                "default": d.input,
                "description": "Letter or text for the glyph modes"
            },
            "offsetX": {
                "type": "integer",
                "default": d.offset_x,
                "description": "Global horizontal shift in cells"
            },
            "offsetY": {
                "type": "integer",
                "default": d.offset_y,
                "description": "Global vertical shift in cells"
            },
            "offsetsRows": {
                "type": "integer[]",
                "default": d.offsets_rows,
                "description": "Extra horizontal shift per row, cyclic"
            },
            "offsetsCols": {
                "type": "integer[]",
                "default": d.offsets_cols,
                "description": "Extra vertical shift per column, cyclic"
            },
            "seed": {
                "type": "string|number",
                "default": null,
                "description": "Seed; generated when absent"
            }
        })
    }
}

/// Reads a color under its current key, falling back to the longer
/// `backgroundColor`/`foregroundColor` spelling. The current key wins when
/// both are present.
fn color_param(params: &Value, name: &str, legacy: &str, default: &str) -> String {
    match (params.get(name), params.get(legacy)) {
        (Some(_), Some(shadowed)) => {
            warn!(key = name, ignored = legacy, value = %shadowed, "both color keys given, ignoring the longer one");
            param_string(params, name, default)
        }
        (None, Some(_)) => param_string(params, legacy, default),
        _ => param_string(params, name, default),
    }
}
