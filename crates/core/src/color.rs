//! Color parsing and blending.
//!
//! [`Rgba`] holds normalized components in [0, 1]. It parses CSS-like color
//! syntax: hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`,
//! `hsl()`/`hsla()` and a small named-color table. [`parse_color`] is the
//! lenient entry point used during generation: unparseable input is logged
//! and treated as opaque black instead of failing the call.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Named colors accepted by the parser.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("silver", "#c0c0c0"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("maroon", "#800000"),
    ("olive", "#808000"),
    ("lime", "#00ff00"),
    ("aqua", "#00ffff"),
    ("teal", "#008080"),
    ("navy", "#000080"),
    ("fuchsia", "#ff00ff"),
    ("purple", "#800080"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
];

/// RGBA color with components in [0, 1].
///
/// Serializes as a hex string: `"#rrggbb"` when opaque, `"#rrggbbaa"`
/// otherwise. The hex round-trip has 8-bit quantization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    /// Opaque color from normalized components.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Strict parse of any supported syntax.
    ///
    /// Returns `EngineError::InvalidColor` when the input is not recognized.
    pub fn parse(input: &str) -> Result<Rgba, EngineError> {
        let s = input.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
            return parse_rgb_args(input, &args);
        }
        if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
            return parse_hsl_args(input, &args);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, hex)| Self::from_hex(hex))
            .unwrap_or_else(|| Err(EngineError::InvalidColor(format!("unrecognized color '{input}'"))))
    }

    /// Parses a hex color, with or without `#`, in 3, 4, 6 or 8 digit form.
    pub fn from_hex(hex: &str) -> Result<Rgba, EngineError> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_owned(),
            n => {
                return Err(EngineError::InvalidColor(format!(
                    "expected 3, 4, 6 or 8 hex digits, got {n}"
                )))
            }
        };
        let channel = |i: usize| -> Result<f64, EngineError> {
            expanded
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .map(|v| f64::from(v) / 255.0)
                .ok_or_else(|| EngineError::InvalidColor(format!("invalid hex digits in '{hex}'")))
        };
        Ok(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if expanded.len() == 8 { channel(6)? } else { 1.0 },
        })
    }

    /// `"#rrggbb"`, each channel rounded to the nearest 8-bit value.
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `"rgba(r, g, b, a)"` with 8-bit color channels.
    pub fn to_rgba_string(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {})", self.a)
    }

    /// Channels quantized to 8 bits (clamped, rounded half up).
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl FromStr for Rgba {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Lenient parse: unrecognized input logs a warning and yields opaque black.
pub fn parse_color(input: &str) -> Rgba {
    Rgba::parse(input).unwrap_or_else(|e| {
        tracing::warn!(color = input, error = %e, "unable to parse color, defaulting to black");
        Rgba::BLACK
    })
}

/// Linear per-channel blend: `bg * (1 - t) + fg * t`, returned as `#rrggbb`.
///
/// Both inputs go through [`parse_color`], so bad input degrades to black.
pub fn blend(background: &str, foreground: &str, t: f64) -> String {
    let bg = parse_color(background);
    let fg = parse_color(foreground);
    let mix = |a: f64, b: f64| b * t + a * (1.0 - t);
    Rgba::rgb(mix(bg.r, fg.r), mix(bg.g, fg.g), mix(bg.b, fg.b)).to_hex()
}

/// Returns the comma-separated arguments of `name(...)` if `s` has that form.
fn function_args(s: &str, name: &str) -> Option<Vec<String>> {
    let inner = s.strip_prefix(name)?.trim_start().strip_prefix('(')?;
    let inner = inner.trim_end().strip_suffix(')')?;
    Some(inner.split(',').map(|part| part.trim().to_owned()).collect())
}

fn parse_number(input: &str, part: &str) -> Result<f64, EngineError> {
    part.trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map_err(|_| EngineError::InvalidColor(format!("invalid component '{part}' in '{input}'")))
}

fn parse_rgb_args(input: &str, args: &[String]) -> Result<Rgba, EngineError> {
    if args.len() < 3 {
        return Err(EngineError::InvalidColor(format!("rgb() needs 3 components: '{input}'")));
    }
    Ok(Rgba {
        r: parse_number(input, &args[0])? / 255.0,
        g: parse_number(input, &args[1])? / 255.0,
        b: parse_number(input, &args[2])? / 255.0,
        a: args.get(3).map(|a| parse_number(input, a)).transpose()?.unwrap_or(1.0),
    })
}

fn parse_hsl_args(input: &str, args: &[String]) -> Result<Rgba, EngineError> {
    if args.len() < 3 {
        return Err(EngineError::InvalidColor(format!("hsl() needs 3 components: '{input}'")));
    }
    let h = parse_number(input, &args[0])? / 360.0;
    let s = parse_number(input, &args[1])? / 100.0;
    let l = parse_number(input, &args[2])? / 100.0;
    let a = args.get(3).map(|a| parse_number(input, a)).transpose()?.unwrap_or(1.0);
    let [r, g, b] = hsl_to_rgb(h, s, l);
    Ok(Rgba { r, g, b, a })
}

/// HSL (all in [0, 1]) to RGB.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let hue_to_rgb = |p: f64, q: f64, mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        match t {
            t if t < 1.0 / 6.0 => p + (q - p) * 6.0 * t,
            t if t < 0.5 => q,
            t if t < 2.0 / 3.0 => p + (q - p) * (2.0 / 3.0 - t) * 6.0,
            _ => p,
        }
    };
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}
