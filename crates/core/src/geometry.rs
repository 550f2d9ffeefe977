//! Path geometry: point rotation, path text parsing and corner rounding.
//!
//! Corner rounding replaces each polygon vertex with a cubic Bézier that
//! stands in for a tangent arc. Three control-length styles are supported;
//! see [`CornerStyle`].

use crate::error::EngineError;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::str::FromStr;

/// Rotates `point` around `center` by `angle` radians.
///
/// Positive angles turn clockwise in y-down screen space
/// (`x' = cos·dx + sin·dy`, `y' = cos·dy − sin·dx`).
pub fn rotate_point(point: DVec2, center: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    DVec2::new(cos * d.x + sin * d.y + center.x, cos * d.y - sin * d.x + center.y)
}

/// Rounds half up to `decimals` places (`floor(x·10ⁿ + 0.5) / 10ⁿ`).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

/// Formats a coordinate for path text: shortest round-trip form, no `-0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

fn fmt_point(p: DVec2) -> String {
    format!("{} {}", fmt_num(p.x), fmt_num(p.y))
}

/// Control-point length rule for rounded corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerStyle {
    /// Approximates a circular arc split into `ceil(2π / (π − θ))` segments.
    #[default]
    Circle,
    /// Polygon-style approximation, tighter on acute corners.
    Approx,
    /// Looser, hand-drawn look.
    Hand,
}

impl CornerStyle {
    pub fn name(self) -> &'static str {
        match self {
            CornerStyle::Circle => "circle",
            CornerStyle::Approx => "approx",
            CornerStyle::Hand => "hand",
        }
    }
}

impl FromStr for CornerStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(CornerStyle::Circle),
            "approx" => Ok(CornerStyle::Approx),
            "hand" => Ok(CornerStyle::Hand),
            other => Err(EngineError::config(
                "cornerStyle",
                format!("unknown style '{other}', expected circle, approx or hand"),
            )),
        }
    }
}

/// One parsed path command with its numeric arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    /// Command letter as written; lowercase means relative.
    pub command: char,
    pub args: Vec<f64>,
}

impl PathCommand {
    /// Argument count per command, or `None` for an unknown letter.
    pub fn arity(command: char) -> Option<usize> {
        match command.to_ascii_lowercase() {
            'a' => Some(7),
            'c' => Some(6),
            'h' | 'v' => Some(1),
            'l' | 'm' | 't' => Some(2),
            'q' | 's' => Some(4),
            'z' => Some(0),
            _ => None,
        }
    }

    /// End point of an absolute `M`/`L` command.
    fn vertex(&self) -> Result<DVec2, EngineError> {
        match (self.command, self.args.as_slice()) {
            ('M' | 'L', &[x, y]) => Ok(DVec2::new(x, y)),
            (c, _) => Err(EngineError::MalformedPath(format!(
                "corner rounding needs absolute M/L vertices, found '{c}'"
            ))),
        }
    }
}

/// Parses path text into commands.
///
/// Repeated argument groups after one letter become repeated commands; extra
/// pairs after `M`/`m` become `L`/`l`. A group with too few numbers fails.
pub fn parse_path(path: &str) -> Result<Vec<PathCommand>, EngineError> {
    let mut commands = Vec::new();
    let mut segments: Vec<(char, &str)> = Vec::new();

    // Split into (letter, argument text) segments.
    let mut current: Option<(char, usize)> = None;
    for (i, c) in path.char_indices() {
        if PathCommand::arity(c).is_some() {
            if let Some((letter, start)) = current.take() {
                segments.push((letter, &path[start..i]));
            }
            current = Some((c, i + c.len_utf8()));
        }
    }
    if let Some((letter, start)) = current {
        segments.push((letter, &path[start..]));
    }

    for (mut letter, text) in segments {
        let mut numbers = parse_numbers(text)?;
        let mut arity = PathCommand::arity(letter).unwrap_or(0);

        if letter.eq_ignore_ascii_case(&'m') && numbers.len() > 2 {
            let rest = numbers.split_off(2);
            commands.push(PathCommand {
                command: letter,
                args: numbers,
            });
            numbers = rest;
            letter = if letter == 'm' { 'l' } else { 'L' };
            arity = 2;
        }

        if arity == 0 {
            if !numbers.is_empty() {
                return Err(EngineError::MalformedPath(format!(
                    "'{letter}' takes no arguments, found {}",
                    numbers.len()
                )));
            }
            commands.push(PathCommand {
                command: letter,
                args: numbers,
            });
            continue;
        }

        if numbers.is_empty() || numbers.len() % arity != 0 {
            return Err(EngineError::MalformedPath(format!(
                "'{letter}' expects groups of {arity} numbers, found {}",
                numbers.len()
            )));
        }
        for group in numbers.chunks(arity) {
            commands.push(PathCommand {
                command: letter,
                args: group.to_vec(),
            });
        }
    }
    Ok(commands)
}

/// Scans numbers separated by whitespace, commas or sign changes.
fn parse_numbers(text: &str) -> Result<Vec<f64>, EngineError> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
            continue;
        }
        let start = i;
        if b == b'-' || b == b'+' {
            i += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            i += 1;
        }
        if seen_digit && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'-' || bytes[j] == b'+') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }
        if !seen_digit {
            let found = text[start..].chars().next().unwrap_or(' ');
            return Err(EngineError::MalformedPath(format!(
                "unexpected '{found}' in path arguments"
            )));
        }
        let token = &text[start..i];
        let value = token
            .parse::<f64>()
            .map_err(|_| EngineError::MalformedPath(format!("bad number '{token}'")))?;
        out.push(value);
    }
    Ok(out)
}

/// `M p0 L p1 … Z` for a closed polygon.
pub fn polygon_path(points: &[DVec2]) -> String {
    let mut d = String::new();
    for (i, &p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{cmd} {} ", fmt_point(p)));
    }
    d.push('Z');
    d
}

/// Closed path through `points` with each vertex rounded.
///
/// `radii[i]` rounds the vertex *after* `points[i]` (that is, `points[i + 1]`,
/// wrapping). A single radius applies to every vertex. Each radius is clamped
/// to half of the shorter adjacent edge. A zero radius keeps the corner sharp.
/// All coordinates of rounded corners are rounded to three decimals.
pub fn round_corners(points: &[DVec2], radii: &[f64], style: CornerStyle) -> String {
    let n = points.len();
    let radius_at = |i: usize| match radii {
        [r] => *r,
        _ => radii.get(i).copied().unwrap_or(0.0),
    };
    if n < 3 || (0..n).all(|i| radius_at(i) == 0.0) {
        return polygon_path(points);
    }

    let mut head: Option<String> = None;
    let mut body: Vec<String> = Vec::with_capacity(n * 2 + 1);

    for i in 0..n {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];
        let requested = radius_at(i);

        let corner = (requested != 0.0)
            .then(|| Corner::new(p1, p2, p3, requested, style))
            .flatten();

        match corner {
            Some(c) => {
                if i == n - 1 {
                    head = Some(format!("M {}", fmt_point(c.end)));
                }
                body.push(format!("L {}", fmt_point(c.start)));
                body.push(format!(
                    "C {}, {}, {}",
                    fmt_point(c.start_control),
                    fmt_point(c.end_control),
                    fmt_point(c.end)
                ));
            }
            None => {
                if i == n - 1 {
                    head = Some(format!("M {}", fmt_point(p2)));
                }
                if requested == 0.0 {
                    body.push(format!("L {}", fmt_point(p1)));
                }
                body.push(format!("L {}", fmt_point(p2)));
            }
        }
    }

    let mut parts = Vec::with_capacity(body.len() + 2);
    parts.extend(head);
    parts.extend(body);
    parts.push("Z".to_owned());
    parts.join(" ")
}

/// Parses a polygon path, rounds its corners and re-emits it.
///
/// Returns the input unchanged when every radius is zero.
pub fn round_path_corners(path: &str, radii: &[f64], style: CornerStyle) -> Result<String, EngineError> {
    if path.is_empty() || radii.iter().all(|&r| r == 0.0) {
        return Ok(path.to_owned());
    }
    let points = parse_path(path)?
        .iter()
        .filter(|c| !c.command.eq_ignore_ascii_case(&'z'))
        .map(PathCommand::vertex)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(round_corners(&points, radii, style))
}

/// Tangent points and Bézier controls replacing one vertex.
struct Corner {
    start: DVec2,
    start_control: DVec2,
    end_control: DVec2,
    end: DVec2,
}

impl Corner {
    /// `None` for a degenerate vertex (zero-length edge or no usable turn).
    fn new(p1: DVec2, p2: DVec2, p3: DVec2, requested: f64, style: CornerStyle) -> Option<Self> {
        let v1 = p1 - p2;
        let v2 = p3 - p2;
        let angle = v1.perp_dot(v2).atan2(v1.dot(v2)).abs();
        let r = requested.min(v1.length() / 2.0).min(v2.length() / 2.0);
        if r <= 0.0 || !r.is_finite() {
            return None;
        }

        let half = angle / 2.0;
        let half_chord = half.cos() * r;
        let offset = half.sin() * half_chord;
        let control_distance = half.cos() * half_chord;
        let bezier_radius = offset / (control_distance / r);
        let segments = (TAU / (PI - angle)).ceil();
        // tan(π / (2 · (2π / θ)))
        let arc_term = || (PI / (2.0 * (TAU / angle))).tan();

        let control_length = match style {
            CornerStyle::Circle => 4.0 / 3.0 * (PI / (2.0 * segments)).tan() * bezier_radius,
            CornerStyle::Approx => {
                let shape = if angle < FRAC_PI_2 {
                    1.0 + angle.cos()
                } else {
                    2.0 - angle.sin()
                };
                4.0 / 3.0 * arc_term() * r * shape
            }
            CornerStyle::Hand => 4.0 / 3.0 * arc_term() * r * (2.0 + angle.sin()),
        };
        if !control_length.is_finite() {
            return None;
        }

        let control_offset = r - control_length;
        let u1 = v1.normalize_or_zero();
        let u2 = v2.normalize_or_zero();
        let round = |p: DVec2| DVec2::new(round_to(p.x, 3), round_to(p.y, 3));

        Some(Self {
            start: round(p2 + u1 * r),
            start_control: round(p2 + u1 * control_offset),
            end_control: round(p2 + u2 * control_offset),
            end: round(p2 + u2 * r),
        })
    }
}
