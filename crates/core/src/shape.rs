//! Shape emission: turns a placed [`Tile`] into a rect, circle or path.
//!
//! Shapes are plain value objects with a flat attribute map keyed by stable
//! strings. Every emitted tile shape also records its originating box and
//! grid position under the `data-*` keys.

use crate::geometry::{fmt_num, rotate_point, round_corners, CornerStyle};
use crate::palette::{Fill, Palette, Tone};
use crate::primitive::{Rotation, ShapeKind, Tile};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_PI_4;

pub const DATA_X: &str = "data-x";
pub const DATA_Y: &str = "data-y";
pub const DATA_WIDTH: &str = "data-width";
pub const DATA_HEIGHT: &str = "data-height";
pub const DATA_COLUMN: &str = "data-column";
pub const DATA_ROW: &str = "data-row";

/// Output element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rect,
    Circle,
    Path,
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<usize> for AttrValue {
    fn from(n: usize) -> Self {
        AttrValue::Number(n as f64)
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_owned())
    }
}

/// A renderable shape: element type plus attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeType,
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Shape {
    pub fn new(kind: ShapeType) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.to_owned(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.attr(key).and_then(AttrValue::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(AttrValue::as_str)
    }

    pub fn fill(&self) -> Option<&str> {
        self.text("fill")
    }

    /// Originating box `(position, size)` from the `data-*` attributes.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        Some((
            DVec2::new(self.number(DATA_X)?, self.number(DATA_Y)?),
            DVec2::new(self.number(DATA_WIDTH)?, self.number(DATA_HEIGHT)?),
        ))
    }

    /// Plain full-canvas rectangle.
    pub fn background(width: f64, height: f64, fill: &str) -> Self {
        Shape::new(ShapeType::Rect)
            .with("x", 0.0)
            .with("y", 0.0)
            .with("width", width)
            .with("height", height)
            .with("fill", fill)
    }
}

/// Corner and circle rounding, each a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    /// Square corner radius, percent of cell width.
    pub square: f64,
    /// Cross and diagonal corner radius, percent of half the node width.
    pub cross: f64,
    /// Quarter/half circle edge rounding, percent of width (half of it for half circles).
    pub circle: f64,
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self {
            square: 12.0,
            cross: 6.0,
            circle: 4.0,
        }
    }
}

/// Builds shapes for tiles using one generation's palette and radii.
#[derive(Debug, Clone)]
pub struct ShapeFactory<'a> {
    palette: &'a Palette,
    radii: CornerRadii,
    gap: f64,
    style: CornerStyle,
}

impl<'a> ShapeFactory<'a> {
    pub fn new(palette: &'a Palette, radii: CornerRadii, gap: f64) -> Self {
        Self {
            palette,
            radii,
            gap,
            style: CornerStyle::default(),
        }
    }

    pub fn with_style(mut self, style: CornerStyle) -> Self {
        self.style = style;
        self
    }

    /// Emits the shape for one tile.
    pub fn create(&self, tile: &Tile) -> Shape {
        let (kind, fill) = match tile.kind {
            ShapeKind::Square => (ShapeType::Rect, tile.fill),
            ShapeKind::FullCircle => (ShapeType::Circle, tile.fill),
            // Crosses always use the darkest tone.
            ShapeKind::Cross => (ShapeType::Path, Fill::Tone(Tone::Fg90)),
            _ => (ShapeType::Path, tile.fill),
        };

        let base = Shape::new(kind)
            .with(DATA_X, tile.position.x)
            .with(DATA_Y, tile.position.y)
            .with(DATA_WIDTH, tile.size.x)
            .with(DATA_HEIGHT, tile.size.y)
            .with(DATA_COLUMN, tile.column)
            .with(DATA_ROW, tile.row)
            .with("fill", self.palette.resolve(fill));

        let DVec2 { x, y } = tile.position;
        let DVec2 { x: w, y: h } = tile.size;
        match tile.kind {
            ShapeKind::Square => base
                .with("x", x)
                .with("y", y)
                .with("width", w)
                .with("height", h)
                .with("rx", self.radii.square / 100.0 * w),
            ShapeKind::FullCircle => base
                .with("cx", x + w * 0.5)
                .with("cy", y + h * 0.5)
                .with("r", w.min(h) * 0.5),
            ShapeKind::QuarterCircle => base.with("d", self.quarter_circle(tile)),
            ShapeKind::HalfCircle => base.with("d", self.half_circle(tile)),
            ShapeKind::Cross => base.with("d", self.cross(tile)),
            ShapeKind::Diagonal => base.with("d", self.diagonal(tile)),
        }
    }

    /// Quarter disc whose center sits in one corner of the box: bottom-left at
    /// rotation 0, then bottom-right, top-right, top-left. The three outer
    /// corners are rounded by small arcs of radius `r`.
    fn quarter_circle(&self, tile: &Tile) -> String {
        let DVec2 { x: w, y: h } = tile.size;
        let size = w.min(h);
        let r = (self.radii.circle / 100.0 * w).clamp(0.0, size * 0.5);
        let inner = size - r;
        let hyp = (inner * inner - r * r).sqrt();
        let angle = (r / hyp).atan();
        let cos = angle.sin() * size;
        let sin = angle.cos() * size;

        let center = DVec2::splat(size * 0.5);
        let p: Vec<DVec2> = [
            (r, h),
            (hyp, h),
            (sin, h - cos),
            (cos, h - sin),
            (0.0, h - hyp),
            (0.0, h - r),
            (r, h),
        ]
        .into_iter()
        .map(|(px, py)| rotate_point(DVec2::new(px, py), center, tile.rotation.radians()) + tile.position)
        .collect();

        let (rs, ss) = (fmt_num(r), fmt_num(size));
        format!(
            "M {} L {} A {rs} {rs} 0 0 0 {} A {ss} {ss} 0 0 0 {} A {rs} {rs} 0 0 0 {} L {} A {rs} {rs} 0 0 0 {}",
            pt(p[0]),
            pt(p[1]),
            pt(p[2]),
            pt(p[3]),
            pt(p[4]),
            pt(p[5]),
            pt(p[6]),
        )
    }

    /// Half disc on the long side of the box. Rotation 0 puts the flat edge
    /// at the bottom (wide boxes) or right (tall boxes); rotation π flips it.
    fn half_circle(&self, tile: &Tile) -> String {
        let DVec2 { x: w, y: h } = tile.size;
        let max = w.max(h);
        let min = w.min(h);
        let radius_x = w * if w > h { 0.5 } else { 1.0 };
        let radius_y = h * if w < h { 0.5 } else { 1.0 };
        let main = if w > h { radius_x } else { radius_y };
        let r = (self.radii.circle * 0.5 / 100.0 * max).clamp(0.0, main * 0.5);
        let inner = main - r;
        let hyp = (inner * inner - r * r).sqrt();
        let angle = (r / hyp).atan();
        let cos = angle.sin() * main;
        let sin = angle.cos() * main;
        let mid = max * 0.5;

        let raw = if w > h {
            [
                (mid - hyp, min),
                (mid + hyp, min),
                (mid + sin, min - cos),
                (mid - sin, min - cos),
                (mid - hyp, min),
            ]
        } else {
            [
                (min, mid + hyp),
                (min, mid - hyp),
                (min - cos, mid - sin),
                (min - cos, mid + sin),
                (min, mid + hyp),
            ]
        };
        let center = tile.size * 0.5;
        let p: Vec<DVec2> = raw
            .into_iter()
            .map(|(px, py)| rotate_point(DVec2::new(px, py), center, tile.rotation.radians()) + tile.position)
            .collect();

        let rs = fmt_num(r);
        format!(
            "M {} L {} A {rs} {rs} 0 0 0 {} A {} {} 0 0 0 {} A {rs} {rs} 0 0 0 {} Z",
            pt(p[0]),
            pt(p[1]),
            pt(p[2]),
            fmt_num(radius_x),
            fmt_num(radius_y),
            pt(p[3]),
            pt(p[4]),
        )
    }

    fn cross(&self, tile: &Tile) -> String {
        let DVec2 { x: w, y: h } = tile.size;
        let b = Band::new(tile.size, self.gap);
        let inner_w = (w - b.diagonal) * 0.5;
        let inner_h = (h - b.diagonal) * 0.5;
        let c = b.complement;

        let points = offset_points(
            tile.position,
            &[
                (0.0, 0.0),
                (c, 0.0),
                (w * 0.5, inner_h),
                (w - c, 0.0),
                (w, 0.0),
                (w, c),
                (w - inner_w, h * 0.5),
                (w, h - c),
                (w, h),
                (w - c, h),
                (w * 0.5, h - inner_h),
                (c, h),
                (0.0, h),
                (0.0, w - c),
                (inner_w, h * 0.5),
                (0.0, c),
            ],
        );

        let corner = self.radii.cross / 100.0 * w * 0.5;
        let small = corner * 0.5;
        let radii: Vec<f64> = [small, 0.0, small, corner]
            .iter()
            .copied()
            .cycle()
            .take(16)
            .collect();
        round_corners(&points, &radii, self.style)
    }

    /// Band between two opposite corners: top-left to bottom-right at
    /// rotation 0, top-right to bottom-left otherwise.
    fn diagonal(&self, tile: &Tile) -> String {
        let DVec2 { x: w, y: h } = tile.size;
        let b = Band::new(tile.size, self.gap);
        let (c, o) = (b.complement, b.offset);

        let raw = if tile.rotation == Rotation::Zero {
            [(0.0, 0.0), (c, 0.0), (w, h - c), (w, h), (w - c, h), (0.0, o)]
        } else {
            [(w, 0.0), (w, o), (c, h), (0.0, h), (0.0, h - o), (w - c, 0.0)]
        };
        let points = offset_points(tile.position, &raw);

        let corner = self.radii.cross / 100.0 * w * 0.5;
        let small = corner * 0.5;
        round_corners(&points, &[small, small, corner, small, small, corner], self.style)
    }
}

/// Shared construction lengths of crosses and diagonals.
struct Band {
    diagonal: f64,
    offset: f64,
    complement: f64,
}

impl Band {
    fn new(size: DVec2, gap: f64) -> Self {
        let cell = (size.x - gap) / 2.0;
        let diagonal = (cell * cell * 2.0).sqrt();
        let offset = size.y * 0.5 + FRAC_PI_4.tan() * (size.x * 0.5 - diagonal * 0.5);
        Self {
            diagonal,
            offset,
            complement: size.x - offset,
        }
    }
}

fn offset_points(origin: DVec2, raw: &[(f64, f64)]) -> Vec<DVec2> {
    raw.iter().map(|&(x, y)| origin + DVec2::new(x, y)).collect()
}

fn pt(p: DVec2) -> String {
    format!("{} {}", fmt_num(p.x), fmt_num(p.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::parse_path;
    use crate::palette::GradientDirection;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn palette() -> Palette {
        Palette::derive("#ffffff", "#000000")
    }

    fn tile(kind: ShapeKind, rotation: Rotation, size: DVec2) -> Tile {
        Tile {
            column: 2,
            row: 3,
            position: DVec2::new(100.0, 200.0),
            size,
            kind,
            rotation,
            fill: Fill::Tone(Tone::Fg80),
        }
    }

    fn cell(kind: ShapeKind, rotation: Rotation) -> Tile {
        tile(kind, rotation, DVec2::splat(90.0))
    }

    /// End points of every command, in order.
    fn end_points(d: &str) -> Vec<DVec2> {
        parse_path(d)
            .unwrap()
            .iter()
            .filter(|c| c.args.len() >= 2)
            .map(|c| {
                let n = c.args.len();
                DVec2::new(c.args[n - 2], c.args[n - 1])
            })
            .collect()
    }

    // -- Rect and circle --

    #[test]
    fn square_becomes_rounded_rect() {
        let p = palette();
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0).create(&cell(ShapeKind::Square, Rotation::Zero));
        assert_eq!(shape.kind, ShapeType::Rect);
        assert_eq!(shape.number("x"), Some(100.0));
        assert_eq!(shape.number("y"), Some(200.0));
        assert_eq!(shape.number("width"), Some(90.0));
        assert!(approx_eq(shape.number("rx").unwrap(), 10.8));
        assert_eq!(shape.fill(), Some("#333333"));
    }

    #[test]
    fn full_circle_is_centered() {
        let p = palette();
        let t = tile(ShapeKind::FullCircle, Rotation::Zero, DVec2::new(190.0, 180.0));
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0).create(&t);
        assert_eq!(shape.kind, ShapeType::Circle);
        assert_eq!(shape.number("cx"), Some(195.0));
        assert_eq!(shape.number("cy"), Some(290.0));
        assert_eq!(shape.number("r"), Some(90.0));
    }

    // -- Attributes --

    #[test]
    fn provenance_attributes_recorded() {
        let p = palette();
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0)
            .create(&cell(ShapeKind::QuarterCircle, Rotation::Half));
        assert_eq!(shape.bounds(), Some((DVec2::new(100.0, 200.0), DVec2::splat(90.0))));
        assert_eq!(shape.number(DATA_COLUMN), Some(2.0));
        assert_eq!(shape.number(DATA_ROW), Some(3.0));
    }

    #[test]
    fn gradient_fill_resolves_to_reference() {
        let p = palette();
        let mut t = cell(ShapeKind::Square, Rotation::Zero);
        t.fill = Fill::Gradient(GradientDirection::TopRight);
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0).create(&t);
        assert_eq!(shape.fill(), Some("url(#gradient-top-right)"));
    }

    #[test]
    fn cross_always_uses_darkest_tone() {
        let p = palette();
        let mut t = tile(ShapeKind::Cross, Rotation::Zero, DVec2::splat(190.0));
        t.fill = Fill::Gradient(GradientDirection::TopLeft);
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0).create(&t);
        assert_eq!(shape.fill(), Some("#191919"));
    }

    #[test]
    fn background_rect_has_no_provenance() {
        let bg = Shape::background(1024.0, 768.0, "papayawhip");
        assert_eq!(bg.kind, ShapeType::Rect);
        assert_eq!(bg.fill(), Some("papayawhip"));
        assert_eq!(bg.number("height"), Some(768.0));
        assert!(bg.bounds().is_none());
    }

    #[test]
    fn shape_serializes_with_type_tag() {
        let json = serde_json::to_value(Shape::background(10.0, 10.0, "#fff")).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["attributes"]["width"], 10.0);
        assert_eq!(json["attributes"]["fill"], "#fff");
    }

    // -- Quarter circle --

    #[test]
    fn quarter_circle_center_corner_follows_rotation() {
        let p = palette();
        let factory = ShapeFactory::new(&p, CornerRadii::default(), 10.0);
        let origin = DVec2::new(100.0, 200.0);
        let cases = [
            (Rotation::Zero, DVec2::new(0.0, 90.0)),
            (Rotation::Quarter, DVec2::new(90.0, 90.0)),
            (Rotation::Half, DVec2::new(90.0, 0.0)),
            (Rotation::ThreeQuarter, DVec2::new(0.0, 0.0)),
        ];
        for (rotation, corner) in cases {
            let d = factory.create(&cell(ShapeKind::QuarterCircle, rotation));
            let d = d.text("d").unwrap();
            let pts = end_points(d);
            // M, L, A (small), A (big), A (small), L, A (small)
            assert_eq!(pts.len(), 7, "{d}");
            for big in [pts[2], pts[3]] {
                let dist = big.distance(origin + corner);
                assert!(approx_eq(dist, 90.0), "{rotation:?}: {big:?} is {dist} from corner");
            }
        }
    }

    #[test]
    fn quarter_circle_radius_clamped() {
        let p = palette();
        let radii = CornerRadii {
            circle: 100.0,
            ..CornerRadii::default()
        };
        let shape = ShapeFactory::new(&p, radii, 10.0).create(&cell(ShapeKind::QuarterCircle, Rotation::Zero));
        let d = shape.text("d").unwrap();
        assert!(!d.contains("NaN"), "{d}");
        assert!(d.contains("A 45 45 0 0 0"), "{d}");
    }

    #[test]
    fn quarter_circle_without_rounding_is_finite() {
        let p = palette();
        let radii = CornerRadii {
            circle: 0.0,
            ..CornerRadii::default()
        };
        let shape = ShapeFactory::new(&p, radii, 10.0).create(&cell(ShapeKind::QuarterCircle, Rotation::Quarter));
        assert!(!shape.text("d").unwrap().contains("NaN"));
    }

    // -- Half circle --

    #[test]
    fn wide_half_circle_flat_edge_bottom_then_top() {
        let p = palette();
        let factory = ShapeFactory::new(&p, CornerRadii::default(), 10.0);
        let size = DVec2::new(190.0, 90.0);

        let up = factory.create(&tile(ShapeKind::HalfCircle, Rotation::Zero, size));
        let pts = end_points(up.text("d").unwrap());
        assert!(approx_eq(pts[0].y, 290.0) && approx_eq(pts[1].y, 290.0), "{pts:?}");

        let down = factory.create(&tile(ShapeKind::HalfCircle, Rotation::Half, size));
        let pts = end_points(down.text("d").unwrap());
        assert!(approx_eq(pts[0].y, 200.0) && approx_eq(pts[1].y, 200.0), "{pts:?}");
    }

    #[test]
    fn tall_half_circle_flat_edge_right_then_left() {
        let p = palette();
        let factory = ShapeFactory::new(&p, CornerRadii::default(), 10.0);
        let size = DVec2::new(90.0, 190.0);

        let left = factory.create(&tile(ShapeKind::HalfCircle, Rotation::Zero, size));
        let pts = end_points(left.text("d").unwrap());
        assert!(approx_eq(pts[0].x, 190.0) && approx_eq(pts[1].x, 190.0), "{pts:?}");

        let right = factory.create(&tile(ShapeKind::HalfCircle, Rotation::Half, size));
        let pts = end_points(right.text("d").unwrap());
        assert!(approx_eq(pts[0].x, 100.0) && approx_eq(pts[1].x, 100.0), "{pts:?}");
    }

    #[test]
    fn half_circle_uses_elliptical_radii() {
        let p = palette();
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0)
            .create(&tile(ShapeKind::HalfCircle, Rotation::Zero, DVec2::new(190.0, 90.0)));
        let d = shape.text("d").unwrap();
        assert!(d.contains("A 95 90 0 0 0"), "{d}");
        assert!(d.ends_with(" Z"));
    }

    // -- Cross and diagonal --

    #[test]
    fn sharp_cross_has_sixteen_vertices() {
        let p = palette();
        let radii = CornerRadii {
            cross: 0.0,
            ..CornerRadii::default()
        };
        let shape = ShapeFactory::new(&p, radii, 10.0).create(&tile(ShapeKind::Cross, Rotation::Zero, DVec2::splat(190.0)));
        let d = shape.text("d").unwrap();
        assert!(d.starts_with("M 100 200 L "), "{d}");
        assert_eq!(end_points(d).len(), 16);
    }

    #[test]
    fn rounded_cross_curves_only_where_radius_set() {
        let p = palette();
        let shape = ShapeFactory::new(&p, CornerRadii::default(), 10.0)
            .create(&tile(ShapeKind::Cross, Rotation::Zero, DVec2::splat(190.0)));
        let d = shape.text("d").unwrap();
        // Radii repeat [small, 0, small, medium]: 12 rounded vertices.
        assert_eq!(d.matches('C').count(), 12, "{d}");
    }

    #[test]
    fn diagonal_band_runs_between_opposite_corners() {
        let p = palette();
        let radii = CornerRadii {
            cross: 0.0,
            ..CornerRadii::default()
        };
        let factory = ShapeFactory::new(&p, radii, 10.0);
        let size = DVec2::splat(190.0);

        let main = factory.create(&tile(ShapeKind::Diagonal, Rotation::Zero, size));
        let pts = end_points(main.text("d").unwrap());
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], DVec2::new(100.0, 200.0));
        assert_eq!(pts[3], DVec2::new(290.0, 390.0));

        let anti = factory.create(&tile(ShapeKind::Diagonal, Rotation::Quarter, size));
        let pts = end_points(anti.text("d").unwrap());
        assert_eq!(pts[0], DVec2::new(290.0, 200.0));
        assert_eq!(pts[3], DVec2::new(100.0, 390.0));
    }

    #[test]
    fn corner_style_changes_rounded_paths() {
        let p = palette();
        let t = tile(ShapeKind::Diagonal, Rotation::Zero, DVec2::splat(190.0));
        let circle = ShapeFactory::new(&p, CornerRadii::default(), 10.0).create(&t);
        let hand = ShapeFactory::new(&p, CornerRadii::default(), 10.0)
            .with_style(CornerStyle::Hand)
            .create(&t);
        assert_ne!(circle.text("d"), hand.text("d"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn kind() -> impl Strategy<Value = ShapeKind> {
            prop_oneof![
                Just(ShapeKind::Square),
                Just(ShapeKind::FullCircle),
                Just(ShapeKind::HalfCircle),
                Just(ShapeKind::QuarterCircle),
                Just(ShapeKind::Cross),
                Just(ShapeKind::Diagonal),
            ]
        }

        fn rotation() -> impl Strategy<Value = Rotation> {
            prop_oneof![
                Just(Rotation::Zero),
                Just(Rotation::Quarter),
                Just(Rotation::Half),
                Just(Rotation::ThreeQuarter),
            ]
        }

        proptest! {
            #[test]
            fn every_path_parses_and_is_finite(
                kind in kind(),
                rotation in rotation(),
                w in 20.0f64..400.0,
                h in 20.0f64..400.0,
                square in 0.0f64..100.0,
                cross in 0.0f64..100.0,
                circle in 0.0f64..100.0,
            ) {
                let p = palette();
                let radii = CornerRadii { square, cross, circle };
                let shape = ShapeFactory::new(&p, radii, 10.0).create(&tile(kind, rotation, DVec2::new(w, h)));
                if let Some(d) = shape.text("d") {
                    prop_assert!(!d.contains("NaN") && !d.contains("inf"), "{}", d);
                    prop_assert!(parse_path(d).is_ok(), "{}", d);
                }
                prop_assert!(shape.fill().is_some());
            }
        }
    }
}
