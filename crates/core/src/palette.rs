//! Tones and gradients derived from a background/foreground pair.
//!
//! A [`Palette`] is computed once per generation and passed by value into the
//! grid builder and shape factory, so concurrent generations never share
//! color state.

use crate::color::blend;
use serde::{Deserialize, Serialize};

/// One of the four tonal blends between background and foreground.
///
/// Named by the share of foreground in the blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// 90% foreground. Node fill.
    Fg90,
    /// 80% foreground. Square cells and gradients.
    Fg80,
    /// 70% foreground. Doubles.
    Fg70,
    /// 30% foreground. Quarter-circle cells.
    Fg30,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Fg90, Tone::Fg80, Tone::Fg70, Tone::Fg30];

    /// Blend ratio toward the foreground.
    pub fn ratio(self) -> f64 {
        match self {
            Tone::Fg90 => 0.9,
            Tone::Fg80 => 0.8,
            Tone::Fg70 => 0.7,
            Tone::Fg30 => 0.3,
        }
    }
}

/// Corner-to-corner direction of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl GradientDirection {
    /// Declaration order of the gradient list.
    pub const ALL: [GradientDirection; 4] = [
        GradientDirection::TopLeft,
        GradientDirection::TopRight,
        GradientDirection::BottomRight,
        GradientDirection::BottomLeft,
    ];

    /// Order in which fills pick a gradient. Kept separate from [`ALL`](Self::ALL)
    /// because draw results index into this list.
    pub const PICK_ORDER: [GradientDirection; 4] = [
        GradientDirection::TopLeft,
        GradientDirection::BottomLeft,
        GradientDirection::TopRight,
        GradientDirection::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GradientDirection::TopLeft => "top-left",
            GradientDirection::TopRight => "top-right",
            GradientDirection::BottomRight => "bottom-right",
            GradientDirection::BottomLeft => "bottom-left",
        }
    }

    /// Fill reference, e.g. `url(#gradient-top-left)`.
    pub fn url(self) -> String {
        format!("url(#gradient-{})", self.name())
    }

    /// Parses a fill reference produced by [`url`](Self::url).
    pub fn from_url(url: &str) -> Option<Self> {
        let name = url.strip_prefix("url(#gradient-")?.strip_suffix(')')?;
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// Unit-square start and end points `(x1, y1, x2, y2)`.
    pub fn endpoints(self) -> (f64, f64, f64, f64) {
        match self {
            GradientDirection::TopLeft => (0.0, 0.0, 1.0, 1.0),
            GradientDirection::TopRight => (1.0, 0.0, 0.0, 1.0),
            GradientDirection::BottomRight => (1.0, 1.0, 0.0, 0.0),
            GradientDirection::BottomLeft => (0.0, 1.0, 1.0, 0.0),
        }
    }

    /// Pixel endpoints of this gradient across a bounding box.
    pub fn span(self, x: f64, y: f64, width: f64, height: f64) -> [f64; 4] {
        let (x1, y1, x2, y2) = self.endpoints();
        [x + x1 * width, y + y1 * height, x + x2 * width, y + y2 * height]
    }
}

/// One color stop of a gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: String,
    pub opacity: f64,
}

/// A named two-stop linear gradient in unit-square coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub name: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Full opacity at the start, 20% at the end, both in `color`.
    pub fn fading(direction: GradientDirection, color: &str) -> Self {
        let (x1, y1, x2, y2) = direction.endpoints();
        Self {
            name: direction.name().to_owned(),
            x1,
            y1,
            x2,
            y2,
            stops: vec![
                GradientStop {
                    position: 0.0,
                    color: color.to_owned(),
                    opacity: 1.0,
                },
                GradientStop {
                    position: 1.0,
                    color: color.to_owned(),
                    opacity: 0.2,
                },
            ],
        }
    }
}

/// How a primitive is filled: a tone or a gradient reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Tone(Tone),
    Gradient(GradientDirection),
}

/// The four tones plus gradient descriptors for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    fg90: String,
    fg80: String,
    fg70: String,
    fg30: String,
    gradients: Vec<Gradient>,
}

impl Palette {
    /// Derives tones by linear blending and builds the four gradients from
    /// the 80% tone.
    pub fn derive(background: &str, foreground: &str) -> Self {
        let [fg90, fg80, fg70, fg30] = Tone::ALL.map(|t| blend(background, foreground, t.ratio()));
        let gradients = GradientDirection::ALL
            .iter()
            .map(|&d| Gradient::fading(d, &fg80))
            .collect();
        Self {
            fg90,
            fg80,
            fg70,
            fg30,
            gradients,
        }
    }

    /// Hex string of a tone.
    pub fn tone(&self, tone: Tone) -> &str {
        match tone {
            Tone::Fg90 => &self.fg90,
            Tone::Fg80 => &self.fg80,
            Tone::Fg70 => &self.fg70,
            Tone::Fg30 => &self.fg30,
        }
    }

    /// The tone used by every gradient.
    pub fn gradient_color(&self) -> &str {
        &self.fg80
    }

    pub fn gradients(&self) -> &[Gradient] {
        &self.gradients
    }

    /// Attribute value for a fill: a hex tone or a `url(#gradient-…)` reference.
    pub fn resolve(&self, fill: Fill) -> String {
        match fill {
            Fill::Tone(tone) => self.tone(tone).to_owned(),
            Fill::Gradient(direction) => direction.url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_black_on_white_tones() {
        let p = Palette::derive("#ffffff", "#000000");
        assert_eq!(p.tone(Tone::Fg90), "#191919");
        assert_eq!(p.tone(Tone::Fg80), "#333333");
        assert_eq!(p.tone(Tone::Fg70), "#4d4d4d");
        assert_eq!(p.tone(Tone::Fg30), "#b3b3b3");
    }

    #[test]
    fn gradients_use_80_percent_tone() {
        let p = Palette::derive("#ff0000", "#0000ff");
        assert_eq!(p.gradients().len(), 4);
        for g in p.gradients() {
            assert_eq!(g.stops.len(), 2);
            assert_eq!(g.stops[0].color, p.gradient_color());
            assert_eq!(g.stops[0].opacity, 1.0);
            assert_eq!(g.stops[1].opacity, 0.2);
        }
        assert_eq!(p.gradient_color(), p.tone(Tone::Fg80));
    }

    #[test]
    fn gradient_order_and_directions() {
        let p = Palette::derive("#ffffff", "#000000");
        let names: Vec<&str> = p.gradients().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["top-left", "top-right", "bottom-right", "bottom-left"]);
        let tr = &p.gradients()[1];
        assert_eq!((tr.x1, tr.y1, tr.x2, tr.y2), (1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn url_round_trip() {
        for d in GradientDirection::ALL {
            assert_eq!(GradientDirection::from_url(&d.url()), Some(d));
        }
        assert_eq!(GradientDirection::from_url("#ffffff"), None);
        assert_eq!(GradientDirection::from_url("url(#gradient-middle)"), None);
    }

    #[test]
    fn resolve_fill_values() {
        let p = Palette::derive("#ffffff", "#000000");
        assert_eq!(p.resolve(Fill::Tone(Tone::Fg70)), "#4d4d4d");
        assert_eq!(
            p.resolve(Fill::Gradient(GradientDirection::BottomLeft)),
            "url(#gradient-bottom-left)"
        );
    }

    #[test]
    fn span_maps_unit_endpoints_to_box() {
        let span = GradientDirection::BottomLeft.span(10.0, 20.0, 100.0, 50.0);
        assert_eq!(span, [10.0, 70.0, 110.0, 20.0]);
    }

    #[test]
    fn palette_is_stable_for_same_inputs() {
        assert_eq!(
            Palette::derive("hsl(200, 50%, 40%)", "#fafafa"),
            Palette::derive("hsl(200, 50%, 40%)", "#fafafa")
        );
    }
}
