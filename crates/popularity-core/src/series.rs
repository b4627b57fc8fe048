// File: crates/popularity-core/src/series.rs
// Summary: Named popularity dataset (one sample per category) with its line style.

use skia_safe as skia;

pub const SEARCH_COLOR: skia::Color = skia::Color::new(0xFF_63_66_F1);
pub const SOCIAL_COLOR: skia::Color = skia::Color::new(0xFF_EF_44_44);

/// Stable identity of the two datasets the controls toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetId {
    SearchInterest,
    SocialMentions,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub stroke: skia::Color,
    pub fill: skia::Color,
    pub width: f32,
    /// Curve smoothing in [0, 1); 0 draws straight segments.
    pub tension: f32,
}

impl LineStyle {
    /// Stroke at full alpha, fill at `fill_alpha` of the same hue.
    pub fn solid(stroke: skia::Color, fill_alpha: u8) -> Self {
        Self { stroke, fill: stroke.with_a(fill_alpha), width: 2.0, tension: 0.25 }
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub id: DatasetId,
    pub label: String,
    pub data: Vec<f64>,
    pub style: LineStyle,
    pub visible: bool,
}

impl Dataset {
    pub fn new(id: DatasetId, label: impl Into<String>, data: Vec<f64>, style: LineStyle) -> Self {
        Self { id, label: label.into(), data, style, visible: true }
    }

    pub fn search_interest(data: Vec<f64>) -> Self {
        // rgba(99,102,241,0.15)
        Self::new(DatasetId::SearchInterest, "Search interest", data, LineStyle::solid(SEARCH_COLOR, 38))
    }

    pub fn social_mentions(data: Vec<f64>) -> Self {
        // rgba(239,68,68,0.12)
        Self::new(DatasetId::SocialMentions, "Social mentions", data, LineStyle::solid(SOCIAL_COLOR, 31))
    }

    /// `(index, value)` points for drawing.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.data.iter().copied().enumerate()
    }
}
