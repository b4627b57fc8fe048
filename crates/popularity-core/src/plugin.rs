// File: crates/popularity-core/src/plugin.rs
// Summary: Post-draw plugin hook and the release-lines annotation overlay.
// Notes:
// - Marker placement is pure (labels + scale -> markers); only `ReleaseLines::after_datasets_draw`
//   touches the canvas.

use chrono::NaiveDate;
use skia_safe as skia;

use crate::events::ReleaseEvent;
use crate::geometry::RectI32;
use crate::period::Period;
use crate::scale::{CategoryScale, ValueScale};
use crate::text::TextShaper;

/// Geometry of the frame being drawn, handed to plugins after datasets are painted.
pub struct DrawContext<'a> {
    pub labels: &'a [String],
    pub area: RectI32,
    pub x: CategoryScale,
    pub y: ValueScale,
    /// Present when captions are enabled for this frame.
    pub text: Option<&'a TextShaper>,
}

/// Plugins draw on top of the chart once per frame. They must not alter chart data.
pub trait Plugin {
    fn id(&self) -> &'static str;
    fn after_datasets_draw(&self, canvas: &skia::Canvas, ctx: &DrawContext<'_>);
}

/// One vertical annotation ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
    pub label: String,
    pub color: skia::Color,
}

/// Month of a category label; accepts `YYYY-MM` and `YYYY-MM-DD`.
pub fn label_period(label: &str) -> Option<Period> {
    let s = label.trim();
    s.parse::<Period>()
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Period::from_date))
}

/// Category index an event is drawn at.
///
/// An exact `YYYY-MM` label match wins. Otherwise the label with the smallest
/// month distance to the event is chosen; on a tie the first one encountered
/// (lowest index) wins. Returns `None` when no label parses as a date.
pub fn resolve_event_index(labels: &[String], event: &ReleaseEvent) -> Option<usize> {
    let tick = event.tick();
    if let Some(i) = labels.iter().position(|l| *l == tick) {
        return Some(i);
    }
    let target = event.period().ordinal();
    let mut best: Option<(usize, i64)> = None;
    for (i, label) in labels.iter().enumerate() {
        let Some(p) = label_period(label) else { continue };
        let dist = (p.ordinal() - target).abs();
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

/// Pixel markers for every event that resolves against `labels`.
pub fn compute_markers(
    labels: &[String],
    scale: &CategoryScale,
    area: RectI32,
    events: &[ReleaseEvent],
) -> Vec<Marker> {
    events
        .iter()
        .filter_map(|e| match resolve_event_index(labels, e) {
            Some(i) => Some(Marker {
                x: scale.pixel_for_index(i),
                top: area.top as f32,
                bottom: area.bottom as f32,
                label: e.label.clone(),
                color: e.color,
            }),
            None => {
                log::debug!("no date-like label to place '{}'", e.label);
                None
            }
        })
        .collect()
}

/// Vertical line + caption at each release date.
pub struct ReleaseLines {
    pub events: Vec<ReleaseEvent>,
    pub font_size: f32,
}

impl ReleaseLines {
    pub fn new(events: Vec<ReleaseEvent>) -> Self {
        Self { events, font_size: 12.0 }
    }
}

impl Plugin for ReleaseLines {
    fn id(&self) -> &'static str { "releaseLines" }

    fn after_datasets_draw(&self, canvas: &skia::Canvas, ctx: &DrawContext<'_>) {
        let markers = compute_markers(ctx.labels, &ctx.x, ctx.area, &self.events);

        canvas.save();
        for m in &markers {
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_color(m.color);
            paint.set_style(skia::paint::Style::Stroke);
            paint.set_stroke_width(1.0);
            canvas.draw_line((m.x, m.top), (m.x, m.bottom), &paint);

            if let Some(text) = ctx.text {
                text.draw_left(canvas, &m.label, m.x + 4.0, m.top + 12.0, self.font_size, m.color);
            }
        }
        canvas.restore();
    }
}
