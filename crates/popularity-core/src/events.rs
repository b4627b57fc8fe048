// File: crates/popularity-core/src/events.rs
// Summary: Fixed release events annotated on the timeline.

use chrono::NaiveDate;
use skia_safe as skia;

use crate::period::Period;

pub const S1_COLOR: skia::Color = skia::Color::new(0xFF_F5_9E_0B);
pub const S2_COLOR: skia::Color = skia::Color::new(0xFF_10_B9_81);

/// A named calendar date drawn as a vertical marker.
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseEvent {
    pub label: String,
    pub date: NaiveDate,
    pub color: skia::Color,
}

impl ReleaseEvent {
    pub fn new(label: impl Into<String>, date: NaiveDate, color: skia::Color) -> Self {
        Self { label: label.into(), date, color }
    }

    /// Month key used to match chart categories.
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }

    /// `YYYY-MM` form of [`Self::period`].
    pub fn tick(&self) -> String {
        self.period().to_string()
    }
}

/// The two season premieres (Nov 2021, Nov 2024).
pub fn arcane_releases() -> Vec<ReleaseEvent> {
    [
        ("S1 release", (2021, 11, 6), S1_COLOR),
        ("S2 release", (2024, 11, 9), S2_COLOR),
    ]
    .into_iter()
    .filter_map(|(label, (y, m, d), color)| {
        NaiveDate::from_ymd_opt(y, m, d).map(|date| ReleaseEvent::new(label, date, color))
    })
    .collect()
}
