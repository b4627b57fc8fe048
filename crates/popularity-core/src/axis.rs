// File: crates/popularity-core/src/axis.rs
// Summary: Value axis model with title, fixed range and tick count.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    /// Number of gridlines including both ends.
    pub ticks: usize,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, ticks: 6 }
    }

    /// 0..100 normalized popularity, gridline every 10.
    pub fn popularity() -> Self {
        let mut a = Self::new("Normalized popularity (0\u{2013}100)", 0.0, 100.0);
        a.ticks = 11;
        a
    }
}
