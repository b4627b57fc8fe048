// File: crates/popularity-core/src/scale.rs
// Summary: Category (X) and Value (Y) scale transforms from data space to pixels.

/// Value Y coordinate (popularity score).
pub type Value = f64;

/// Horizontal category scale for a line chart: first category on the left edge,
/// last on the right edge, evenly spaced in between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryScale {
    pub left_px: f32,
    pub right_px: f32,
    pub count: usize,
}

impl CategoryScale {
    pub fn new(left_px: f32, right_px: f32, count: usize) -> Self {
        Self { left_px, right_px: right_px.max(left_px), count }
    }

    /// Pixel spacing between neighbouring categories (0 when fewer than two).
    #[inline]
    pub fn spacing(&self) -> f32 {
        if self.count < 2 { 0.0 } else { (self.right_px - self.left_px) / (self.count - 1) as f32 }
    }

    /// A single category sits in the middle of the plot.
    #[inline]
    pub fn pixel_for_index(&self, index: usize) -> f32 {
        if self.count < 2 {
            return (self.left_px + self.right_px) * 0.5;
        }
        self.left_px + index as f32 * self.spacing()
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: Value, vmax: Value) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}
