// File: crates/popularity-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::types::Insets;

/// Plot area in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    /// Surface of `width` x `height` shrunk by `insets`; never inverted.
    pub fn inset(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left as i32;
        let top = insets.top as i32;
        let right = (width - insets.right as i32).max(left);
        let bottom = (height - insets.bottom as i32).max(top);
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
