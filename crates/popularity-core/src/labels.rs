// File: crates/popularity-core/src/labels.rs
// Summary: Monthly category label generation over a fixed date range.

use crate::period::Period;

/// First month of the default timeline (Jan 2021).
pub const DEFAULT_START: Period = Period::const_new(2021, 1);
/// Last month of the default timeline (Sep 2025).
pub const DEFAULT_END: Period = Period::const_new(2025, 9);

/// Inclusive month range stepping by exactly one month.
/// Returns an empty sequence when `start > end`.
pub fn month_range(start: Period, end: Period) -> Vec<Period> {
    if start > end {
        return Vec::new();
    }
    let len = (end.ordinal() - start.ordinal() + 1) as usize;
    let mut out = Vec::with_capacity(len);
    let mut p = start;
    while p <= end {
        out.push(p);
        p = p.succ();
    }
    out
}

/// Same as [`month_range`], formatted as `YYYY-MM` category labels.
pub fn month_labels(start: Period, end: Period) -> Vec<String> {
    month_range(start, end).iter().map(Period::to_string).collect()
}

/// Labels for the default 2021-01..=2025-09 timeline.
pub fn default_labels() -> Vec<String> {
    month_labels(DEFAULT_START, DEFAULT_END)
}
