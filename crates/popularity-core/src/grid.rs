// File: crates/popularity-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Stride that keeps at most `max_ticks` of `count` category labels.
pub fn label_stride(count: usize, max_ticks: usize) -> usize {
    if max_ticks == 0 || count <= max_ticks { return 1; }
    count.div_ceil(max_ticks)
}
