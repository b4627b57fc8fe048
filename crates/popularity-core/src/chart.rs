// File: crates/popularity-core/src/chart.rs
// Summary: Owned chart state (labels, datasets, plugins) and headless rendering using Skia CPU raster surfaces.

use anyhow::Result;
use rand::Rng;
use skia_safe as skia;
use thiserror::Error;

use crate::events::arcane_releases;
use crate::geometry::RectI32;
use crate::grid::{label_stride, linspace};
use crate::labels::default_labels;
use crate::plugin::{DrawContext, Plugin, ReleaseLines};
use crate::scale::{CategoryScale, ValueScale};
use crate::series::{Dataset, DatasetId};
use crate::synth::synthesize;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::Axis;

pub const DEFAULT_TITLE: &str = "Arcane popularity over time";

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text (title, legend captions, ticks, annotation captions). Off for pixel-stable snapshots.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("dataset {0:?} has no replacement data")]
    MissingDataset(DatasetId),
    #[error("dataset {id:?} has {got} samples for {expected} labels")]
    LengthMismatch { id: DatasetId, expected: usize, got: usize },
}

/// Everything the host needs to draw one chart. Mutated only through its methods,
/// which keep every dataset the same length as `labels`.
pub struct ChartState {
    pub title: String,
    pub y_axis: Axis,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl ChartState {
    pub fn new(title: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            title: title.into(),
            y_axis: Axis::popularity(),
            labels,
            datasets: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Default chart: 2021-01..2025-09, both synthetic metrics, release lines.
    pub fn popularity<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let labels = default_labels();
        let events = arcane_releases();
        let synth = synthesize(&labels, &events, rng);
        let mut chart = Self::new(DEFAULT_TITLE, labels);
        chart.datasets.push(Dataset::search_interest(synth.search_interest));
        chart.datasets.push(Dataset::social_mentions(synth.social_mentions));
        chart.add_plugin(Box::new(ReleaseLines::new(events)));
        chart
    }

    pub fn labels(&self) -> &[String] { &self.labels }
    pub fn datasets(&self) -> &[Dataset] { &self.datasets }

    /// Append a dataset. Rejects data whose length differs from the labels.
    pub fn add_dataset(&mut self, dataset: Dataset) -> Result<(), ChartError> {
        if dataset.data.len() != self.labels.len() {
            return Err(ChartError::LengthMismatch {
                id: dataset.id,
                expected: self.labels.len(),
                got: dataset.data.len(),
            });
        }
        self.datasets.push(dataset);
        Ok(())
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn plugin_ids(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }

    pub fn dataset_index(&self, id: DatasetId) -> Option<usize> {
        self.datasets.iter().position(|d| d.id == id)
    }

    pub fn dataset(&self, id: DatasetId) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == id)
    }

    /// Returns false when `index` is out of range.
    pub fn set_dataset_visibility(&mut self, index: usize, visible: bool) -> bool {
        match self.datasets.get_mut(index) {
            Some(d) => {
                d.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn is_dataset_visible(&self, index: usize) -> bool {
        self.datasets.get(index).is_some_and(|d| d.visible)
    }

    pub fn rename_dataset(&mut self, id: DatasetId, label: impl Into<String>) {
        if let Some(d) = self.datasets.iter_mut().find(|d| d.id == id) {
            d.label = label.into();
        }
    }

    /// Swap labels and every dataset's samples at once. Nothing changes on error.
    pub fn replace_data(&mut self, labels: Vec<String>, mut data: Vec<(DatasetId, Vec<f64>)>) -> Result<(), ChartError> {
        for d in &self.datasets {
            let Some((_, values)) = data.iter().find(|(id, _)| *id == d.id) else {
                return Err(ChartError::MissingDataset(d.id));
            };
            if values.len() != labels.len() {
                return Err(ChartError::LengthMismatch { id: d.id, expected: labels.len(), got: values.len() });
            }
        }
        for d in &mut self.datasets {
            if let Some(pos) = data.iter().position(|(id, _)| *id == d.id) {
                d.data = data.swap_remove(pos).1;
            }
        }
        self.labels = labels;
        Ok(())
    }

    pub fn plot_area(&self, opts: &RenderOptions) -> RectI32 {
        RectI32::inset(opts.width, opts.height, &opts.insets)
    }

    pub fn category_scale(&self, area: RectI32) -> CategoryScale {
        CategoryScale::new(area.left as f32, area.right as f32, self.labels.len())
    }

    pub fn value_scale(&self, area: RectI32) -> ValueScale {
        ValueScale::new_linear(area.top as f32, area.bottom as f32, self.y_axis.min, self.y_axis.max)
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Returns `(pixels, width, height, row_stride)` in unpremultiplied RGBA8.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_surface(opts)?;
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read pixels failed");
        }
        Ok((pixels, opts.width as u32, opts.height as u32, stride))
    }

    fn render_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        if opts.width <= 0 || opts.height <= 0 {
            anyhow::bail!("invalid surface size {}x{}", opts.width, opts.height);
        }
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface)
    }

    /// Full frame: chrome, datasets, then each plugin's post-draw hook.
    pub fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let area = self.plot_area(opts);
        let x = self.category_scale(area);
        let y = self.value_scale(area);

        let shaper = opts.draw_labels.then(TextShaper::new);
        if let Some(text) = &shaper {
            text.draw_centered(canvas, &self.title, opts.width as f32 * 0.5, 24.0, 16.0, theme.title);
        }
        draw_legend(canvas, shaper.as_ref(), &self.datasets, opts.width, theme);
        draw_grid(canvas, area, &self.y_axis, &y, theme);
        draw_axes(canvas, area, theme);
        if let Some(text) = &shaper {
            draw_ticks(canvas, text, area, &self.labels, &x, &self.y_axis, &y, theme);
        }

        for d in self.datasets.iter().filter(|d| d.visible) {
            draw_line_dataset(canvas, area, &x, &y, d);
        }

        let ctx = DrawContext { labels: &self.labels, area, x, y, text: shaper.as_ref() };
        for p in &self.plugins {
            p.after_datasets_draw(canvas, &ctx);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_color(color);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p
}

const SWATCH_W: f32 = 28.0;
const SWATCH_H: f32 = 10.0;
const LEGEND_Y: f32 = 48.0;
const LEGEND_TEXT: f32 = 12.0;

fn draw_legend(canvas: &skia::Canvas, text: Option<&TextShaper>, datasets: &[Dataset], width: i32, theme: &Theme) {
    let entries: Vec<(f32, &Dataset)> = datasets
        .iter()
        .map(|d| {
            let text_w = text.map_or(0.0, |t| t.measure_width(&d.label, LEGEND_TEXT));
            (SWATCH_W + 6.0 + text_w, d)
        })
        .collect();
    let gap = 16.0;
    let total: f32 = entries.iter().map(|(w, _)| *w).sum::<f32>() + gap * entries.len().saturating_sub(1) as f32;
    let mut cursor = (width as f32 - total) * 0.5;

    for (w, d) in entries {
        let swatch = skia::Rect::from_xywh(cursor, LEGEND_Y - SWATCH_H, SWATCH_W, SWATCH_H);
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_color(d.style.fill);
        canvas.draw_rect(swatch, &fill);
        canvas.draw_rect(swatch, &stroke_paint(d.style.stroke, d.style.width));

        if let Some(text) = text {
            let color = if d.visible { theme.axis_label } else { theme.muted };
            let tx = cursor + SWATCH_W + 6.0;
            text.draw_left(canvas, &d.label, tx, LEGEND_Y, LEGEND_TEXT, color);
            if !d.visible {
                canvas.draw_line((tx, LEGEND_Y - 4.0), (cursor + w, LEGEND_Y - 4.0), &stroke_paint(color, 1.0));
            }
        }
        cursor += w + gap;
    }
}

fn draw_grid(canvas: &skia::Canvas, area: RectI32, axis: &Axis, y: &ValueScale, theme: &Theme) {
    let paint = stroke_paint(theme.grid, 1.0);

    // horizontals only; the category axis has no grid
    for v in linspace(axis.min, axis.max, axis.ticks) {
        let py = y.to_px(v);
        canvas.draw_line((area.left as f32, py), (area.right as f32, py), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, area: RectI32, theme: &Theme) {
    let axis_paint = stroke_paint(theme.axis_line, 1.0);
    let (l, t, r, b) = (area.left as f32, area.top as f32, area.right as f32, area.bottom as f32);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);
}

fn draw_ticks(
    canvas: &skia::Canvas,
    text: &TextShaper,
    area: RectI32,
    labels: &[String],
    x: &CategoryScale,
    axis: &Axis,
    y: &ValueScale,
    theme: &Theme,
) {
    const TICK: f32 = 11.0;

    // Y values, right-aligned against the axis
    for v in linspace(axis.min, axis.max, axis.ticks) {
        let label = format!("{v:.0}");
        let w = text.measure_width(&label, TICK);
        text.draw_left(canvas, &label, area.left as f32 - 6.0 - w, y.to_px(v) + 4.0, TICK, theme.tick);
    }

    // X categories, thinned to what fits
    let max_ticks = (area.width() / 64).max(1) as usize;
    let stride = label_stride(labels.len(), max_ticks);
    for (i, label) in labels.iter().enumerate().step_by(stride) {
        text.draw_centered(canvas, label, x.pixel_for_index(i), area.bottom as f32 + 18.0, TICK, theme.tick);
    }

    // Rotated Y title
    let w = text.measure_width(&axis.label, 12.0);
    let cy = (area.top + area.bottom) as f32 * 0.5;
    canvas.save();
    canvas.translate((area.left as f32 - 44.0, cy + w * 0.5));
    canvas.rotate(-90.0, None);
    text.draw_left(canvas, &axis.label, 0.0, 0.0, 12.0, theme.axis_label);
    canvas.restore();
}

/// Bezier control points for a tensioned polyline, kept inside the plot area vertically.
fn control_points(pts: &[(f32, f32)], i: usize, tension: f32, top: f32, bottom: f32) -> ((f32, f32), (f32, f32)) {
    let prev = pts[i.saturating_sub(1)];
    let cur = pts[i];
    let next = pts[i + 1];
    let after = pts[(i + 2).min(pts.len() - 1)];
    let k = tension * 0.5;
    let c1 = (cur.0 + (next.0 - prev.0) * k, (cur.1 + (next.1 - prev.1) * k).clamp(top, bottom));
    let c2 = (next.0 - (after.0 - cur.0) * k, (next.1 - (after.1 - cur.1) * k).clamp(top, bottom));
    (c1, c2)
}

fn draw_line_dataset(
    canvas: &skia::Canvas,
    area: RectI32,
    x: &CategoryScale,
    y: &ValueScale,
    dataset: &Dataset,
) {
    let pts: Vec<(f32, f32)> = dataset.points().map(|(i, v)| (x.pixel_for_index(i), y.to_px(v))).collect();
    if pts.len() < 2 {
        return;
    }

    let mut path = skia::Path::new();
    path.move_to(pts[0]);
    let tension = dataset.style.tension;
    for i in 0..pts.len() - 1 {
        if tension > 0.0 {
            let (c1, c2) = control_points(&pts, i, tension, area.top as f32, area.bottom as f32);
            path.cubic_to(c1, c2, pts[i + 1]);
        } else {
            path.line_to(pts[i + 1]);
        }
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(dataset.style.width);
    stroke.set_color(dataset.style.stroke);

    canvas.draw_path(&path, &stroke);
}
