// File: crates/popularity-core/src/text.rs
// Summary: Text shaping for chart captions via Skia textlayout and the system font manager.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Shapes and paints single-line captions. One per frame is enough; the font
/// collection resolves families through the platform font manager.
pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["system-ui", "Segoe UI", "Roboto", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(size, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size, skia::Color::TRANSPARENT).longest_line()
    }

    /// Paint `text` with its baseline at `y`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let top = y - p.alphabetic_baseline();
        p.paint(canvas, (x, top));
    }

    /// Paint `text` horizontally centred on `cx`, baseline at `y`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let origin = (cx - p.longest_line() * 0.5, y - p.alphabetic_baseline());
        p.paint(canvas, origin);
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}
