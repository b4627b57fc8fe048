// File: crates/popularity-core/src/theme.rs
// Summary: Light/Dark theming for chart chrome (background, grid, axes, text).

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    /// Legend entry text for hidden datasets.
    pub muted: skia::Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(13, 0, 0, 0), // rgba(0,0,0,0.05)
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            title: skia::Color::from_argb(255, 17, 24, 39),
            muted: skia::Color::from_argb(255, 170, 170, 180),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(20, 255, 255, 255),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 245, 245, 250),
            muted: skia::Color::from_argb(255, 90, 90, 100),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
