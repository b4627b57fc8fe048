// File: crates/popularity-core/src/lib.rs
// Summary: Core library entry point; exports label/series generation, CSV import, release annotations and rendering.

pub mod axis;
pub mod chart;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod handlers;
pub mod import;
pub mod labels;
pub mod period;
pub mod plugin;
pub mod scale;
pub mod series;
pub mod synth;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::Axis;
pub use chart::{ChartError, ChartState, RenderOptions};
pub use events::{arcane_releases, ReleaseEvent};
pub use handlers::{dispatch, ControlEvent, Outcome};
pub use import::{parse_popularity_csv, DateError, ImportError, ImportedSeries};
pub use labels::{month_labels, month_range};
pub use period::{Period, PeriodError};
pub use plugin::{compute_markers, resolve_event_index, Marker, Plugin, ReleaseLines};
pub use series::{Dataset, DatasetId};
pub use text::TextShaper;
pub use theme::Theme;
