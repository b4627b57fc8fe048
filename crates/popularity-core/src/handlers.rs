// File: crates/popularity-core/src/handlers.rs
// Summary: Typed control events (visibility toggles, CSV file loads) applied to an owned ChartState.

use rand::Rng;

use crate::chart::ChartState;
use crate::events::arcane_releases;
use crate::import::{parse_popularity_csv, ImportError, ImportedSeries};
use crate::series::DatasetId;
use crate::synth::{generate, reference_indices, SOCIAL_MENTIONS};

/// Input from the surrounding UI or CLI.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent {
    Toggle { dataset: DatasetId, checked: bool },
    FileLoaded { name: String, contents: String },
}

/// What the caller should do after an event was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    /// Nothing changed; show the message to the user.
    Notice(String),
}

pub fn dispatch<R: Rng + ?Sized>(chart: &mut ChartState, event: ControlEvent, rng: &mut R) -> Outcome {
    match event {
        ControlEvent::Toggle { dataset, checked } => handle_toggle(chart, dataset, checked),
        ControlEvent::FileLoaded { name, contents } => match handle_import(chart, &contents, rng) {
            Ok(months) => {
                log::info!("imported {months} months from {name}");
                Outcome::Redraw
            }
            Err(e) => {
                log::warn!("import of {name} rejected: {e}");
                Outcome::Notice(format!("Could not import {name}: {e}"))
            }
        },
    }
}

pub fn handle_toggle(chart: &mut ChartState, dataset: DatasetId, checked: bool) -> Outcome {
    match chart.dataset_index(dataset) {
        Some(i) if chart.set_dataset_visibility(i, checked) => Outcome::Redraw,
        _ => Outcome::Notice(format!("no dataset {dataset:?} on this chart")),
    }
}

/// Parse `contents` and swap it into the chart. Returns the number of months imported.
/// On error the chart is left exactly as it was.
pub fn handle_import<R: Rng + ?Sized>(chart: &mut ChartState, contents: &str, rng: &mut R) -> Result<usize, ImportError> {
    let imported = parse_popularity_csv(contents)?;
    if imported.is_empty() {
        return Err(ImportError::NoData);
    }
    apply_imported(chart, imported, rng)?;
    Ok(chart.labels().len())
}

/// Imported values replace search interest; social mentions has no imported
/// source, so it is re-synthesized over the new label axis.
fn apply_imported<R: Rng + ?Sized>(chart: &mut ChartState, imported: ImportedSeries, rng: &mut R) -> Result<(), ImportError> {
    let ImportedSeries { name, labels, values } = imported;
    let centers = reference_indices(&labels, &arcane_releases());
    let social = generate(&SOCIAL_MENTIONS, labels.len(), &centers, rng);

    let mut data = vec![(DatasetId::SearchInterest, values)];
    if chart.dataset_index(DatasetId::SocialMentions).is_some() {
        data.push((DatasetId::SocialMentions, social));
    }
    chart.replace_data(labels, data)?;
    if let Some(name) = name {
        chart.rename_dataset(DatasetId::SearchInterest, name);
    }
    Ok(())
}
