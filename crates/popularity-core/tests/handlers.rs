// File: crates/popularity-core/tests/handlers.rs
// Purpose: Control events against an owned chart: toggles, successful and rejected imports.

use popularity_core::handlers::{handle_import, handle_toggle};
use popularity_core::{dispatch, ChartState, ControlEvent, DatasetId, ImportError, Outcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn chart() -> (ChartState, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    (ChartState::popularity(&mut rng), rng)
}

#[test]
fn default_chart_shape() {
    let (chart, _) = chart();
    assert_eq!(chart.labels().len(), 57);
    assert_eq!(chart.datasets().len(), 2);
    for d in chart.datasets() {
        assert_eq!(d.data.len(), chart.labels().len());
        assert!(d.visible);
    }
    assert_eq!(chart.plugin_ids(), vec!["releaseLines"]);
}

#[test]
fn toggle_hides_and_shows() {
    let (mut chart, mut rng) = chart();
    let out = dispatch(&mut chart, ControlEvent::Toggle { dataset: DatasetId::SocialMentions, checked: false }, &mut rng);
    assert_eq!(out, Outcome::Redraw);
    assert!(chart.is_dataset_visible(0));
    assert!(!chart.is_dataset_visible(1));

    assert_eq!(handle_toggle(&mut chart, DatasetId::SocialMentions, true), Outcome::Redraw);
    assert!(chart.is_dataset_visible(1));
}

#[test]
fn visibility_out_of_range_is_rejected() {
    let (mut chart, _) = chart();
    assert!(!chart.set_dataset_visibility(5, false));
    assert!(!chart.is_dataset_visible(5));
}

#[test]
fn import_replaces_labels_and_search_data() {
    let (mut chart, mut rng) = chart();
    let csv = "\"Month\",\"Arcane: (Worldwide)\"\n2024-10,10\n2024-12,90\n2025-01,40\n";
    let months = handle_import(&mut chart, csv, &mut rng).expect("import");
    assert_eq!(months, 3);
    assert_eq!(chart.labels(), ["2024-10", "2024-12", "2025-01"]);

    let search = chart.dataset(DatasetId::SearchInterest).unwrap();
    assert_eq!(search.data, vec![10.0, 90.0, 40.0]);
    assert_eq!(search.label, "Arcane: (Worldwide)");

    let social = chart.dataset(DatasetId::SocialMentions).unwrap();
    assert_eq!(social.data.len(), 3);
    assert!(social.data.iter().all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn failed_import_leaves_chart_untouched() {
    let (mut chart, mut rng) = chart();
    let before_labels = chart.labels().to_vec();
    let before_data = chart.dataset(DatasetId::SearchInterest).unwrap().data.clone();

    let out = dispatch(
        &mut chart,
        ControlEvent::FileLoaded { name: "export.csv".into(), contents: "foo,bar".into() },
        &mut rng,
    );
    match out {
        Outcome::Notice(msg) => assert!(msg.contains("export.csv")),
        other => panic!("expected notice, got {other:?}"),
    }
    assert_eq!(chart.labels(), before_labels.as_slice());
    assert_eq!(chart.dataset(DatasetId::SearchInterest).unwrap().data, before_data);
}

#[test]
fn header_only_import_is_rejected() {
    let (mut chart, mut rng) = chart();
    let err = handle_import(&mut chart, "Week,x\n2022-01-01,abc\n", &mut rng).unwrap_err();
    assert_eq!(err, ImportError::NoData);
    assert_eq!(chart.labels().len(), 57);
}

#[test]
fn second_import_overwrites_first() {
    let (mut chart, mut rng) = chart();
    handle_import(&mut chart, "Month,a\n2021-01,5\n", &mut rng).unwrap();
    handle_import(&mut chart, "Month,b\n2022-01,7\n2022-02,9\n", &mut rng).unwrap();
    assert_eq!(chart.labels(), ["2022-01", "2022-02"]);
    assert_eq!(chart.dataset(DatasetId::SearchInterest).unwrap().label, "b");
}
