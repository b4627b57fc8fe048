// File: crates/popularity-core/tests/import.rs
// Purpose: CSV export parsing: header detection, lenient rows, monthly averaging.

use popularity_core::import::{average_buckets, bucket_by_month, normalize_date, read_observations, RawObservation};
use popularity_core::{parse_popularity_csv, DateError, ImportError, Period};

fn labels(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn monthly_export_round_trip() {
    let text = "\"Month\",\"Arcane: (Worldwide)\"\n2021-01,10\n2021-02,20\n2021-03,30\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2021-01", "2021-02", "2021-03"]));
    assert_eq!(s.values, vec![10.0, 20.0, 30.0]);
    assert_eq!(s.name.as_deref(), Some("Arcane: (Worldwide)"));
}

#[test]
fn same_month_rows_are_averaged() {
    let text = "Day,Value\n2022-01-05,40\n2022-01-20,60\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2022-01"]));
    assert_eq!(s.values, vec![50.0]);
}

#[test]
fn mean_rounds_half_up() {
    let text = "Day,Value\n2022-03-01,1\n2022-03-02,2\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.values, vec![2.0]);
}

#[test]
fn missing_header_is_reported() {
    let err = parse_popularity_csv("foo,bar").unwrap_err();
    assert_eq!(err, ImportError::MissingHeader);
    assert!(err.to_string().contains("Week, Month or Day"));
}

#[test]
fn empty_input_has_no_header() {
    assert_eq!(parse_popularity_csv("").unwrap_err(), ImportError::MissingHeader);
}

#[test]
fn malformed_rows_are_skipped() {
    let text = "Week,Arcane\n2022-02-01\n2022-03-01,abc\n,50\n2022-04-01,<1\n2022-05-01,70\nnot-a-date,20\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2022-05"]));
    assert_eq!(s.values, vec![70.0]);
}

#[test]
fn preamble_is_skipped_and_header_case_insensitive() {
    let text = "Category: All categories\n\n\"WEEK\",\"Arcane: (Worldwide)\"\n\"2024-10-27\",\"12\"\n\"2024-11-03\",\"88\"\n\"2024-11-10\",\"100\"\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2024-10", "2024-11"]));
    assert_eq!(s.values, vec![12.0, 94.0]);
}

#[test]
fn output_sorted_with_gaps_preserved() {
    let text = "Month,x\r\n2023-05,5\r\n2021-01,1\r\n2022-07,7\r\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2021-01", "2022-07", "2023-05"]));
    assert_eq!(s.values, vec![1.0, 7.0, 5.0]);
}

#[test]
fn header_without_rows_parses_empty() {
    let s = parse_popularity_csv("Month,x\n").expect("parse");
    assert!(s.is_empty());
    assert_eq!(s.labels.len(), s.values.len());
}

#[test]
fn read_observations_keeps_raw_dates() {
    let (name, obs) = read_observations("Day,Score\n2022-01-05 , 40\n").expect("read");
    assert_eq!(name.as_deref(), Some("Score"));
    assert_eq!(obs, vec![RawObservation { date: "2022-01-05".into(), value: 40.0 }]);
}

#[test]
fn bucketing_drops_unknown_dates() {
    let obs = vec![
        RawObservation { date: "2022-01".into(), value: 10.0 },
        RawObservation { date: "01/02/2022".into(), value: 99.0 },
        RawObservation { date: "2022-01-31".into(), value: 30.0 },
    ];
    let buckets = bucket_by_month(&obs);
    assert_eq!(buckets.len(), 1);
    assert_eq!(average_buckets(buckets), (labels(&["2022-01"]), vec![20.0]));
}

#[test]
fn normalize_accepts_enumerated_formats() {
    let nov = Period::new(2024, 11).unwrap();
    for s in [
        "2024-11",
        "2024-11-09",
        "2024/11/09",
        "2024/11",
        "2024-11-09T10:30:00",
        "2024-11-09 10:30:00",
        "2024-11-09T10:30:00Z",
        "2024-11-03 - 2024-11-09",
        "November 2024",
        "Nov 2024",
        "\"2024-11\"",
    ] {
        assert_eq!(normalize_date(s), Ok(nov), "format {s}");
    }
}

#[test]
fn normalize_rejects_ambiguous_and_garbage() {
    for s in ["01/02/2021", "11.09.2024", "yesterday", ""] {
        assert!(matches!(normalize_date(s), Err(DateError::Unrecognized(_))), "accepted {s}");
    }
}

#[test]
fn stray_quote_only_loses_its_own_row() {
    let text = "Month,x\n2021-01,10\n\"2021-02,20\n2021-03,30\n2021-04,40\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2021-01", "2021-03", "2021-04"]));
    assert_eq!(s.values, vec![10.0, 30.0, 40.0]);
}

#[test]
fn quoted_header_title_keeps_its_comma() {
    let text = "\"Month\",\"Arcane, Worldwide\"\n2021-01,10\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.name.as_deref(), Some("Arcane, Worldwide"));
    assert_eq!(s.values, vec![10.0]);
}

#[test]
fn quoted_header_key_is_detected() {
    let text = "Category: All\n\n\"Week\",\"Arcane\"\n2021-01-03,50\n";
    let s = parse_popularity_csv(text).expect("parse");
    assert_eq!(s.labels, labels(&["2021-01"]));
}
