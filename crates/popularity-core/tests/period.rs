// File: crates/popularity-core/tests/period.rs
// Purpose: Period formatting, parsing and month arithmetic.

use popularity_core::{Period, PeriodError};

#[test]
fn formats_zero_padded() {
    let p = Period::new(2021, 3).unwrap();
    assert_eq!(p.to_string(), "2021-03");
}

#[test]
fn succ_rolls_over_year() {
    let p = Period::new(2021, 12).unwrap();
    assert_eq!(p.succ(), Period::new(2022, 1).unwrap());
}

#[test]
fn parse_is_strict() {
    assert_eq!("2024-11".parse::<Period>(), Period::new(2024, 11));
    assert!("2024-1".parse::<Period>().is_err());
    assert!("2024-11-01".parse::<Period>().is_err());
    assert!("abcd-ef".parse::<Period>().is_err());
    assert_eq!("2024-13".parse::<Period>(), Err(PeriodError::MonthOutOfRange(13)));
}

#[test]
fn ordering_is_chronological() {
    let a = Period::new(2021, 12).unwrap();
    let b = Period::new(2022, 1).unwrap();
    assert!(a < b);
    assert_eq!(b.ordinal() - a.ordinal(), 1);
}
