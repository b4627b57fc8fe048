// File: crates/popularity-core/src/period.rs
// Summary: Calendar month value type used as chart category and aggregation key.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// A calendar month. Ordering is chronological (year, then month).
/// Contract: `month` is always within 1..=12.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("malformed period '{0}', expected YYYY-MM")]
    Malformed(String),
    #[error("month {0} is out of range 1..=12")]
    MonthOutOfRange(u32),
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// Compile-time constructor for fixed timeline constants.
    pub(crate) const fn const_new(year: i32, month: u32) -> Self {
        assert!(month >= 1 && month <= 12, "month out of range");
        Self { year, month }
    }

    pub const fn year(&self) -> i32 { self.year }
    pub const fn month(&self) -> u32 { self.month }

    /// The month following this one.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Months elapsed since January of year 0. Differences give month distances.
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    /// Strict `YYYY-MM`: four digit year, two digit month.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PeriodError::Malformed(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(malformed());
        }
        let (y, m) = (&s[..4], &s[5..]);
        if !y.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year = y.parse::<i32>().map_err(|_| malformed())?;
        let month = m.parse::<u32>().map_err(|_| malformed())?;
        Self::new(year, month)
    }
}

