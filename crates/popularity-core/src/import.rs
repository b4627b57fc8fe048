// File: crates/popularity-core/src/import.rs
// Summary: Lenient CSV import of popularity exports, bucketed and averaged per month.
// Notes:
// - Exports carry an arbitrary preamble; the table starts at the first line whose
//   first cell is `Week`, `Month` or `Day`.
// - Only the header is structural. Bad rows (short, non-numeric, unknown date, stray quote)
//   are skipped one line at a time.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::chart::ChartError;
use crate::period::Period;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("no header row found; expected a line whose first cell is Week, Month or Day")]
    MissingHeader,
    #[error("export has a header but no usable rows")]
    NoData,
    #[error("imported series does not fit the chart: {0}")]
    Chart(#[from] ChartError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("unrecognized date '{0}'")]
    Unrecognized(String),
}

/// A `(date, value)` pair exactly as read from the export.
#[derive(Clone, Debug, PartialEq)]
pub struct RawObservation {
    pub date: String,
    pub value: f64,
}

/// Per-month values awaiting averaging.
pub type MonthlyBucket = BTreeMap<Period, Vec<f64>>;

/// Parallel, ascending labels and values. `name` is the header's value column title.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedSeries {
    pub name: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ImportedSeries {
    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
}

const HEADER_KEYS: [&str; 3] = ["week", "month", "day"];

const DAY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

fn clean_field(raw: &str) -> &str {
    raw.trim().trim_start_matches('\u{feff}').trim_matches('"').trim()
}

/// Decode one physical line as a CSV record. Each line is read on its own so a
/// stray quote cannot carry over into the rows after it.
fn decode_line(line: &str) -> Option<csv::StringRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());
    let mut rec = csv::StringRecord::new();
    match rdr.read_record(&mut rec) {
        Ok(true) => Some(rec),
        Ok(false) => None,
        Err(e) => {
            log::debug!("skipping undecodable row: {e}");
            None
        }
    }
}

fn is_header(line: &str) -> bool {
    decode_line(line)
        .and_then(|rec| rec.get(0).map(|f| clean_field(f).to_string()))
        .is_some_and(|first| HEADER_KEYS.iter().any(|k| first.eq_ignore_ascii_case(k)))
}

/// `dddd-dd-dd` shape; returns the `dddd-dd` prefix.
fn iso_day_prefix(s: &str) -> Option<&str> {
    let b = s.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter().enumerate().all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    shaped.then(|| &s[..7])
}

/// `YYYY/MM`, month without day.
fn slash_month(s: &str) -> Option<Period> {
    let (y, m) = s.split_once('/')?;
    if y.len() != 4 || m.is_empty() || m.len() > 2 || m.contains('/') {
        return None;
    }
    Period::new(y.parse().ok()?, m.parse().ok()?).ok()
}

/// Map an export date to its month over a fixed, locale-independent set of formats.
/// Numeric day/month-first forms such as `01/02/2021` are rejected as ambiguous.
pub fn normalize_date(raw: &str) -> Result<Period, DateError> {
    let s = clean_field(raw);
    let unrecognized = || DateError::Unrecognized(s.to_string());
    if s.is_empty() {
        return Err(unrecognized());
    }
    if let Ok(p) = s.parse::<Period>() {
        return Ok(p);
    }
    if let Some(prefix) = iso_day_prefix(s) {
        return prefix.parse::<Period>().map_err(|_| unrecognized());
    }
    // Weekly ranges: "2021-01-03 - 2021-01-09"
    if let Some((start, _)) = s.split_once(" - ") {
        return normalize_date(start).map_err(|_| unrecognized());
    }
    if let Some(p) = slash_month(s) {
        return Ok(p);
    }
    if let Some(d) = DAY_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s, f).ok()) {
        return Ok(Period::from_date(d));
    }
    if let Some(dt) = DATETIME_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(s, f).ok()) {
        return Ok(Period::from_date(dt.date()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Period::from_date(dt.date_naive()));
    }
    // "January 2021" / "Jan 2021"
    if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y") {
        return Ok(Period::from_date(d));
    }
    Err(unrecognized())
}

/// Locate the header and read every row below it.
/// Returns the value column title (if any) and the observations that have a date and a numeric value.
pub fn read_observations(text: &str) -> Result<(Option<String>, Vec<RawObservation>), ImportError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let header_idx = lines.iter().position(|l| is_header(l)).ok_or(ImportError::MissingHeader)?;

    let name = decode_line(lines[header_idx])
        .and_then(|rec| rec.get(1).map(|f| clean_field(f).to_string()))
        .filter(|s| !s.is_empty());

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for line in &lines[header_idx + 1..] {
        let Some(rec) = decode_line(line).filter(|r| r.len() >= 2) else {
            skipped += 1;
            continue;
        };
        let date = clean_field(&rec[0]);
        let value = clean_field(&rec[1]).parse::<f64>().ok().filter(|v| v.is_finite());
        match value {
            Some(value) if !date.is_empty() => out.push(RawObservation { date: date.to_string(), value }),
            _ => {
                log::debug!("skipping row {:?}", rec);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        log::debug!("{skipped} rows skipped below header");
    }
    Ok((name, out))
}

/// Group observations by month. Rows whose date is not recognized are dropped.
pub fn bucket_by_month(observations: &[RawObservation]) -> MonthlyBucket {
    let mut buckets = MonthlyBucket::new();
    for obs in observations {
        match normalize_date(&obs.date) {
            Ok(p) => buckets.entry(p).or_default().push(obs.value),
            Err(e) => log::debug!("dropping observation: {e}"),
        }
    }
    buckets
}

/// Halves round up, matching browser `Math.round`.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Mean of each bucket, rounded and clamped to [0, 100], in ascending month order.
pub fn average_buckets(buckets: MonthlyBucket) -> (Vec<String>, Vec<f64>) {
    buckets
        .into_iter()
        .filter(|(_, vals)| !vals.is_empty())
        .map(|(p, vals)| {
            let mean = vals.iter().sum::<f64>() / vals.len() as f64;
            (p.to_string(), round_half_up(mean).clamp(0.0, 100.0))
        })
        .unzip()
}

/// Parse an export into monthly labels and averaged values.
pub fn parse_popularity_csv(text: &str) -> Result<ImportedSeries, ImportError> {
    let (name, observations) = read_observations(text)?;
    let (labels, values) = average_buckets(bucket_by_month(&observations));
    log::info!(
        "parsed {} observations into {} months{}",
        observations.len(),
        labels.len(),
        name.as_deref().map(|n| format!(" for '{n}'")).unwrap_or_default()
    );
    Ok(ImportedSeries { name, labels, values })
}
