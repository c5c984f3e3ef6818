//! Inspection numbers built on the fiscal calendar
//!
//! An inspection number reads `{station}{YY}{MM}{WW}-{DD}{running}`:
//! the station code, the two-digit fiscal year, the calendar month, the
//! fiscal week, a dash, the day of month, and a zero-padded running
//! sequence that restarts for every station and day.
//!
//! For example `IQA250703-15002` is the second IQA inspection on
//! 15 July 2024 (fiscal year 2025, week 3).

use chrono::{Datelike, NaiveDate};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::fiscal::{fiscal_week_number, fiscal_year, StartDay};

/// Default number of digits in the running sequence
pub const DEFAULT_RUNNING_WIDTH: usize = 3;

/// Digits between the station code and the dash: YY MM WW
const PERIOD_DIGITS: usize = 6;

/// A parsed or generated inspection number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InspectionNumber {
    station: String,
    fiscal_year: u32,
    month: u32,
    week: u32,
    day: u32,
    running: u32,
    width: usize,
}

impl InspectionNumber {
    /// Build the inspection number for `station` on `date` with the given
    /// running sequence
    pub fn new(
        station: &str,
        date: NaiveDate,
        running: u32,
        start_day: StartDay,
    ) -> Result<Self, InspectionNumberError> {
        validate_station(station)?;
        Ok(Self {
            station: station.to_string(),
            fiscal_year: fiscal_year(date, start_day).rem_euclid(100) as u32,
            month: date.month(),
            week: fiscal_week_number(date, start_day),
            day: date.day(),
            running,
            width: DEFAULT_RUNNING_WIDTH,
        })
    }

    /// Use a different zero-padding width for the running sequence
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// The shared prefix of every inspection number for `station` on `date`
    ///
    /// Record stores match existing numbers against this prefix to find the
    /// highest running sequence already issued.
    pub fn prefix_for(
        station: &str,
        date: NaiveDate,
        start_day: StartDay,
    ) -> Result<String, InspectionNumberError> {
        Self::new(station, date, 0, start_day).map(|number| number.prefix())
    }

    pub fn prefix(&self) -> String {
        format!(
            "{}{:02}{:02}{:02}-{:02}",
            self.station, self.fiscal_year, self.month, self.week, self.day
        )
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    /// Two-digit fiscal year
    pub fn fiscal_year(&self) -> u32 {
        self.fiscal_year
    }

    /// Calendar month (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn running(&self) -> u32 {
        self.running
    }

    pub fn parse(s: &str) -> Result<Self, InspectionNumberError> {
        s.parse()
    }
}

impl fmt::Display for InspectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.prefix(), self.running, width = self.width)
    }
}

impl FromStr for InspectionNumber {
    type Err = InspectionNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, tail) = s
            .split_once('-')
            .ok_or_else(|| InspectionNumberError::MissingDelimiter(s.to_string()))?;

        if !head.is_ascii() || head.len() <= PERIOD_DIGITS {
            return Err(InspectionNumberError::InvalidStation(head.to_string()));
        }
        let (station, period) = head.split_at(head.len() - PERIOD_DIGITS);
        validate_station(station)?;

        let fiscal_year = parse_field(s, period, 0..2, "fiscal year")?;
        let month = parse_field(s, period, 2..4, "month")?;
        let week = parse_field(s, period, 4..6, "week")?;

        if !tail.is_ascii() || tail.len() < 3 {
            return Err(InspectionNumberError::InvalidField {
                input: s.to_string(),
                field: "running sequence",
            });
        }
        let day = parse_field(s, tail, 0..2, "day")?;
        let running_digits = &tail[2..];
        let running = parse_field(s, running_digits, 0..running_digits.len(), "running sequence")?;

        check_range("month", month, 1..=12)?;
        check_range("week", week, 1..=52)?;
        check_range("day", day, 1..=31)?;

        Ok(Self {
            station: station.to_string(),
            fiscal_year,
            month,
            week,
            day,
            running,
            width: running_digits.len(),
        })
    }
}

impl Serialize for InspectionNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for InspectionNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Next inspection number for `station` on `date`, given numbers already issued
///
/// Only numbers sharing this station/day prefix count; anything else in
/// `existing` (other stations, other days, malformed entries) is ignored.
pub fn next_inspection_number<I, S>(
    station: &str,
    date: NaiveDate,
    start_day: StartDay,
    existing: I,
    width: usize,
) -> Result<InspectionNumber, InspectionNumberError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = InspectionNumber::prefix_for(station, date, start_day)?;

    let highest = existing
        .into_iter()
        .filter_map(|number| {
            let number = number.as_ref();
            let suffix = number.strip_prefix(prefix.as_str())?;
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            suffix.parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0);

    let running = highest
        .checked_add(1)
        .ok_or_else(|| InspectionNumberError::SequenceExhausted(prefix.clone()))?;

    tracing::debug!(%prefix, running, "allocated inspection number");

    InspectionNumber::new(station, date, running, start_day).map(|number| number.with_width(width))
}

fn validate_station(station: &str) -> Result<(), InspectionNumberError> {
    if station.is_empty() || !station.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(InspectionNumberError::InvalidStation(station.to_string()));
    }
    Ok(())
}

fn parse_field(
    input: &str,
    digits: &str,
    span: std::ops::Range<usize>,
    field: &'static str,
) -> Result<u32, InspectionNumberError> {
    digits
        .get(span)
        .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|part| part.parse::<u32>().ok())
        .ok_or_else(|| InspectionNumberError::InvalidField {
            input: input.to_string(),
            field,
        })
}

fn check_range(
    field: &'static str,
    value: u32,
    range: std::ops::RangeInclusive<u32>,
) -> Result<(), InspectionNumberError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InspectionNumberError::FieldOutOfRange { field, value })
    }
}

/// Errors that can occur when building or parsing inspection numbers
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum InspectionNumberError {
    #[error("invalid station code: '{0}'")]
    #[diagnostic(
        code(qcf::inspection::station),
        help("station codes are one or more ASCII letters or digits, e.g. IQA or L2")
    )]
    InvalidStation(String),

    #[error("missing '-' delimiter in inspection number: '{0}'")]
    #[diagnostic(code(qcf::inspection::delimiter))]
    MissingDelimiter(String),

    #[error("invalid {field} in inspection number '{input}'")]
    #[diagnostic(
        code(qcf::inspection::field),
        help("inspection numbers look like IQA250703-15002")
    )]
    InvalidField { input: String, field: &'static str },

    #[error("{field} {value} is out of range")]
    #[diagnostic(code(qcf::inspection::range))]
    FieldOutOfRange { field: &'static str, value: u32 },

    #[error("running sequence exhausted for prefix '{0}'")]
    #[diagnostic(code(qcf::inspection::exhausted))]
    SequenceExhausted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inspection_number_layout() {
        let number = InspectionNumber::new("IQA", date(2024, 7, 15), 2, StartDay::default()).unwrap();
        assert_eq!(number.to_string(), "IQA250703-15002");
        assert_eq!(number.prefix(), "IQA250703-15");
    }

    #[test]
    fn test_prefix_in_june_boundary_week() {
        // June 29 2024 already belongs to FY2025 week 1
        let prefix = InspectionNumber::prefix_for("QC", date(2024, 6, 29), StartDay::default()).unwrap();
        assert_eq!(prefix, "QC250601-29");
    }

    #[test]
    fn test_next_number_starts_at_one() {
        let existing: Vec<String> = Vec::new();
        let number =
            next_inspection_number("IQA", date(2024, 7, 15), StartDay::default(), existing, 3).unwrap();
        assert_eq!(number.to_string(), "IQA250703-15001");
    }

    #[test]
    fn test_next_number_follows_highest_match() {
        let existing = [
            "IQA250703-15001",
            "IQA250703-15007",
            "IQA250703-15003",
            "IQA250703-16009", // different day
            "LAB250703-15020", // different station
            "IQA250703-15abc", // malformed
        ];
        let number =
            next_inspection_number("IQA", date(2024, 7, 15), StartDay::default(), existing, 3).unwrap();
        assert_eq!(number.running(), 8);
        assert_eq!(number.to_string(), "IQA250703-15008");
    }

    #[test]
    fn test_running_grows_past_width() {
        let number = InspectionNumber::new("L2", date(2024, 7, 15), 1234, StartDay::default()).unwrap();
        assert_eq!(number.to_string(), "L2250703-151234");
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = InspectionNumber::parse("IQA250703-15002").unwrap();
        assert_eq!(parsed.station(), "IQA");
        assert_eq!(parsed.fiscal_year(), 25);
        assert_eq!(parsed.month(), 7);
        assert_eq!(parsed.week(), 3);
        assert_eq!(parsed.day(), 15);
        assert_eq!(parsed.running(), 2);
        assert_eq!(parsed.to_string(), "IQA250703-15002");
    }

    #[test]
    fn test_parse_station_with_digits() {
        let parsed = InspectionNumber::parse("L2250703-1512").unwrap();
        assert_eq!(parsed.station(), "L2");
        assert_eq!(parsed.running(), 12);
        assert_eq!(parsed.to_string(), "L2250703-1512");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            InspectionNumber::parse("IQA25070315002"),
            Err(InspectionNumberError::MissingDelimiter(_))
        ));
        assert!(matches!(
            InspectionNumber::parse("250703-15002"),
            Err(InspectionNumberError::InvalidStation(_))
        ));
        assert!(matches!(
            InspectionNumber::parse("IQA2507x3-15002"),
            Err(InspectionNumberError::InvalidField { field: "week", .. })
        ));
        assert!(matches!(
            InspectionNumber::parse("IQA251303-15002"),
            Err(InspectionNumberError::FieldOutOfRange { field: "month", value: 13 })
        ));
        assert!(matches!(
            InspectionNumber::parse("IQA250703-15"),
            Err(InspectionNumberError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_invalid_station_rejected() {
        let err = InspectionNumber::new("IQ-A", date(2024, 7, 15), 1, StartDay::default()).unwrap_err();
        assert_eq!(err, InspectionNumberError::InvalidStation("IQ-A".to_string()));
        assert!(InspectionNumber::new("", date(2024, 7, 15), 1, StartDay::default()).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let number = InspectionNumber::parse("IQA250703-15002").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"IQA250703-15002\"");
        let back: InspectionNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);
    }
}
