//! Fiscal calendar arithmetic
//!
//! Fiscal years are anchored on July 1 and split into weeks that begin on a
//! configurable weekday (Saturday unless configured otherwise). Fiscal year
//! `N` covers July of `N - 1` through June of `N`.
//!
//! Week 1 is the boundary week: it starts on the last start-weekday of June
//! and ends the day before the first start-weekday on or after July 1. Every
//! later week is a full seven-day span counted from that first start-weekday.
//! The forward direction (date to week) clamps into `1..=52`; the inverse
//! direction validates its input and returns [`FiscalError`].

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, Weekday};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First valid fiscal week number
pub const FIRST_WEEK: u32 = 1;

/// Last valid fiscal week number
pub const LAST_WEEK: u32 = 52;

/// Calendar month on which every fiscal year is anchored
const ANCHOR_MONTH: u32 = 7;

/// Weekday on which fiscal weeks begin, numbered Sunday = 0 through Saturday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StartDay(u8);

impl StartDay {
    pub const SUNDAY: StartDay = StartDay(0);
    pub const MONDAY: StartDay = StartDay(1);
    pub const SATURDAY: StartDay = StartDay(6);

    /// Create a start day from a weekday index (0 = Sunday ... 6 = Saturday)
    pub fn new(index: u8) -> Result<Self, FiscalError> {
        if index <= 6 {
            Ok(Self(index))
        } else {
            Err(FiscalError::InvalidStartDay(index.to_string()))
        }
    }

    /// Weekday index, Sunday = 0
    pub fn index(self) -> u8 {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Sunday",
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            _ => "Saturday",
        }
    }

    /// Whether `date` falls on this weekday
    pub fn matches(self, date: NaiveDate) -> bool {
        date.weekday().num_days_from_sunday() == u32::from(self.0)
    }

    /// First occurrence of this weekday on or after `date`
    pub fn on_or_after(self, date: NaiveDate) -> Option<NaiveDate> {
        let current = date.weekday().num_days_from_sunday();
        let offset = (7 + u32::from(self.0) - current) % 7;
        date.checked_add_days(Days::new(u64::from(offset)))
    }

    /// Last occurrence of this weekday on or before `date`
    pub fn on_or_before(self, date: NaiveDate) -> Option<NaiveDate> {
        let current = date.weekday().num_days_from_sunday();
        let offset = (7 + current - u32::from(self.0)) % 7;
        date.checked_sub_days(Days::new(u64::from(offset)))
    }
}

impl Default for StartDay {
    fn default() -> Self {
        StartDay::SATURDAY
    }
}

impl TryFrom<u8> for StartDay {
    type Error = FiscalError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        StartDay::new(index)
    }
}

impl From<StartDay> for u8 {
    fn from(day: StartDay) -> Self {
        day.0
    }
}

impl From<Weekday> for StartDay {
    fn from(weekday: Weekday) -> Self {
        // num_days_from_sunday is always 0..=6
        StartDay(weekday.num_days_from_sunday() as u8)
    }
}

impl fmt::Display for StartDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

impl FromStr for StartDay {
    type Err = FiscalError;

    /// Accepts a weekday index (`6`) or an English weekday name (`sat`, `Saturday`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return StartDay::new(index);
        }
        trimmed
            .parse::<Weekday>()
            .map(StartDay::from)
            .map_err(|_| FiscalError::InvalidStartDay(s.to_string()))
    }
}

/// A fiscal year and week number pair
///
/// Orders chronologically: by fiscal year, then by week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalWeek {
    pub year: i32,
    pub week: u32,
}

impl FiscalWeek {
    /// Fiscal week containing `date`
    pub fn of(date: NaiveDate, start_day: StartDay) -> Self {
        Self {
            year: fiscal_year(date, start_day),
            week: fiscal_week_number(date, start_day),
        }
    }

    /// The six-digit `YYYYWW` code
    pub fn code(&self) -> String {
        format!("{:04}{:02}", self.year, self.week)
    }

    /// Calendar span of this week
    pub fn range(&self, start_day: StartDay) -> Result<FiscalWeekRange, FiscalError> {
        fiscal_week_range(self.year, self.week, start_day)
    }

    /// Parse a `YYYYWW` code, validating format and week range
    pub fn parse_code(code: &str) -> Result<Self, FiscalError> {
        if code.len() != 6 {
            return Err(FiscalError::InvalidFormat {
                input: code.to_string(),
                reason: "expected exactly 6 characters",
            });
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FiscalError::InvalidFormat {
                input: code.to_string(),
                reason: "year and week must be numeric",
            });
        }

        // All ASCII digits, so byte slicing is safe
        let year = code[..4].parse::<i32>().map_err(|_| FiscalError::InvalidFormat {
            input: code.to_string(),
            reason: "year must be numeric",
        })?;
        let week = code[4..].parse::<u32>().map_err(|_| FiscalError::InvalidFormat {
            input: code.to_string(),
            reason: "week must be numeric",
        })?;

        if !(FIRST_WEEK..=LAST_WEEK).contains(&week) {
            return Err(FiscalError::OutOfRange { week });
        }

        Ok(Self { year, week })
    }
}

impl fmt::Display for FiscalWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.week)
    }
}

impl FromStr for FiscalWeek {
    type Err = FiscalError;

    /// Accepts either `YYYYWW` or the display form `YYYY-WW`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((year, week)) if year.len() == 4 && week.len() == 2 => {
                Self::parse_code(&format!("{}{}", year, week))
            }
            _ => Self::parse_code(s),
        }
    }
}

/// Calendar span of one fiscal week (both ends inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalWeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FiscalWeekRange {
    /// Number of calendar days covered, counting both ends
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for FiscalWeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Output layouts for [`format_fiscal_week`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiscalWeekFormat {
    /// `2025-03`
    #[default]
    Dash,
    /// `2025 Week 03`
    Label,
    /// `202503`
    Compact,
}

/// Errors raised by the fiscal calendar
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum FiscalError {
    #[error("invalid fiscal week code '{input}': {reason}")]
    #[diagnostic(
        code(qcf::fiscal::invalid_format),
        help("use a four-digit fiscal year followed by a two-digit week, e.g. 202507")
    )]
    InvalidFormat { input: String, reason: &'static str },

    #[error("fiscal week {week} is out of range (expected 1-52)")]
    #[diagnostic(code(qcf::fiscal::out_of_range))]
    OutOfRange { week: u32 },

    #[error("invalid date '{0}'")]
    #[diagnostic(
        code(qcf::fiscal::invalid_date),
        help("dates are written as YYYY-MM-DD, an ISO 8601 timestamp, or 'today'")
    )]
    InvalidDate(String),

    #[error("invalid fiscal year start day '{0}'")]
    #[diagnostic(
        code(qcf::fiscal::invalid_start_day),
        help("use a weekday index from 0 (Sunday) to 6 (Saturday) or a weekday name")
    )]
    InvalidStartDay(String),

    #[error("{date} maps to fiscal week {raw}, outside 1-52")]
    #[diagnostic(code(qcf::fiscal::week_clamped))]
    WeekClamped { date: NaiveDate, raw: i64 },

    #[error("fiscal year {0} cannot be represented in the calendar")]
    #[diagnostic(code(qcf::fiscal::year_out_of_range))]
    YearOutOfRange(i32),
}

/// A date supplied either as a calendar date or as text still to be parsed
///
/// Text is only interpreted by [`DateInput::resolve`], so an unparseable
/// string fails with [`FiscalError::InvalidDate`] rather than flowing into
/// week arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Iso(String),
    Today,
}

impl DateInput {
    pub fn resolve(&self) -> Result<NaiveDate, FiscalError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Today => Ok(today()),
            DateInput::Iso(text) => parse_date(text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Iso(text.to_string())
    }
}

impl FromStr for DateInput {
    type Err = FiscalError;

    /// Parses eagerly so command-line arguments are rejected at the boundary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("today") {
            return Ok(DateInput::Today);
        }
        parse_date(s).map(DateInput::Date)
    }
}

/// Parse `YYYY-MM-DD`, a naive ISO 8601 timestamp, or an RFC 3339 timestamp
pub fn parse_date(text: &str) -> Result<NaiveDate, FiscalError> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.date_naive());
    }
    Err(FiscalError::InvalidDate(text.to_string()))
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar year whose July 1 anchors the fiscal year containing `date`,
/// ignoring the June boundary week
fn anchor_year(date: NaiveDate) -> i32 {
    if date.month() >= ANCHOR_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

/// First start-weekday on or after July 1 of `anchor_year`
fn first_full_week_start(anchor_year: i32, start_day: StartDay) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(anchor_year, ANCHOR_MONTH, 1).and_then(|anchor| start_day.on_or_after(anchor))
}

/// Last start-weekday on or before June 30 of `year`
fn last_june_start(year: i32, start_day: StartDay) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 6, 30).and_then(|june_30| start_day.on_or_before(june_30))
}

/// Whether `date` sits in the boundary week at the end of June
fn in_june_boundary_week(date: NaiveDate, start_day: StartDay) -> bool {
    date.month() == 6 && last_june_start(date.year(), start_day).is_some_and(|start| date >= start)
}

/// Unclamped week number; may exceed 52 late in June
fn raw_week_number(date: NaiveDate, start_day: StartDay) -> i64 {
    if in_june_boundary_week(date, start_day) {
        return i64::from(FIRST_WEEK);
    }

    // The previous July only fails to exist at the very start of chrono's range
    let Some(first_start) = first_full_week_start(anchor_year(date), start_day) else {
        return i64::from(FIRST_WEEK);
    };

    if date < first_start {
        return i64::from(FIRST_WEEK);
    }

    (date - first_start).num_days() / 7 + 2
}

/// Fiscal week number (1-52) of `date`, clamped into range
pub fn fiscal_week_number(date: NaiveDate, start_day: StartDay) -> u32 {
    let raw = raw_week_number(date, start_day);
    let week = raw.clamp(i64::from(FIRST_WEEK), i64::from(LAST_WEEK));
    if week != raw {
        tracing::debug!(%date, raw, week, "clamped fiscal week number");
    }
    // Clamped into 1..=52 above
    week as u32
}

/// Like [`fiscal_week_number`], but reports dates that would need clamping
pub fn fiscal_week_number_strict(date: NaiveDate, start_day: StartDay) -> Result<u32, FiscalError> {
    let raw = raw_week_number(date, start_day);
    u32::try_from(raw)
        .ok()
        .filter(|week| (FIRST_WEEK..=LAST_WEEK).contains(week))
        .ok_or(FiscalError::WeekClamped { date, raw })
}

/// Fiscal year containing `date`
///
/// July onwards belongs to the next calendar year's fiscal year, as does the
/// boundary week at the end of June.
pub fn fiscal_year(date: NaiveDate, start_day: StartDay) -> i32 {
    if date.month() >= ANCHOR_MONTH || in_june_boundary_week(date, start_day) {
        date.year() + 1
    } else {
        date.year()
    }
}

/// Calendar span of `week` in `fiscal_year`
pub fn fiscal_week_range(
    fiscal_year: i32,
    week: u32,
    start_day: StartDay,
) -> Result<FiscalWeekRange, FiscalError> {
    if !(FIRST_WEEK..=LAST_WEEK).contains(&week) {
        return Err(FiscalError::OutOfRange { week });
    }

    let unrepresentable = || FiscalError::YearOutOfRange(fiscal_year);
    let anchor_year = fiscal_year.checked_sub(1).ok_or_else(unrepresentable)?;
    let first_start = first_full_week_start(anchor_year, start_day).ok_or_else(unrepresentable)?;

    if week == FIRST_WEEK {
        let start = last_june_start(anchor_year, start_day).ok_or_else(unrepresentable)?;
        let end = first_start.pred_opt().ok_or_else(unrepresentable)?;
        return Ok(FiscalWeekRange { start, end });
    }

    let start = first_start
        .checked_add_days(Days::new(u64::from(week - 2) * 7))
        .ok_or_else(unrepresentable)?;
    let end = start.checked_add_days(Days::new(6)).ok_or_else(unrepresentable)?;
    Ok(FiscalWeekRange { start, end })
}

/// Render the fiscal year and week of `date`
pub fn format_fiscal_week(date: NaiveDate, format: FiscalWeekFormat, start_day: StartDay) -> String {
    let FiscalWeek { year, week } = FiscalWeek::of(date, start_day);
    match format {
        FiscalWeekFormat::Dash => format!("{}-{:02}", year, week),
        FiscalWeekFormat::Label => format!("{} Week {:02}", year, week),
        FiscalWeekFormat::Compact => format!("{}{:02}", year, week),
    }
}

/// Convert a `YYYYWW` code into the `YYMM` of the calendar month in which
/// that week starts
pub fn fiscal_week_to_year_month(code: &str, start_day: StartDay) -> Result<String, FiscalError> {
    let fiscal_week = FiscalWeek::parse_code(code)?;
    let range = fiscal_week.range(start_day)?;
    tracing::debug!(code, start = %range.start, "resolved fiscal week start");
    Ok(format!(
        "{:02}{:02}",
        range.start.year().rem_euclid(100),
        range.start.month()
    ))
}

/// Fiscal week containing today's local date
pub fn current_fiscal_week(start_day: StartDay) -> FiscalWeek {
    FiscalWeek::of(today(), start_day)
}

/// Fiscal year containing today's local date
pub fn current_fiscal_year(start_day: StartDay) -> i32 {
    fiscal_year(today(), start_day)
}

/// Fiscal week number of today's local date
pub fn current_fiscal_week_number(start_day: StartDay) -> u32 {
    fiscal_week_number(today(), start_day)
}

/// All 52 weeks of `fiscal_year` in order
pub fn weeks_of_year(
    fiscal_year: i32,
    start_day: StartDay,
) -> Result<Vec<(FiscalWeek, FiscalWeekRange)>, FiscalError> {
    (FIRST_WEEK..=LAST_WEEK)
        .map(|week| {
            let fiscal_week = FiscalWeek { year: fiscal_year, week };
            fiscal_week.range(start_day).map(|range| (fiscal_week, range))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const SAT: StartDay = StartDay::SATURDAY;

    #[test]
    fn test_fiscal_year_after_july_anchor() {
        assert_eq!(fiscal_year(date(2024, 7, 15), SAT), 2025);
    }

    #[test]
    fn test_fiscal_year_before_july_anchor() {
        assert_eq!(fiscal_year(date(2024, 3, 10), SAT), 2024);
    }

    #[test]
    fn test_first_full_week_is_week_two() {
        // July 1 2024 is a Monday; the first Saturday is July 6
        assert_eq!(fiscal_week_number(date(2024, 7, 6), SAT), 2);
        assert_eq!(fiscal_week_number(date(2024, 7, 12), SAT), 2);
        assert_eq!(fiscal_week_number(date(2024, 7, 13), SAT), 3);
    }

    #[test]
    fn test_july_days_before_first_start_are_week_one() {
        assert_eq!(fiscal_week_number(date(2024, 7, 1), SAT), 1);
        assert_eq!(fiscal_week_number(date(2024, 7, 5), SAT), 1);
    }

    #[test]
    fn test_june_boundary_week() {
        // June 29 2024 is the last Saturday of June
        assert_eq!(fiscal_week_number(date(2024, 6, 29), SAT), 1);
        assert_eq!(fiscal_week_number(date(2024, 6, 30), SAT), 1);
        assert_eq!(fiscal_year(date(2024, 6, 29), SAT), 2025);
        assert_eq!(fiscal_year(date(2024, 6, 30), SAT), 2025);

        // The day before is still in the old fiscal year, clamped to 52
        assert_eq!(fiscal_year(date(2024, 6, 28), SAT), 2024);
        assert_eq!(fiscal_week_number(date(2024, 6, 28), SAT), 52);
    }

    #[test]
    fn test_june_30_and_july_1_boundary() {
        // 2023: June 30 is a Friday, the last June Saturday is the 24th
        assert_eq!(fiscal_year(date(2023, 6, 30), SAT), fiscal_year(date(2023, 7, 1), SAT));

        // 2022: June 30 is a Thursday, last Saturday June 25
        assert_eq!(fiscal_year(date(2022, 6, 24), SAT), 2022);
        assert_ne!(fiscal_year(date(2022, 6, 24), SAT), fiscal_year(date(2022, 7, 1), SAT));
    }

    #[test]
    fn test_week_number_clamps_late_june() {
        // First Saturday of FY2024 is July 1 2023, so June 2024 overflows
        assert_eq!(raw_week_number(date(2024, 6, 22), SAT), 53);
        assert_eq!(fiscal_week_number(date(2024, 6, 22), SAT), 52);
        assert_eq!(
            fiscal_week_number_strict(date(2024, 6, 22), SAT),
            Err(FiscalError::WeekClamped {
                date: date(2024, 6, 22),
                raw: 53
            })
        );
        assert_eq!(fiscal_week_number_strict(date(2024, 7, 6), SAT), Ok(2));
    }

    #[test]
    fn test_week_range_week_one() {
        let range = fiscal_week_range(2025, 1, SAT).unwrap();
        assert_eq!(range.start, date(2024, 6, 29));
        assert_eq!(range.end, date(2024, 7, 5));
        assert_eq!(range.len_days(), 7);
    }

    #[test]
    fn test_week_range_when_july_first_is_start_day() {
        // July 1 2023 is a Saturday
        let week_one = fiscal_week_range(2024, 1, SAT).unwrap();
        assert_eq!(week_one.start, date(2023, 6, 24));
        assert_eq!(week_one.end, date(2023, 6, 30));

        let week_two = fiscal_week_range(2024, 2, SAT).unwrap();
        assert_eq!(week_two.start, date(2023, 7, 1));
        assert_eq!(week_two.end, date(2023, 7, 7));
    }

    #[test]
    fn test_week_range_rejects_out_of_range_week() {
        assert_eq!(
            fiscal_week_range(2025, 0, SAT),
            Err(FiscalError::OutOfRange { week: 0 })
        );
        assert_eq!(
            fiscal_week_range(2025, 53, SAT),
            Err(FiscalError::OutOfRange { week: 53 })
        );
    }

    #[test]
    fn test_week_one_span_is_short_week() {
        for year in 1990..2060 {
            for index in 0..=6 {
                let start_day = StartDay::new(index).unwrap();
                let range = fiscal_week_range(year, 1, start_day).unwrap();
                assert!((1..=13).contains(&range.len_days()));
                // Consecutive start-weekdays straddle June 30 / July 1
                assert_eq!(range.len_days(), 7);
            }
        }
    }

    #[test]
    fn test_format_fiscal_week() {
        let d = date(2024, 7, 15);
        assert_eq!(format_fiscal_week(d, FiscalWeekFormat::Dash, SAT), "2025-03");
        assert_eq!(format_fiscal_week(d, FiscalWeekFormat::Label, SAT), "2025 Week 03");
        assert_eq!(format_fiscal_week(d, FiscalWeekFormat::Compact, SAT), "202503");
    }

    #[test]
    fn test_week_to_year_month() {
        assert_eq!(fiscal_week_to_year_month("202501", SAT).unwrap(), "2406");
        assert_eq!(fiscal_week_to_year_month("202502", SAT).unwrap(), "2407");
        assert_eq!(fiscal_week_to_year_month("202552", SAT).unwrap(), "2506");
    }

    #[test]
    fn test_week_to_year_month_invalid_length() {
        let err = fiscal_week_to_year_month("20251", SAT).unwrap_err();
        assert!(matches!(err, FiscalError::InvalidFormat { .. }));
    }

    #[test]
    fn test_week_to_year_month_non_numeric() {
        let err = fiscal_week_to_year_month("2025ab", SAT).unwrap_err();
        assert!(matches!(err, FiscalError::InvalidFormat { .. }));
    }

    #[test]
    fn test_week_to_year_month_week_zero() {
        let err = fiscal_week_to_year_month("202500", SAT).unwrap_err();
        assert_eq!(err, FiscalError::OutOfRange { week: 0 });
        let err = fiscal_week_to_year_month("202553", SAT).unwrap_err();
        assert_eq!(err, FiscalError::OutOfRange { week: 53 });
    }

    #[test]
    fn test_start_day_parsing() {
        assert_eq!("6".parse::<StartDay>().unwrap(), StartDay::SATURDAY);
        assert_eq!("sun".parse::<StartDay>().unwrap(), StartDay::SUNDAY);
        assert_eq!("Monday".parse::<StartDay>().unwrap(), StartDay::MONDAY);
        assert!("7".parse::<StartDay>().is_err());
        assert!("someday".parse::<StartDay>().is_err());
        assert_eq!(StartDay::default(), StartDay::SATURDAY);
    }

    #[test]
    fn test_start_day_weekday_search() {
        let monday = date(2024, 7, 1);
        assert_eq!(SAT.on_or_after(monday), Some(date(2024, 7, 6)));
        assert_eq!(SAT.on_or_before(monday), Some(date(2024, 6, 29)));
        assert_eq!(StartDay::MONDAY.on_or_after(monday), Some(monday));
        assert_eq!(StartDay::MONDAY.on_or_before(monday), Some(monday));
    }

    #[test]
    fn test_other_start_day() {
        // Sunday weeks: first Sunday on/after July 1 2024 is July 7
        let sun = StartDay::SUNDAY;
        assert_eq!(fiscal_week_number(date(2024, 7, 6), sun), 1);
        assert_eq!(fiscal_week_number(date(2024, 7, 7), sun), 2);
        // Last Sunday of June 2024 is June 30
        assert_eq!(fiscal_week_number(date(2024, 6, 30), sun), 1);
        assert_eq!(fiscal_year(date(2024, 6, 29), sun), 2024);
    }

    #[test]
    fn test_fiscal_week_code_parsing() {
        let fw: FiscalWeek = "2025-07".parse().unwrap();
        assert_eq!(fw, FiscalWeek { year: 2025, week: 7 });
        assert_eq!(fw.code(), "202507");
        assert_eq!("202507".parse::<FiscalWeek>().unwrap(), fw);
        assert_eq!(fw.to_string(), "2025-07");
    }

    #[test]
    fn test_date_input_resolution() {
        assert_eq!(
            DateInput::from("2024-07-15").resolve().unwrap(),
            date(2024, 7, 15)
        );
        assert_eq!(
            DateInput::from("2024-07-15T08:30:00").resolve().unwrap(),
            date(2024, 7, 15)
        );
        assert_eq!(
            DateInput::from("2024-07-15T08:30:00+02:00").resolve().unwrap(),
            date(2024, 7, 15)
        );
        assert!(matches!(
            DateInput::from("July 15th").resolve(),
            Err(FiscalError::InvalidDate(_))
        ));
        assert_eq!("today".parse::<DateInput>().unwrap(), DateInput::Today);
        assert!("2024-13-01".parse::<DateInput>().is_err());
    }

    #[test]
    fn test_weeks_of_year_are_contiguous() {
        let weeks = weeks_of_year(2025, SAT).unwrap();
        assert_eq!(weeks.len(), 52);
        for pair in weeks.windows(2) {
            assert_eq!(pair[0].1.end.succ_opt().unwrap(), pair[1].1.start);
        }
    }

    #[test]
    fn test_week_number_sweep_stays_in_bounds() {
        let mut day = date(2023, 1, 1);
        while day <= date(2026, 12, 31) {
            let week = fiscal_week_number(day, SAT);
            assert!((FIRST_WEEK..=LAST_WEEK).contains(&week), "{} -> {}", day, week);
            day = day.succ_opt().unwrap();
        }
    }

    proptest! {
        #[test]
        fn prop_range_start_round_trips(year in 1900i32..2200, week in 2u32..=52) {
            let range = fiscal_week_range(year, week, SAT).unwrap();
            prop_assert_eq!(fiscal_year(range.start, SAT), year);
            prop_assert_eq!(fiscal_week_number(range.start, SAT), week);
            prop_assert_eq!((range.end - range.start).num_days(), 6);
        }

        #[test]
        fn prop_consecutive_weeks_advance_seven_days(year in 1900i32..2200, week in 2u32..52) {
            let this = fiscal_week_range(year, week, SAT).unwrap();
            let next = fiscal_week_range(year, week + 1, SAT).unwrap();
            prop_assert_eq!((next.start - this.start).num_days(), 7);
        }

        #[test]
        fn prop_week_number_in_bounds(days in 0i64..200_000, index in 0u8..=6) {
            let start_day = StartDay::new(index).unwrap();
            let day = date(1800, 1, 1) + chrono::Duration::days(days);
            let week = fiscal_week_number(day, start_day);
            prop_assert!((FIRST_WEEK..=LAST_WEEK).contains(&week));
        }

        #[test]
        fn prop_compact_code_resolves_to_week_start(days in 0i64..40_000) {
            let day = date(1950, 1, 1) + chrono::Duration::days(days);
            let code = format_fiscal_week(day, FiscalWeekFormat::Compact, SAT);
            let yymm = fiscal_week_to_year_month(&code, SAT).unwrap();
            let start = FiscalWeek::of(day, SAT).range(SAT).unwrap().start;
            prop_assert_eq!(yymm, format!("{:02}{:02}", start.year() % 100, start.month()));
        }
    }
}
