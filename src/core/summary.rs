//! Weekly and yearly rollups of inspection records

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::fiscal::{fiscal_year, FiscalError, FiscalWeek, StartDay, FIRST_WEEK};
use crate::entities::record::InspectionRecord;

/// Totals for one fiscal period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    /// `2025-03` for a week, `2025` for a year
    pub period: String,
    pub fiscal_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub records: usize,
    pub inspected: u64,
    pub defects: u64,
    /// Defective parts per million inspected
    pub defect_ppm: f64,
}

impl PeriodSummary {
    fn from_records<'a>(
        period: String,
        fiscal_year: i32,
        week: Option<u32>,
        start: NaiveDate,
        end: NaiveDate,
        records: impl IntoIterator<Item = &'a InspectionRecord>,
    ) -> Self {
        let (count, inspected, defects) = records
            .into_iter()
            .fold((0usize, 0u64, 0u64), |(count, inspected, defects), record| {
                (
                    count + 1,
                    inspected.saturating_add(record.inspected),
                    defects.saturating_add(record.defects),
                )
            });

        Self {
            period,
            fiscal_year,
            week,
            start,
            end,
            records: count,
            inspected,
            defects,
            defect_ppm: ppm(defects, inspected),
        }
    }

    /// Defect rate as a percentage of units inspected
    pub fn defect_percent(&self) -> f64 {
        self.defect_ppm / 10_000.0
    }
}

fn ppm(defects: u64, inspected: u64) -> f64 {
    if inspected == 0 {
        0.0
    } else {
        defects as f64 * 1_000_000.0 / inspected as f64
    }
}

/// Group items by the fiscal week of the date `date_of` extracts
pub fn bucket_by_week<T, F>(
    items: impl IntoIterator<Item = T>,
    start_day: StartDay,
    date_of: F,
) -> BTreeMap<FiscalWeek, Vec<T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: BTreeMap<FiscalWeek, Vec<T>> = BTreeMap::new();
    for item in items {
        let key = FiscalWeek::of(date_of(&item), start_day);
        buckets.entry(key).or_default().push(item);
    }
    buckets
}

/// Group items by fiscal year
pub fn bucket_by_year<T, F>(
    items: impl IntoIterator<Item = T>,
    start_day: StartDay,
    date_of: F,
) -> BTreeMap<i32, Vec<T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: BTreeMap<i32, Vec<T>> = BTreeMap::new();
    for item in items {
        let key = fiscal_year(date_of(&item), start_day);
        buckets.entry(key).or_default().push(item);
    }
    buckets
}

/// One summary per fiscal week that has records, oldest first
pub fn weekly_summary(
    records: &[InspectionRecord],
    start_day: StartDay,
) -> Result<Vec<PeriodSummary>, FiscalError> {
    bucket_by_week(records, start_day, |record| record.date)
        .into_iter()
        .map(|(fiscal_week, bucket)| {
            let range = fiscal_week.range(start_day)?;
            Ok(PeriodSummary::from_records(
                fiscal_week.to_string(),
                fiscal_week.year,
                Some(fiscal_week.week),
                range.start,
                range.end,
                bucket,
            ))
        })
        .collect()
}

/// One summary per fiscal year that has records, oldest first
///
/// A year spans from the start of its week 1 to the day before the next
/// year's week 1.
pub fn yearly_summary(
    records: &[InspectionRecord],
    start_day: StartDay,
) -> Result<Vec<PeriodSummary>, FiscalError> {
    bucket_by_year(records, start_day, |record| record.date)
        .into_iter()
        .map(|(year, bucket)| {
            let (start, end) = fiscal_year_bounds(year, start_day)?;
            Ok(PeriodSummary::from_records(
                year.to_string(),
                year,
                None,
                start,
                end,
                bucket,
            ))
        })
        .collect()
}

/// First and last calendar day of a fiscal year
pub fn fiscal_year_bounds(year: i32, start_day: StartDay) -> Result<(NaiveDate, NaiveDate), FiscalError> {
    let start = FiscalWeek { year, week: FIRST_WEEK }.range(start_day)?.start;
    let next_year = year.checked_add(1).ok_or(FiscalError::YearOutOfRange(year))?;
    let next_start = FiscalWeek {
        year: next_year,
        week: FIRST_WEEK,
    }
    .range(start_day)?
    .start;
    let end = next_start
        .checked_sub_days(Days::new(1))
        .ok_or(FiscalError::YearOutOfRange(year))?;
    Ok((start, end))
}
