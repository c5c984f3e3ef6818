//! `qcf calendar` command - every week of a fiscal year

use chrono::Datelike;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{load_config, output_format, start_day};
use crate::cli::output::{self, Rows};
use crate::cli::GlobalOpts;
use crate::core::fiscal::{current_fiscal_year, weeks_of_year, FiscalWeek, FiscalWeekRange};

#[derive(clap::Args, Debug)]
pub struct CalendarArgs {
    /// Fiscal year to list (default: the current fiscal year)
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct CalendarWeek {
    #[serde(flatten)]
    fiscal_week: FiscalWeek,
    code: String,
    #[serde(flatten)]
    range: FiscalWeekRange,
}

pub fn run(args: CalendarArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let start_day = start_day(global, &config);
    let year = args.year.unwrap_or_else(|| current_fiscal_year(start_day));

    let weeks: Vec<CalendarWeek> = weeks_of_year(year, start_day)?
        .into_iter()
        .map(|(fiscal_week, range)| CalendarWeek {
            code: fiscal_week.code(),
            fiscal_week,
            range,
        })
        .collect();

    let mut rows = Rows::new(["week", "code", "start", "end", "yymm"]);
    for week in &weeks {
        rows.push([
            format!("{:02}", week.fiscal_week.week),
            week.code.clone(),
            week.range.start.to_string(),
            week.range.end.to_string(),
            format!(
                "{:02}{:02}",
                week.range.start.year().rem_euclid(100),
                week.range.start.month()
            ),
        ]);
    }

    output::print(output_format(global, &config), &rows, &weeks)
}
