//! `qcf range` command - calendar span of a fiscal week

use chrono::NaiveDate;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{load_config, output_format, start_day};
use crate::cli::output::{self, Rows};
use crate::cli::GlobalOpts;
use crate::core::fiscal::{fiscal_week_range, FiscalWeek};

#[derive(clap::Args, Debug)]
pub struct RangeArgs {
    /// Fiscal year (e.g. 2025 for July 2024 - June 2025)
    pub year: i32,

    /// Week number, 1-52
    pub week: u32,
}

#[derive(Debug, Serialize)]
struct RangeInfo {
    fiscal_year: i32,
    week: u32,
    start: NaiveDate,
    end: NaiveDate,
    days: i64,
}

pub fn run(args: RangeArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let start_day = start_day(global, &config);
    let range = fiscal_week_range(args.year, args.week, start_day)?;

    let info = RangeInfo {
        fiscal_year: args.year,
        week: args.week,
        start: range.start,
        end: range.end,
        days: range.len_days(),
    };

    let mut rows = Rows::new(["fiscal_week", "start", "end", "days"]);
    rows.push([
        FiscalWeek {
            year: args.year,
            week: args.week,
        }
        .to_string(),
        info.start.to_string(),
        info.end.to_string(),
        info.days.to_string(),
    ]);

    output::print(output_format(global, &config), &rows, &info)
}
