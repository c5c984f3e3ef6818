//! `qcf week` command - fiscal year and week of a date

use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{load_config, output_format, start_day};
use crate::cli::output::{self, Rows};
use crate::cli::GlobalOpts;
use crate::core::fiscal::{
    fiscal_week_number, fiscal_week_number_strict, fiscal_week_range, fiscal_year,
    format_fiscal_week, DateInput, FiscalWeekFormat,
};

#[derive(clap::Args, Debug)]
pub struct WeekArgs {
    /// Date to look up (YYYY-MM-DD, ISO timestamp, or 'today')
    #[arg(default_value = "today")]
    pub date: DateInput,

    /// Fail instead of clamping dates that fall past week 52
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct WeekInfo {
    date: chrono::NaiveDate,
    fiscal_year: i32,
    week: u32,
    code: String,
    label: String,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    start_day: u8,
}

pub fn run(args: WeekArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let start_day = start_day(global, &config);
    let date = args.date.resolve()?;

    let week = if args.strict {
        fiscal_week_number_strict(date, start_day)?
    } else {
        fiscal_week_number(date, start_day)
    };
    let year = fiscal_year(date, start_day);
    let range = fiscal_week_range(year, week, start_day)?;

    let info = WeekInfo {
        date,
        fiscal_year: year,
        week,
        code: format_fiscal_week(date, FiscalWeekFormat::Compact, start_day),
        label: format_fiscal_week(date, FiscalWeekFormat::Label, start_day),
        start: range.start,
        end: range.end,
        start_day: start_day.index(),
    };
    tracing::debug!(?info, "resolved fiscal week");

    let mut rows = Rows::new(["date", "fiscal_year", "week", "code", "start", "end"]);
    rows.push([
        info.date.to_string(),
        info.fiscal_year.to_string(),
        format!("{:02}", info.week),
        info.code.clone(),
        info.start.to_string(),
        info.end.to_string(),
    ]);

    output::print(output_format(global, &config), &rows, &info)
}
