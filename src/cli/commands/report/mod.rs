//! `qcf report` command - weekly and yearly quality summaries

use clap::{Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::cli::helpers::{load_config, output_format, start_day};
use crate::cli::output::{self, Rows};
use crate::cli::GlobalOpts;
use crate::core::summary::{weekly_summary, yearly_summary, PeriodSummary};
use crate::entities::record::{load_records, InspectionRecord, RecordKind};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals per fiscal week
    Weekly(ReportArgs),

    /// Totals per fiscal year
    Yearly(ReportArgs),
}

/// CLI-friendly record kind filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliRecordKind {
    Inspection,
    Defect,
    Iqa,
}

impl From<CliRecordKind> for RecordKind {
    fn from(cli: CliRecordKind) -> Self {
        match cli {
            CliRecordKind::Inspection => RecordKind::Inspection,
            CliRecordKind::Defect => RecordKind::Defect,
            CliRecordKind::Iqa => RecordKind::Iqa,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Record file (.csv, .yaml or .yml)
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Only include records from this station
    #[arg(long, short = 's')]
    pub station: Option<String>,

    /// Only include records of this kind
    #[arg(long, short = 'k')]
    pub kind: Option<CliRecordKind>,

    /// Only include this fiscal year
    #[arg(long)]
    pub year: Option<i32>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Period {
    Weekly,
    Yearly,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::Weekly(args) => run_report(args, Period::Weekly, global),
        ReportCommands::Yearly(args) => run_report(args, Period::Yearly, global),
    }
}

fn run_report(args: ReportArgs, period: Period, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let start_day = start_day(global, &config);

    let records: Vec<InspectionRecord> = load_records(&args.input)?
        .into_iter()
        .filter(|record| matches_filters(record, &args))
        .collect();
    tracing::info!(count = records.len(), ?period, "summarising records");

    let mut summaries = match period {
        Period::Weekly => weekly_summary(&records, start_day)?,
        Period::Yearly => yearly_summary(&records, start_day)?,
    };
    if let Some(year) = args.year {
        summaries.retain(|summary| summary.fiscal_year == year);
    }

    let rows = summary_rows(&summaries);
    let content = output::render(output_format(global, &config), &rows, &summaries)?;
    write_output(&content, args.output)
}

fn matches_filters(record: &InspectionRecord, args: &ReportArgs) -> bool {
    let station_ok = args
        .station
        .as_deref()
        .map_or(true, |station| record.station.eq_ignore_ascii_case(station));
    let kind_ok = args
        .kind
        .map_or(true, |kind| record.kind == RecordKind::from(kind));
    station_ok && kind_ok
}

fn summary_rows(summaries: &[PeriodSummary]) -> Rows {
    let mut rows = Rows::new([
        "period",
        "start",
        "end",
        "records",
        "inspected",
        "defects",
        "defect_ppm",
        "defect_%",
    ]);
    for summary in summaries {
        rows.push([
            summary.period.clone(),
            summary.start.to_string(),
            summary.end.to_string(),
            summary.records.to_string(),
            summary.inspected.to_string(),
            summary.defects.to_string(),
            format!("{:.0}", summary.defect_ppm),
            format!("{:.2}", summary.defect_percent()),
        ]);
    }
    rows
}

pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            println!("Report written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
