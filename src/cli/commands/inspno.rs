//! `qcf inspno` command - inspection number generation and parsing

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{load_config, output_format, start_day};
use crate::cli::output::{self, Rows};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::fiscal::DateInput;
use crate::core::inspection::{next_inspection_number, InspectionNumber};
use crate::core::Config;
use crate::entities::record::load_records;

#[derive(Subcommand, Debug)]
pub enum InspnoCommands {
    /// Issue the next inspection number for a station and day
    New(NewArgs),

    /// Show the shared prefix of a station's numbers for a day
    Prefix(PrefixArgs),

    /// Break an inspection number into its parts
    Parse(ParseArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Station code (default: `station` from config)
    #[arg(long, short = 's')]
    pub station: Option<String>,

    /// Inspection date (YYYY-MM-DD or 'today')
    #[arg(long, short = 'd', default_value = "today")]
    pub date: DateInput,

    /// Record file whose `inspection_no` column lists numbers already issued
    #[arg(long, short = 'r')]
    pub records: Option<PathBuf>,

    /// Numbers already issued (repeatable, or comma-separated)
    #[arg(long, short = 'e', value_delimiter = ',')]
    pub existing: Vec<String>,

    /// Digits in the running sequence (default: config, then 3)
    #[arg(long, short = 'w')]
    pub width: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct PrefixArgs {
    /// Station code (default: `station` from config)
    #[arg(long, short = 's')]
    pub station: Option<String>,

    /// Inspection date (YYYY-MM-DD or 'today')
    #[arg(long, short = 'd', default_value = "today")]
    pub date: DateInput,
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Inspection number, e.g. IQA250703-15002
    pub number: String,
}

/// Run an inspno subcommand
pub fn run(cmd: InspnoCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InspnoCommands::New(args) => run_new(args, global),
        InspnoCommands::Prefix(args) => run_prefix(args, global),
        InspnoCommands::Parse(args) => run_parse(args, global),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let start_day = start_day(global, &config);
    let station = station(args.station, &config)?;
    let date = args.date.resolve()?;

    let mut existing = args.existing;
    if let Some(path) = &args.records {
        let records = load_records(path)?;
        existing.extend(records.into_iter().filter_map(|record| record.inspection_no));
    }

    let width = args.width.unwrap_or_else(|| config.running_width());
    let number = next_inspection_number(&station, date, start_day, &existing, width)?;

    match output_format(global, &config) {
        OutputFormat::Auto => {
            if global.quiet {
                println!("{}", number);
            } else {
                println!(
                    "{} Next inspection number {}",
                    style("✓").green(),
                    style(&number).cyan()
                );
            }
            Ok(())
        }
        format => print_parts(format, &number),
    }
}

fn run_prefix(args: PrefixArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let station = station(args.station, &config)?;
    let date = args.date.resolve()?;
    let prefix = InspectionNumber::prefix_for(&station, date, start_day(global, &config))?;
    println!("{}", prefix);
    Ok(())
}

fn run_parse(args: ParseArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let number = InspectionNumber::parse(args.number.trim())?;
    print_parts(output_format(global, &config), &number)
}

#[derive(Debug, Serialize)]
struct NumberParts<'a> {
    number: &'a InspectionNumber,
    station: &'a str,
    fiscal_year: u32,
    month: u32,
    week: u32,
    day: u32,
    running: u32,
}

fn print_parts(format: OutputFormat, number: &InspectionNumber) -> Result<()> {
    let parts = NumberParts {
        number,
        station: number.station(),
        fiscal_year: number.fiscal_year(),
        month: number.month(),
        week: number.week(),
        day: number.day(),
        running: number.running(),
    };

    let mut rows = Rows::new(["number", "station", "fy", "month", "week", "day", "running"]);
    rows.push([
        number.to_string(),
        parts.station.to_string(),
        format!("{:02}", parts.fiscal_year),
        format!("{:02}", parts.month),
        format!("{:02}", parts.week),
        format!("{:02}", parts.day),
        parts.running.to_string(),
    ]);

    output::print(format, &rows, &parts)
}

fn station(arg: Option<String>, config: &Config) -> Result<String> {
    arg.or_else(|| config.station.clone())
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            miette::miette!(
                help = "pass --station or run 'qcf config set station <CODE>'",
                "No station code given"
            )
        })
}

