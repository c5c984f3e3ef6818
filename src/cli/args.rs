//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    calendar::CalendarArgs, completions::CompletionsArgs, config::ConfigCommands, init::InitArgs,
    inspno::InspnoCommands, range::RangeArgs, report::ReportCommands, week::WeekArgs,
    yymm::YymmArgs,
};
use crate::core::fiscal::StartDay;

#[derive(Parser)]
#[command(name = "qcf")]
#[command(author, version, about = "Quality-control fiscal calendar toolkit")]
#[command(long_about = "Fiscal weeks, inspection numbers and weekly quality summaries for manufacturing quality control.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Weekday fiscal weeks start on: 0-6 (Sunday = 0) or a name (default: config, then Saturday)
    #[arg(long, global = true)]
    pub start_day: Option<StartDay>,

    /// Project root (default: auto-detect by finding .qcf/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new QCF project
    Init(InitArgs),

    /// Show the fiscal year and week of a date
    Week(WeekArgs),

    /// Show the calendar span of a fiscal week
    Range(RangeArgs),

    /// Convert a YYYYWW fiscal week code to the YYMM month it starts in
    Yymm(YymmArgs),

    /// List every week of a fiscal year
    Calendar(CalendarArgs),

    /// Inspection number generation and parsing
    #[command(subcommand)]
    Inspno(InspnoCommands),

    /// Weekly and yearly quality summaries
    #[command(subcommand)]
    Report(ReportCommands),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (table for terminals)
    #[default]
    Auto,
    /// Aligned table
    Table,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
    /// YAML format
    Yaml,
    /// Markdown tables
    Md,
}
