//! Shared helper functions for CLI commands

use clap::ValueEnum;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::fiscal::StartDay;
use crate::core::Config;

/// Load layered configuration, honouring `--project`
pub fn load_config(global: &GlobalOpts) -> Config {
    match &global.project {
        Some(root) => Config::load_from(root),
        None => Config::load(),
    }
}

/// Effective fiscal week start day: `--start-day`, then config, then Saturday
pub fn start_day(global: &GlobalOpts, config: &Config) -> StartDay {
    global.start_day.unwrap_or_else(|| config.start_day())
}

/// Effective output format: `--format` unless left on auto, then config
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|name| OutputFormat::from_str(name, true).ok())
        .unwrap_or(OutputFormat::Auto)
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
