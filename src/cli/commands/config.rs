//! `qcf config` command - Configuration management
//!
//! Provides commands to view and modify QCF configuration.

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::helpers::load_config;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::fiscal::StartDay;
use crate::core::project::Project;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration values
    Show(ShowArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset (remove) a configuration value
    Unset(UnsetArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., station, fiscal_year_start_day)
    pub key: String,

    /// Value to set
    pub value: String,

    /// Set in global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

#[derive(clap::Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key to remove
    pub key: String,

    /// Remove from global (user) config instead of project config
    #[arg(long, short = 'g')]
    pub global: bool,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    (
        "fiscal_year_start_day",
        "Weekday fiscal weeks start on, 0 (Sunday) to 6 (Saturday)",
    ),
    ("station", "Station code for new inspection numbers"),
    ("running_width", "Digits in the running part of inspection numbers"),
    (
        "default_format",
        "Default output format (table, tsv, csv, json, yaml, md)",
    ),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Set(args) => run_set(args, global),
        ConfigCommands::Unset(args) => run_unset(args, global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);

    if let Some(key) = &args.key {
        check_key(key)?;
        return match get_config_value(&config, key) {
            Some(v) => {
                println!("{}", v);
                Ok(())
            }
            None => Err(miette::miette!("Key '{}' is not set", key)),
        };
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        print_config_value(key, get_config_value(&config, key).as_deref());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags (--start-day, --format)");
    println!("  2. Environment variables (QCF_START_DAY, QCF_STATION, QCF_FORMAT)");
    println!("  3. Project config (.qcf/config.yaml)");
    println!("  4. Global config (~/.config/qcf/config.yaml)");

    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    check_key(&args.key)?;
    let value = parse_value(&args.key, &args.value)?;

    let config_path = if args.global {
        get_global_config_path()?
    } else {
        get_project_config_path(global)?
    };

    let mut config_map = read_mapping(&config_path)?;
    config_map.insert(serde_yml::Value::String(args.key.clone()), value);

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Set {} {} {} in {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        style("→").dim(),
        style(&args.value).yellow(),
        scope
    );

    Ok(())
}

fn run_unset(args: UnsetArgs, global: &GlobalOpts) -> Result<()> {
    let config_path = if args.global {
        get_global_config_path()?
    } else {
        get_project_config_path(global)?
    };

    if !config_path.exists() {
        return Err(miette::miette!(
            "Config file does not exist: {}",
            config_path.display()
        ));
    }

    let mut config_map = read_mapping(&config_path)?;
    let removed = config_map
        .remove(serde_yml::Value::String(args.key.clone()))
        .is_some();
    if !removed {
        return Err(miette::miette!("Key '{}' not found in config", args.key));
    }

    let yaml = serde_yml::to_string(&config_map).into_diagnostic()?;
    fs::write(&config_path, yaml).into_diagnostic()?;

    let scope = if args.global { "global" } else { "project" };
    println!(
        "{} Removed {} from {} config",
        style("✓").green(),
        style(&args.key).cyan(),
        scope
    );

    Ok(())
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    let global_path = get_global_config_path()?;

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    print_exists(global_path.exists());

    println!();
    match get_project_config_path(global) {
        Ok(path) => {
            println!("  {} {}", style("Project:").cyan(), path.display());
            print_exists(path.exists());
        }
        Err(_) => println!(
            "  {} {}",
            style("Project:").cyan(),
            style("(not in a QCF project)").dim()
        ),
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<24} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Use 'qcf config set <key> <value>' to set a value.").dim()
    );

    Ok(())
}

// Helper functions

fn check_key(key: &str) -> Result<()> {
    if VALID_KEYS.iter().any(|(k, _)| *k == key) {
        Ok(())
    } else {
        Err(miette::miette!(
            help = "run 'qcf config keys' to list valid keys",
            "Unknown configuration key '{}'",
            key
        ))
    }
}

/// Validate a raw value for `key` and convert it to the YAML type stored on disk
fn parse_value(key: &str, raw: &str) -> Result<serde_yml::Value> {
    let value = match key {
        "fiscal_year_start_day" => {
            let day: StartDay = raw.parse()?;
            serde_yml::Value::Number(u64::from(day.index()).into())
        }
        "running_width" => {
            let width: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|w| (1..=9).contains(w))
                .ok_or_else(|| miette::miette!("running_width must be a number from 1 to 9"))?;
            serde_yml::Value::Number(width.into())
        }
        "default_format" => {
            let format = OutputFormat::from_str(raw, true)
                .map_err(|e| miette::miette!("invalid default_format '{}': {}", raw, e))?;
            let name = format
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_else(|| raw.to_string());
            serde_yml::Value::String(name)
        }
        "station" => {
            let station = raw.trim().to_uppercase();
            if station.is_empty() || !station.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(miette::miette!(
                    "station codes are one or more ASCII letters or digits"
                ));
            }
            serde_yml::Value::String(station)
        }
        _ => serde_yml::Value::String(raw.to_string()),
    };
    Ok(value)
}

fn read_mapping(path: &PathBuf) -> Result<serde_yml::Mapping> {
    if !path.exists() {
        return Ok(serde_yml::Mapping::new());
    }
    let content = fs::read_to_string(path).into_diagnostic()?;
    match serde_yml::from_str::<serde_yml::Value>(&content) {
        Ok(serde_yml::Value::Mapping(map)) => Ok(map),
        // Empty or comment-only files parse as null
        Ok(serde_yml::Value::Null) => Ok(serde_yml::Mapping::new()),
        Ok(_) => Err(miette::miette!(
            "{} does not contain a YAML mapping",
            path.display()
        )),
        Err(e) => Err(miette::miette!("invalid YAML in {}: {}", path.display(), e)),
    }
}

fn get_global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

fn get_project_config_path(global: &GlobalOpts) -> Result<PathBuf> {
    let project = match &global.project {
        Some(root) => Project::discover_from(root)?,
        None => Project::discover()?,
    };
    Ok(project.config_path())
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "fiscal_year_start_day" => config.fiscal_year_start_day.map(|d| d.to_string()),
        "station" => config.station.clone(),
        "running_width" => config.running_width.map(|w| w.to_string()),
        "default_format" => config.default_format.clone(),
        _ => None,
    }
}

fn print_config_value(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("  {}: {}", style(key).cyan(), style(v).yellow());
    } else {
        println!("  {}: {}", style(key).cyan(), style("(not set)").dim());
    }
}

fn print_exists(exists: bool) {
    if exists {
        println!("         {}", style("(exists)").green());
    } else {
        println!("         {}", style("(not created)").dim());
    }
}
