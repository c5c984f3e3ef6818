//! `qcf init` command - Initialize a new QCF project

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;

use crate::core::fiscal::StartDay;
use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Station code to record in the project config
    #[arg(long)]
    pub station: Option<String>,

    /// Weekday fiscal weeks start on (0-6, Sunday = 0, or a name)
    #[arg(long = "week-start")]
    pub week_start: Option<StartDay>,

    /// Overwrite the config of an existing .qcf/ directory
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = match Project::init(&path, args.force) {
        Ok(project) => project,
        Err(ProjectError::AlreadyExists(root)) => {
            println!(
                "{} QCF project already exists at {}",
                style("!").yellow(),
                style(root.display()).cyan()
            );
            println!("Use {} to overwrite its config.", style("--force").yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.station.is_some() || args.week_start.is_some() {
        let mut config = fs::read_to_string(project.config_path()).into_diagnostic()?;
        if let Some(day) = args.week_start {
            config = config.replace(
                "fiscal_year_start_day: 6",
                &format!("fiscal_year_start_day: {}", day.index()),
            );
        }
        if let Some(station) = &args.station {
            config = config.replace("# station: \"\"", &format!("station: {}", station));
        }
        fs::write(project.config_path(), config).into_diagnostic()?;
    }

    println!(
        "{} Initialized QCF project at {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!("  {} Show this week's fiscal week", style("qcf week").yellow());
    println!(
        "  {} Issue an inspection number",
        style("qcf inspno new --station IQA").yellow()
    );
    println!(
        "  {} Summarise inspection records",
        style("qcf report weekly --input records.csv").yellow()
    );

    Ok(())
}
