//! `qcf yymm` command - fiscal week code to calendar year/month

use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{load_config, output_format, start_day};
use crate::cli::output::{self, Rows};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::fiscal::fiscal_week_to_year_month;

#[derive(clap::Args, Debug)]
pub struct YymmArgs {
    /// Six-digit fiscal week code, YYYYWW (e.g. 202501)
    pub code: String,
}

#[derive(Debug, Serialize)]
struct YymmInfo<'a> {
    code: &'a str,
    yymm: String,
}

pub fn run(args: YymmArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global);
    let yymm = fiscal_week_to_year_month(&args.code, start_day(global, &config))?;

    let format = output_format(global, &config);
    if format == OutputFormat::Auto {
        println!("{}", yymm);
        return Ok(());
    }

    let mut rows = Rows::new(["code", "yymm"]);
    rows.push([args.code.clone(), yymm.clone()]);
    output::print(
        format,
        &rows,
        &YymmInfo {
            code: &args.code,
            yymm,
        },
    )
}
