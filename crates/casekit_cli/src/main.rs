//! casekit - convert a mind-map outline into a test-case spreadsheet

use std::path::PathBuf;

use anyhow::{Context, Result};
use casekit_cli::{SpecConstantOverrides, SpecRunOptions, resolve_case_constants, run_generate};
use casekit_outline::{CaseClock, FixedClock, SystemClock};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "casekit")]
#[command(
    author,
    version,
    about = "Convert a mind-map outline into a test-case spreadsheet"
)]
struct Cli {
    /// Outline file (.xmind, or its decoded JSON form)
    input: PathBuf,

    /// Output workbook (default: next to the input, named after its prefix and the author)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with case constants (sub_system, um_code, is_trans, significance, author)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subsystem label
    #[arg(long)]
    sub_system: Option<String>,

    /// Author UM code
    #[arg(long)]
    um_code: Option<String>,

    /// Transformed-case flag
    #[arg(long)]
    is_trans: Option<String>,

    /// Significance level
    #[arg(long)]
    significance: Option<String>,

    /// Author name used in the default output file name
    #[arg(long)]
    author: Option<String>,

    /// Date stamped into every record, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Skip the formatting pass
    #[arg(long)]
    no_beautify: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{value}: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let constants = resolve_case_constants(
        cli.config.as_deref(),
        SpecConstantOverrides {
            sub_system: cli.sub_system,
            um_code: cli.um_code,
            is_trans: cli.is_trans,
            significance: cli.significance,
            author: cli.author,
        },
    )
    .context("failed to resolve case constants")?;

    let mut opts = SpecRunOptions::new(cli.input, constants);
    opts.output = cli.output;
    opts.if_beautify = !cli.no_beautify;

    let clock: Box<dyn CaseClock> = match cli.date {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    let report = run_generate(&opts, clock.as_ref())?;
    println!(
        "{} cases -> {} ({:.3}s)",
        report.n_cases,
        report.path_out.display(),
        report.elapsed_secs
    );
    Ok(())
}
