mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod stats;
mod table;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::config::{ProjectMode, ReportConfig, StatisticKind};
use crate::input::load_table;
use crate::pipeline::stage4_report::write_reports;

#[derive(Debug, Parser)]
#[command(name = "calkpi", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the KPI report sheets for one telemetry table.
    Run(RunArgs),
}

#[derive(Debug, Clone, clap::Args)]
struct RunArgs {
    /// Telemetry table (.tsv or .csv, optionally .gz).
    #[arg(long)]
    input: PathBuf,
    /// Output directory for sheet TSVs and summary.json.
    #[arg(long)]
    out: PathBuf,
    /// JSON report configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Scenario catalog; overrides the config file.
    #[arg(long, value_enum)]
    project: Option<ProjectMode>,
    /// Statistic for every sheet; overrides the config file.
    #[arg(long, value_enum)]
    statistic: Option<StatisticKind>,
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    logging::init(args.verbose);

    if let Err(err) = run(&args) {
        eprintln!("{}", error_chain(err.as_ref()));
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    let table = load_table(&args.input)?;
    let summary = write_reports(&table, &config, &input_name(&args.input), &args.out)?;

    let aborted = summary.n_aborted();
    if aborted > 0 {
        error!(aborted, "sheets stopped early, see summary.json");
        return Err(format!("{aborted} sheet(s) aborted").into());
    }
    info!(out = %args.out.display(), sheets = summary.sheets.len(), "report written");
    Ok(())
}

fn resolve_config(args: &RunArgs) -> Result<ReportConfig, error::ReportError> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(mode) = args.project {
        config.mode = mode;
    }
    if let Some(statistic) = args.statistic {
        for sheet in &mut config.sheets {
            sheet.statistic = statistic;
        }
    }
    config.validate()?;
    Ok(config)
}

fn input_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
