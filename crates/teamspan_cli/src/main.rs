//! CLI entry point.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and run the collaboration analysis.
//! - Map outcomes to output and exit codes.
//!
//! # Invariants
//! - A missing input file prints an informational message and exits 0.
//! - Malformed input exits non-zero with the loader error on stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;
use teamspan_core::{
    default_log_level, init_logging, parse_date, render_best, render_ranking,
    CollaborationReport, CollaborationService, CsvFileSource, LoadOptions,
};

const DEFAULT_INPUT: &str = "EmployeesInfo.csv";
const STDERR_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Command-line arguments for teamspan
#[derive(Parser, Debug)]
#[command(name = "teamspan")]
#[command(about = "Finds the pair of employees who worked together the longest")]
#[command(version)]
struct Args {
    /// Comma-separated assignments: employeeId, projectId, startDate, endDate
    #[arg(default_value = DEFAULT_INPUT, env = "TEAMSPAN_INPUT")]
    input: PathBuf,

    /// Date substituted for missing end dates (YYYY-MM-DD); defaults to today
    #[arg(long, env = "TEAMSPAN_TODAY", value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "TEAMSPAN_FORMAT")]
    format: OutputFormat,

    /// List the N longest-working pairs instead of only the best one (0 = all in JSON)
    #[arg(long, default_value_t = 0)]
    top: usize,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "TEAMSPAN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr when unset
    #[arg(long, env = "TEAMSPAN_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let stdout = std::io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one analysis and writes the rendered result to `out`.
///
/// A missing input file is not an error: the informational message is
/// written and `Ok` is returned so the process exits 0.
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let level = args.log_level.as_deref().unwrap_or(match args.log_dir {
        Some(_) => default_log_level(),
        None => STDERR_LOG_LEVEL,
    });
    init_logging(level, args.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let options = args
        .today
        .map(LoadOptions::new)
        .unwrap_or_else(LoadOptions::for_today);
    let service = CollaborationService::new(CsvFileSource::new(&args.input, options));

    let report = match service.analyze() {
        Ok(report) => report,
        Err(err) if err.is_source_unavailable() => {
            info!("event=input_missing module=cli status=skipped error={err}");
            writeln!(out, "{}", missing_input_message(&args.input))?;
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to load `{}`", args.input.display()))
        }
    };

    writeln!(out, "{}", render_output(report, args.format, args.top)?)?;
    Ok(())
}

/// Renders the report; `top = 0` keeps the full ranking.
fn render_output(
    mut report: CollaborationReport,
    format: OutputFormat,
    top: usize,
) -> Result<String> {
    if top > 0 {
        report.truncate_ranking(top);
    }
    let rendered = match format {
        OutputFormat::Text if top > 0 => render_ranking(&report.ranking),
        OutputFormat::Text => render_best(report.best.as_ref()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        }
    };
    Ok(rendered)
}

fn missing_input_message(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    format!("Please add {name} in the application folder.")
}

fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("expected a YYYY-MM-DD date, got `{raw}`"))
}
