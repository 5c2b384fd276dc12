//! Hotelbooks statement runner
//!
//! Reads a batch of statement events, applies them, and writes the posted
//! entries, statements and reconciliation report as JSON.

mod input;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hotelbooks_core::statements::{EventApplier, StatementOutput, apply_by_entity};
use hotelbooks_shared::config::LoggingConfig;
use hotelbooks_shared::{AppConfig, AppError};

/// Exit code when the statements do not reconcile.
const EXIT_UNRECONCILED: u8 = 2;
/// Exit code when events were rejected and the run is configured to fail on it.
const EXIT_POSTING_ERRORS: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "hotelbooks")]
#[command(about = "Apply statement events and produce reconciled financial statements")]
struct Cli {
    /// Events file; overrides `input.events_path`.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Chart of accounts file; overrides `input.chart_path`.
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Output file; overrides `output.path`.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Keep separate books per entity.
    #[arg(long)]
    by_entity: bool,
}

/// Summary of a run used to pick the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    all_passed: bool,
    has_posting_errors: bool,
}

impl RunSummary {
    fn of<'a>(outputs: impl IntoIterator<Item = &'a StatementOutput>) -> Self {
        outputs.into_iter().fold(
            Self {
                all_passed: true,
                has_posting_errors: false,
            },
            |acc, out| Self {
                all_passed: acc.all_passed && out.reconciliation.all_passed,
                has_posting_errors: acc.has_posting_errors || out.flags.has_posting_errors,
            },
        )
    }

    fn exit_status(self, fail_on_posting_errors: bool) -> u8 {
        if !self.all_passed {
            EXIT_UNRECONCILED
        } else if self.has_posting_errors && fail_on_posting_errors {
            EXIT_POSTING_ERRORS
        } else {
            0
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return exit_code_for(&err);
        }
    };

    init_tracing(&config.logging);

    let cli = Cli::parse();
    match run(&cli, &config) {
        Ok(code) => code,
        Err(err) => {
            error!(error = ?err, "Statement run failed");
            err.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, exit_code_for)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays clean for the JSON output
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn exit_code_for(err: &AppError) -> ExitCode {
    u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn run(cli: &Cli, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let events_path = match &cli.events {
        Some(path) => path.clone(),
        None => PathBuf::from(config.events_path()?),
    };
    let chart_path = cli
        .chart
        .clone()
        .or_else(|| config.input.chart_path.as_ref().map(PathBuf::from));
    let output_path = cli
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));

    let events = input::load_events(&events_path)
        .with_context(|| format!("loading events from {}", events_path.display()))?;
    let registry = input::load_registry(chart_path.as_deref(), &config.input)
        .context("loading chart of accounts")?;
    info!(
        events = events.len(),
        accounts = registry.len(),
        precision = config.rounding.precision,
        bankers_rounding = config.rounding.bankers_rounding,
        "Loaded inputs"
    );

    let summary = if cli.by_entity {
        let outputs = apply_by_entity(&events, &registry, config.rounding);
        write_output(&outputs, output_path.as_deref(), config.output.pretty)?;
        RunSummary::of(outputs.values())
    } else {
        let output = EventApplier::apply(&events, &registry, config.rounding);
        write_output(&output, output_path.as_deref(), config.output.pretty)?;
        RunSummary::of([&output])
    };

    if !summary.all_passed {
        warn!("Statements do not reconcile");
    }
    if summary.has_posting_errors {
        warn!("Some events were rejected as unbalanced");
    }
    Ok(ExitCode::from(
        summary.exit_status(config.output.fail_on_posting_errors),
    ))
}

fn write_output<T: Serialize>(
    value: &T,
    path: Option<&std::path::Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(AppError::from)?;

    match path {
        Some(path) => {
            fs::write(path, json)
                .map_err(AppError::from)
                .with_context(|| format!("writing statements to {}", path.display()))?;
            info!(path = %path.display(), "Wrote statements");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(AppError::from)?;
        }
    }
    Ok(())
}
