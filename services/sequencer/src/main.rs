//! Sequencer service.
//!
//! Reads a campaign config, scans the scene archive, and produces a
//! before/during/after comparison figure for each configured flight.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use scene_ops::SceneCatalog;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod pipeline;

use config::CampaignConfig;
use pipeline::run_flight;

#[derive(Parser, Debug)]
#[command(name = "sequencer")]
#[command(about = "Flight comparison figures from GOES band-13 imagery")]
struct Args {
    /// Campaign config file (YAML)
    #[arg(short, long, env = "SEQUENCER_CONFIG")]
    config: PathBuf,

    /// Process flights in parallel
    #[arg(long)]
    parallel: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to initialize logging");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(failed) if failed == 0 => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "Some flights failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Sequencer failed");
            ExitCode::FAILURE
        }
    }
}

/// Process every flight; returns the number of failures.
fn run(args: &Args) -> Result<usize> {
    let config = CampaignConfig::load(&args.config)?;
    info!(campaign = %config.name, flights = config.flights.len(), "Loaded campaign config");

    let catalog = SceneCatalog::scan_dir(&config.scene_dir, config.band)
        .with_context(|| format!("scanning {}", config.scene_dir.display()))?;
    info!(scenes = catalog.len(), band = config.band, "Scanned scene archive");

    let process = |flight: &config::FlightConfig| match run_flight(&config, &catalog, flight) {
        Ok(output) => {
            info!(
                flight = %output.id,
                figure = %output.figure.display(),
                animation = output.animation.is_some(),
                "Flight complete"
            );
            true
        }
        Err(e) => {
            error!(flight = %flight.id, error = %e, "Flight failed");
            false
        }
    };

    let failed = if args.parallel {
        config.flights.par_iter().filter(|f| !process(f)).count()
    } else {
        config.flights.iter().filter(|f| !process(f)).count()
    };

    Ok(failed)
}
