use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use std::path::PathBuf;

mod config;
mod models;
mod schedule;
mod simulation;
mod output;
mod error;

use crate::config::Config;
use crate::simulation::SimulationRun;

#[derive(Parser)]
#[command(name = "adherence_sim")]
#[command(about = "Simulate one synthetic patient's medication adherence and well-being")]
struct Cli {
    /// Configuration file path (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Random seed for reproducibility, overrides the configured seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// First simulated day (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Number of days to simulate
    #[arg(short, long)]
    days: Option<u32>,

    /// Also write a Markdown report
    #[arg(short, long)]
    report: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::from_file(path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };

    if let Some(start_date) = cli.start_date {
        config.general.start_date = Some(start_date);
    }
    if let Some(days) = cli.days {
        config.general.duration_days = days;
    }

    let run = SimulationRun::new(config, cli.seed).context("Invalid simulation setup")?;
    let patient = run.patient();
    info!(
        "Simulating {} {} with {} treatments starting {}",
        patient.first_name,
        patient.last_name,
        patient.treatments.len(),
        run.start_date()
    );

    let log = run.run();
    info!(
        "Simulation completed: {} days, {}/{} intakes marked",
        log.days.len(),
        log.total_marked_intakes(),
        log.total_due_intakes()
    );

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory {:?}", cli.output))?;

    crate::output::save_results(&log, &cli.output)
        .with_context(|| format!("Failed to save results to {:?}", cli.output))?;
    if cli.report {
        crate::output::generate_report(&log, &cli.output)?;
    }
    info!("Results saved to {:?}", cli.output);

    Ok(())
}
