//! FrenoLab command line
//!
//! `generate` simulates a scripted ride and writes the braking dataset;
//! `report` loads a dataset and prints the aggregate stress analysis.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use freno_cli::{chart, report};
use freno_sim::{dataset, simulate, RideScenario};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "freno",
    version,
    about = "Synthetic motorcycle braking telemetry",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a ride and write the dataset CSV
    Generate(GenerateArgs),
    /// Load a dataset CSV and print the stress report
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Output CSV path
    #[arg(short, long, default_value = dataset::DEFAULT_DATASET_FILE, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Ride scenario JSON (omit for the built-in reference hour)
    #[arg(long, value_hint = ValueHint::FilePath)]
    scenario: Option<PathBuf>,

    /// Also render the ride chart PNG to this path
    #[arg(long, value_hint = ValueHint::FilePath)]
    chart: Option<PathBuf>,

    /// Print the stress report for the generated ride
    #[arg(long, action = ArgAction::SetTrue)]
    summary: bool,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Dataset CSV path
    #[arg(short, long, default_value = dataset::DEFAULT_DATASET_FILE, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Emit the report as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing on stderr so piped stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Report(args) => handle_report(args),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<()> {
    let scenario = match args.scenario.as_deref() {
        Some(path) => load_scenario(path)?,
        None => RideScenario::reference_hour(),
    };
    info!(
        duration_s = scenario.duration_s,
        events = scenario.events.len(),
        "simulating ride"
    );

    let samples = simulate(&scenario)?;
    dataset::write_csv(&samples, &args.output)?;
    info!(rows = samples.len(), path = %args.output.display(), "dataset written");

    if let Some(chart_path) = args.chart.as_deref() {
        // Chart output is best effort; a headless host without fonts
        // must not lose the dataset it just wrote
        match chart::render_ride_chart(&samples, chart_path) {
            Ok(()) => info!(path = %chart_path.display(), "chart written"),
            Err(err) => warn!("skipping chart {}: {:#}", chart_path.display(), err),
        }
    }

    if args.summary {
        print!("{}", report::RideReport::from_samples(&samples).render_text());
    }
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let samples = report::load_samples_or_empty(&args.input)?;
    let ride_report = report::RideReport::from_samples(&samples);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ride_report)?);
    } else {
        print!("{}", ride_report.render_text());
    }
    Ok(())
}

fn load_scenario(path: &Path) -> Result<RideScenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file {}", path.display()))?;
    let scenario: RideScenario = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid ride scenario", path.display()))?;
    Ok(scenario)
}
