//! Radiator Activity Sensing
//!
//! Command-line front end: reads a JSON array of temperature samples and
//! prints the inferred heater-on intervals as JSON.
//!
//! This is the entry point for standalone use. For library use, see lib.rs.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use radiator_sensing::{
    activity_flags, total_active, DetectorConfig, Interval, RadiatorDetector, Sample,
};

#[derive(Parser, Debug)]
#[command(
    name = "radiator-sensing",
    version,
    about = "Infer radiator activity from temperature samples"
)]
struct Cli {
    /// JSON array of `{"timestamp", "temperature"}` samples, sorted by time. `-` reads stdin.
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// JSON file overriding the detector heuristics.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Clustering timeout in minutes (overrides the config file).
    #[arg(short, long)]
    timeout_minutes: Option<i64>,

    /// Include one heater-on flag per input sample.
    #[arg(long)]
    with_flags: bool,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Report {
    intervals: Vec<Interval>,
    activation_points: usize,
    total_active_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<Vec<bool>>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(timeout) = cli.timeout_minutes {
        config.clustering.timeout_minutes = timeout;
    }

    let samples = load_samples(&cli.input)?;
    info!("loaded {} samples from {}", samples.len(), cli.input.display());

    let detector = RadiatorDetector::new(config).context("invalid detector configuration")?;
    let detection = detector.analyze(&samples).context("radiator detection failed")?;
    info!("detected {} heater-on intervals", detection.intervals.len());

    let report = Report {
        total_active_minutes: total_active(&detection.intervals).num_minutes(),
        activation_points: detection.activation_points.len(),
        flags: cli
            .with_flags
            .then(|| activity_flags(&samples, &detection.intervals)),
        intervals: detection.intervals,
    };

    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}

fn load_config(path: &Path) -> Result<DetectorConfig> {
    let file =
        File::open(path).with_context(|| format!("failed to open config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    let mut raw = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read samples from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut raw))
            .with_context(|| format!("failed to read samples from {}", path.display()))?;
    }
    serde_json::from_str(&raw).context("failed to parse samples")
}
