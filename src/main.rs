//! sde-paths command line
//!
//! Any required setting (model, trajectory count, point count, time step)
//! that is neither given as a flag nor in `--config` is asked for on stdin.

use anyhow::{bail, Context, Result};
use clap::Parser;
use sde_paths::config::RunSettings;
use sde_paths::models::ProcessKind;
use sde_paths::output;
use sde_paths::{prompt, simulation};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simulate Brownian motion and Ornstein-Uhlenbeck trajectories to CSV
#[derive(Parser, Debug)]
#[command(name = "sde-paths")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model: B (Brownian), OU (Ornstein-Uhlenbeck, implicit), OUE (explicit)
    #[arg(short, long)]
    model: Option<ProcessKind>,

    /// Number of trajectories to generate
    #[arg(short = 'M', long, allow_negative_numbers = true)]
    trajectories: Option<i64>,

    /// Number of points per trajectory
    #[arg(short = 'N', long, allow_negative_numbers = true)]
    points: Option<i64>,

    /// Time step
    #[arg(long, allow_negative_numbers = true)]
    dt: Option<f64>,

    /// OU long-run mean [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    mu: Option<f64>,

    /// OU mean-reversion rate [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    theta: Option<f64>,

    /// OU volatility [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    sigma: Option<f64>,

    /// OU initial value [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    u0: Option<f64>,

    /// Seed for a reproducible run; fresh OS entropy per trajectory otherwise
    #[arg(long)]
    seed: Option<u64>,

    /// Output file [default: ./output.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a key,value run summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Prefix each line with a label column
    #[arg(long)]
    row_labels: bool,

    /// Do not end each line with a comma
    #[arg(long)]
    no_trailing_delimiter: bool,

    /// TOML file with run settings; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail instead of prompting for missing settings
    #[arg(long)]
    no_prompt: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> RunSettings {
        RunSettings {
            model: self.model,
            trajectories: self.trajectories,
            points: self.points,
            dt: self.dt,
            mu: self.mu,
            theta: self.theta,
            sigma: self.sigma,
            u0: self.u0,
            seed: self.seed,
            output: self.output.clone(),
            summary: self.summary.clone(),
            trailing_delimiter: self.no_trailing_delimiter.then_some(false),
            row_labels: self.row_labels.then_some(true),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => RunSettings::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RunSettings::default(),
    }
    .merge(cli.settings());

    if !settings.missing().is_empty() {
        if cli.no_prompt {
            bail!("missing required settings: {}", settings.missing().join(", "));
        }
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stdout();
        settings = prompt::fill_missing(settings, &mut input, &mut prompt_out)
            .context("reading run settings")?;
    }

    let config = settings.resolve().context("invalid run settings")?;

    let mut noise = simulation::noise_for(&config);
    let summary = simulation::run_to_file(&config, noise.as_mut())
        .with_context(|| format!("simulating {} trajectories", config.model))?;

    info!(
        output = %config.output.display(),
        trajectories = summary.trajectories,
        points = summary.points,
        "trajectories written"
    );

    if let Some(path) = &config.summary {
        output::write_summary_to_csv(path, &summary.to_rows(&config))?;
        info!(summary = %path.display(), "summary written");
    }

    Ok(())
}
