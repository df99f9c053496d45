//! Run driver: builds the time grid, generates every trajectory into an
//! in-memory ensemble, then hands grid and trajectories to a sink.

use crate::analytics::{ensemble_stats, ou_analytic};
use crate::config::RunConfig;
use crate::error::{SdeError, SdeResult};
use crate::grid::TimeGrid;
use crate::math_utils::Timer;
use crate::models::{Process, ProcessKind, StochasticIntegrator};
use crate::output::{CsvSink, TrajectorySink};
use crate::rng::{EntropyNoise, NoiseSource, SeededNoise};
use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayView1};
use tracing::{debug, info, warn};

/// All trajectories of one run, one row per trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    pub grid: TimeGrid,
    pub paths: Array2<f64>,
}

impl Ensemble {
    pub fn trajectories(&self) -> usize {
        self.paths.nrows()
    }

    pub fn trajectory(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.paths.nrows()).then(|| self.paths.row(index))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub model: ProcessKind,
    pub trajectories: usize,
    pub points: usize,
    pub dt: f64,
    pub elapsed_ms: f64,
    /// Cross-sectional moments of the last grid point; `None` below two trajectories
    pub terminal_mean: Option<f64>,
    pub terminal_variance: Option<f64>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Key/value rows for [`crate::output::write_summary_to_csv`].
    pub fn to_rows(&self, config: &RunConfig) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("model", self.model.to_string()),
            ("trajectories", self.trajectories.to_string()),
            ("points", self.points.to_string()),
            ("dt", self.dt.to_string()),
        ];
        if self.model.is_ornstein_uhlenbeck() {
            rows.push(("mu", config.ou.mu.to_string()));
            rows.push(("theta", config.ou.theta.to_string()));
            rows.push(("sigma", config.ou.sigma.to_string()));
            rows.push(("u0", config.ou.u0.to_string()));
        }
        rows.push((
            "seed",
            config
                .seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string()),
        ));
        if let (Some(mean), Some(var)) = (self.terminal_mean, self.terminal_variance) {
            rows.push(("terminal_mean", format!("{:.6}", mean)));
            rows.push(("terminal_variance", format!("{:.6}", var)));
        }
        rows.push(("elapsed_ms", format!("{:.3}", self.elapsed_ms)));
        rows.push((
            "generated_at",
            self.finished_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ));
        rows
    }
}

/// Noise source matching the run configuration.
pub fn noise_for(config: &RunConfig) -> Box<dyn NoiseSource> {
    match config.seed {
        Some(seed) => Box::new(SeededNoise::new(seed)),
        None => Box::new(EntropyNoise::new()),
    }
}

/// Generate `trajectories` paths on `grid`, each from its own noise batch.
pub fn generate_ensemble(
    process: &dyn StochasticIntegrator,
    trajectories: usize,
    grid: &TimeGrid,
    noise: &mut dyn NoiseSource,
) -> SdeResult<Array2<f64>> {
    let points = grid.len();
    let mut paths = Array2::zeros((trajectories, points));

    for (j, mut row) in paths.rows_mut().into_iter().enumerate() {
        let path = process.simulate(points, grid.dt(), noise)?;
        if path.len() != points {
            return Err(SdeError::NumericDegenerate {
                method: process.name().to_string(),
                reason: format!("produced {} points, expected {}", path.len(), points),
            });
        }
        row.assign(&ArrayView1::from(&path));
        debug!(trajectory = j, terminal = ?path.last(), "trajectory generated");
    }

    Ok(paths)
}

/// Validate `config` and generate its ensemble in memory.
pub fn simulate(config: &RunConfig, noise: &mut dyn NoiseSource) -> SdeResult<Ensemble> {
    config.validate()?;
    let grid = TimeGrid::new(config.points, config.dt)?;
    let process = Process::new(config.model, config.ou);

    if config.model == ProcessKind::OrnsteinUhlenbeckExplicit
        && !ou_analytic::explicit_is_stable(config.ou.theta, config.dt)
    {
        warn!(
            theta = config.ou.theta,
            dt = config.dt,
            factor = ou_analytic::explicit_amplification(config.ou.theta, config.dt),
            "explicit scheme is outside its stability region |1 - theta*dt| <= 1; paths will diverge"
        );
    }

    info!(
        model = %config.model,
        trajectories = config.trajectories,
        points = config.points,
        dt = config.dt,
        "generating {}",
        process.name()
    );

    let paths = generate_ensemble(&process, config.trajectories, &grid, noise)?;
    Ok(Ensemble { grid, paths })
}

/// Emit the grid once, then every trajectory in order.
pub fn write_ensemble<S: TrajectorySink + ?Sized>(ensemble: &Ensemble, sink: &mut S) -> SdeResult<()> {
    sink.write_time_grid(ensemble.grid.as_slice())?;
    for (j, row) in ensemble.paths.rows().into_iter().enumerate() {
        match row.as_slice() {
            Some(values) => sink.write_trajectory(j, values)?,
            None => sink.write_trajectory(j, &row.to_vec())?,
        }
    }
    sink.finish()
}

/// Simulate the configured ensemble and write it to `sink`.
pub fn run<S: TrajectorySink + ?Sized>(
    config: &RunConfig,
    noise: &mut dyn NoiseSource,
    sink: &mut S,
) -> SdeResult<RunSummary> {
    let timer = Timer::new();

    let ensemble = simulate(config, noise)?;
    write_ensemble(&ensemble, sink)?;

    Ok(summarize(config, &ensemble, timer.elapsed_ms()))
}

/// Like [`run`], writing to `config.output`.
///
/// The file is opened only once every trajectory has been generated, so a
/// failed run leaves any existing output untouched.
pub fn run_to_file(config: &RunConfig, noise: &mut dyn NoiseSource) -> SdeResult<RunSummary> {
    let timer = Timer::new();

    let ensemble = simulate(config, noise)?;
    let mut sink = CsvSink::create(&config.output, config.layout)?;
    write_ensemble(&ensemble, &mut sink)?;

    Ok(summarize(config, &ensemble, timer.elapsed_ms()))
}

fn summarize(config: &RunConfig, ensemble: &Ensemble, elapsed_ms: f64) -> RunSummary {
    let (terminal_mean, terminal_variance) = match ensemble_stats::terminal_moments(&ensemble.paths) {
        Ok((mean, var)) => (Some(mean), Some(var)),
        Err(_) => (None, None),
    };

    let summary = RunSummary {
        model: config.model,
        trajectories: ensemble.trajectories(),
        points: ensemble.grid.len(),
        dt: config.dt,
        elapsed_ms,
        terminal_mean,
        terminal_variance,
        finished_at: Utc::now(),
    };

    info!(
        elapsed_ms = summary.elapsed_ms,
        terminal_mean = ?summary.terminal_mean,
        "run complete"
    );
    summary
}
