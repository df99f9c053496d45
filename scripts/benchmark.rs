// scripts/benchmark.rs
use anyhow::Context;
use sde_paths::analytics::{ensemble_stats, ou_analytic};
use sde_paths::grid::TimeGrid;
use sde_paths::math_utils::Timer;
use sde_paths::models::{OuProcess, Process, ProcessKind};
use sde_paths::rng::SeededNoise;
use sde_paths::simulation::generate_ensemble;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::process::Command;

/// `(label, value)` pairs describing the machine, printed and written as CSV comments.
fn host_header() -> Vec<(&'static str, String)> {
    let cpu = fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find_map(|line| line.strip_prefix("model name"))
                .and_then(|rest| rest.split(':').nth(1))
                .map(|name| name.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());
    let rustc = Command::new("rustc")
        .arg("--version")
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    vec![
        ("OS", format!("{} ({})", env::consts::OS, env::consts::ARCH)),
        ("CPU", cpu),
        ("Logical cores", num_cpus::get().to_string()),
        ("rustc", rustc),
        (
            "RUSTFLAGS",
            env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        ),
    ]
}

#[derive(Debug)]
struct BenchmarkResult {
    model: ProcessKind,
    trajectories: usize,
    points: usize,
    time_ms: f64,
    throughput_points_per_sec: f64,
    terminal_variance: f64,
    analytic_variance: f64,
}

impl BenchmarkResult {
    fn relative_error(&self) -> f64 {
        (self.terminal_variance - self.analytic_variance).abs() / self.analytic_variance
    }
}

fn run_integrator_benchmarks() -> anyhow::Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    let ou = OuProcess::new(0.0, 1.0, 0.5, 0.0)?;
    let dt = 0.01;
    let sizes = [(1_000, 1_000), (10_000, 1_000), (1_000, 10_000)];

    for &(trajectories, points) in &sizes {
        println!("Running benchmarks with {} x {}...", trajectories, points);
        let grid = TimeGrid::new(points, dt)?;

        for kind in ProcessKind::ALL {
            let process = Process::new(kind, ou);
            let mut noise = SeededNoise::new(42);

            let mut timer = Timer::new();
            timer.start();
            let paths = generate_ensemble(&process, trajectories, &grid, &mut noise)
                .with_context(|| format!("{} ensemble failed", kind))?;
            let time_ms = timer.elapsed_ms();

            let (_, terminal_variance) = ensemble_stats::terminal_moments(&paths)?;
            let analytic_variance = match kind {
                ProcessKind::Brownian => ou_analytic::brownian_variance(grid.horizon()),
                _ => ou_analytic::ou_variance(&ou, grid.horizon()),
            };

            results.push(BenchmarkResult {
                model: kind,
                trajectories,
                points,
                time_ms,
                throughput_points_per_sec: (trajectories * points) as f64 / (time_ms / 1000.0),
                terminal_variance,
                analytic_variance,
            });
        }
    }

    Ok(results)
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    host: &[(&str, String)],
    filename: &str,
) -> anyhow::Result<()> {
    let mut file = File::create(filename).with_context(|| format!("could not create {}", filename))?;

    for (label, value) in host {
        writeln!(file, "# {}: {}", label, value)?;
    }
    writeln!(
        file,
        "# Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([
        "Model",
        "Trajectories",
        "Points",
        "Time_ms",
        "Throughput_points_per_sec",
        "Terminal_Variance",
        "Analytic_Variance",
        "Relative_Error",
    ])?;
    for result in results {
        writer.write_record([
            result.model.selector().to_string(),
            result.trajectories.to_string(),
            result.points.to_string(),
            format!("{:.2}", result.time_ms),
            format!("{:.0}", result.throughput_points_per_sec),
            format!("{:.6}", result.terminal_variance),
            format!("{:.6}", result.analytic_variance),
            format!("{:.6}", result.relative_error()),
        ])?;
    }
    writer.flush()?;

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    println!("sde-paths Benchmark Suite");
    println!("=========================\n");

    let host = host_header();
    for (label, value) in &host {
        println!("  {}: {}", label, value);
    }
    println!();

    let results = run_integrator_benchmarks()?;

    println!("\n{:=<88}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<88}", "");
    println!(
        "{:<6} {:>8} {:>8} {:>12} {:>16} {:>10} {:>10} {:>10}",
        "Model", "Paths", "Points", "Time (ms)", "Points/sec", "Var", "Analytic", "Rel Error"
    );
    println!("{:-<88}", "");

    for result in &results {
        println!(
            "{:<6} {:>8} {:>8} {:>12.2} {:>16.0} {:>10.4} {:>10.4} {:>9.2}%",
            result.model,
            result.trajectories,
            result.points,
            result.time_ms,
            result.throughput_points_per_sec,
            result.terminal_variance,
            result.analytic_variance,
            result.relative_error() * 100.0
        );
    }

    println!("{:=<88}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&results, &host, &filename)?;

    println!("\nBenchmark complete!");
    println!("Reproduce with: cargo run --bin benchmark --release");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_header_fields() {
        let host = host_header();
        let labels: Vec<&str> = host.iter().map(|(label, _)| *label).collect();

        assert_eq!(labels, vec!["OS", "CPU", "Logical cores", "rustc", "RUSTFLAGS"]);
        assert!(host[0].1.starts_with(std::env::consts::OS));
        assert_eq!(host[2].1, num_cpus::get().to_string());
    }
}
