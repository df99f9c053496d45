// demos/demo.rs
use sde_paths::analytics::{ensemble_stats, ou_analytic};
use sde_paths::grid::TimeGrid;
use sde_paths::math_utils::Timer;
use sde_paths::models::{OuProcess, Process, ProcessKind};
use sde_paths::rng::SeededNoise;
use sde_paths::simulation::generate_ensemble;

fn main() {
    println!("Running sde-paths demo\n");

    let trajectories = 20_000;
    let points = 201;
    let dt = 0.01;
    let ou = OuProcess::new(0.5, 2.0, 0.3, 1.5).expect("Valid parameters");
    let grid = TimeGrid::new(points, dt).expect("Valid grid");
    let horizon = grid.horizon();

    for kind in ProcessKind::ALL {
        let process = Process::new(kind, ou);
        let mut noise = SeededNoise::new(12345);

        let mut timer = Timer::new();
        timer.start();
        let paths = generate_ensemble(&process, trajectories, &grid, &mut noise)
            .expect("Valid configuration");
        let elapsed = timer.elapsed_ms();

        let (mean, variance) = ensemble_stats::terminal_moments(&paths).expect("Enough paths");
        let (exact_mean, exact_variance) = match kind {
            ProcessKind::Brownian => (0.0, ou_analytic::brownian_variance(horizon)),
            _ => (
                ou_analytic::ou_mean(&ou, horizon),
                ou_analytic::ou_variance(&ou, horizon),
            ),
        };

        println!("--- {} ({}) ---", kind, process_label(kind));
        println!("Trajectories: {} x {} points ({:.1} ms)", trajectories, points, elapsed);
        println!("E[X(T)]:   simulated {:.5}, exact {:.5}", mean, exact_mean);
        println!("Var[X(T)]: simulated {:.5}, exact {:.5}\n", variance, exact_variance);
    }

    // Explicit scheme past its stability limit
    let stiff = OuProcess::new(0.0, 30.0, 0.3, 1.0).expect("Valid parameters");
    let dt = 0.1;
    println!("--- Stability at theta*dt = {} ---", stiff.theta * dt);
    println!(
        "Explicit factor {:.2} (stable: {}), implicit factor {:.4}",
        ou_analytic::explicit_amplification(stiff.theta, dt),
        ou_analytic::explicit_is_stable(stiff.theta, dt),
        ou_analytic::implicit_amplification(stiff.theta, dt).expect("Non-degenerate")
    );

    let grid = TimeGrid::new(12, dt).expect("Valid grid");
    for kind in [ProcessKind::OrnsteinUhlenbeck, ProcessKind::OrnsteinUhlenbeckExplicit] {
        let mut noise = SeededNoise::new(1);
        let paths = generate_ensemble(&Process::new(kind, stiff), 1, &grid, &mut noise)
            .expect("Valid configuration");
        let last = paths[[0, grid.len() - 1]];
        println!("{:>3}: U(T) = {:.4e}", kind, last);
    }
}

fn process_label(kind: ProcessKind) -> &'static str {
    match kind {
        ProcessKind::Brownian => "Brownian motion",
        ProcessKind::OrnsteinUhlenbeck => "Ornstein-Uhlenbeck, implicit",
        ProcessKind::OrnsteinUhlenbeckExplicit => "Ornstein-Uhlenbeck, explicit",
    }
}
