// demos/error_handling_demo.rs
use sde_paths::config::RunSettings;
use sde_paths::error::SdeError;
use sde_paths::models::{OuProcess, ProcessKind, StochasticIntegrator};
use sde_paths::output::{CsvLayout, CsvSink};
use sde_paths::rng::{ReplayNoise, SeededNoise};
use sde_paths::solvers::OuImplicit;

fn main() {
    println!("Error Handling Demo for sde-paths");
    println!("=================================\n");

    // Test 1: Unknown model selector
    println!("1. Testing unknown model selector...");

    match "GBM".parse::<ProcessKind>() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Negative trajectory count
    println!("\n2. Testing negative trajectory count...");

    let negative = RunSettings {
        model: Some(ProcessKind::Brownian),
        trajectories: Some(-3),
        points: Some(100),
        dt: Some(0.01),
        ..Default::default()
    };

    match negative.resolve() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Missing required setting
    println!("\n3. Testing missing time step...");

    let missing = RunSettings {
        model: Some(ProcessKind::OrnsteinUhlenbeck),
        trajectories: Some(3),
        points: Some(100),
        ..Default::default()
    };

    match missing.resolve() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Degenerate implicit denominator
    println!("\n4. Testing theta = -1/dt for the implicit scheme...");

    let dt = 0.25;
    let degenerate = OuProcess::new(0.0, -1.0 / dt, 1.0, 0.0).expect("Finite parameters");
    let mut noise = SeededNoise::new(42);

    match OuImplicit::new(degenerate).simulate(10, dt, &mut noise) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(SdeError::NumericDegenerate { method, reason }) => {
            println!("   ✓ Caught NumericDegenerate in {}: {}", method, reason);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    // Test 5: Non-finite parameter
    println!("\n5. Testing non-finite volatility...");

    match OuProcess::new(0.0, 1.0, f64::NAN, 0.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(SdeError::InvalidArgument {
            parameter,
            value,
            constraint,
        }) => {
            println!("   ✓ Caught InvalidArgument: {} = {} ({})", parameter, value, constraint);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    // Test 6: Exhausted replay source
    println!("\n6. Testing exhausted replay noise...");

    let mut replay = ReplayNoise::new(vec![vec![0.0, 1.0, -1.0]]);
    let process = OuImplicit::new(OuProcess::default());
    let first = process.simulate(3, 0.5, &mut replay);
    println!("   ✓ First trajectory: {:?}", first.map(|p| p.len()));
    match process.simulate(3, 0.5, &mut replay) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Unwritable output path
    println!("\n7. Testing output into a missing directory...");

    match CsvSink::create("/nonexistent-dir/output.csv", CsvLayout::default()) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
