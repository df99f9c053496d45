// tests/solver_convergence_test.rs
use sde_paths::analytics::{ensemble_stats, ou_analytic};
use sde_paths::grid::TimeGrid;
use sde_paths::models::{BrownianMotion, OuProcess, StochasticIntegrator};
use sde_paths::rng::{NoiseSource, SeededNoise};
use sde_paths::simulation::generate_ensemble;
use sde_paths::solvers::{OuExplicit, OuImplicit};
use sde_paths::SdeError;

#[test]
fn test_brownian_increment_variance_converges_to_dt() {
    let dt = 0.25;
    let grid = TimeGrid::new(4, dt).unwrap();

    let mut errors = Vec::new();
    for (k, &num_paths) in [200usize, 2_000, 40_000].iter().enumerate() {
        let mut noise = SeededNoise::new(42 + k as u64);
        let paths = generate_ensemble(&BrownianMotion, num_paths, &grid, &mut noise).unwrap();

        let var = ensemble_stats::increment_variance(&paths, 1).unwrap();
        errors.push((var - dt).abs() / dt);
    }

    println!("\nBrownian increment variance relative errors: {:?}", errors);
    assert!(
        *errors.last().unwrap() < 0.03,
        "Increment variance relative error ({}) is too high",
        errors.last().unwrap()
    );
}

#[test]
fn test_brownian_variance_grows_linearly() {
    let grid = TimeGrid::new(11, 0.1).unwrap();
    let mut noise = SeededNoise::new(5);
    let paths = generate_ensemble(&BrownianMotion, 40_000, &grid, &mut noise).unwrap();

    let vars = ensemble_stats::time_variances(&paths).unwrap();
    assert_eq!(vars[0], 0.0);
    for (i, &t) in grid.as_slice().iter().enumerate().skip(1) {
        let expected = ou_analytic::brownian_variance(t);
        assert!(
            (vars[i] - expected).abs() / expected < 0.05,
            "Var[X(t={})] = {}, expected {}",
            t,
            vars[i],
            expected
        );
    }
}

#[test]
fn test_ou_schemes_match_discrete_mean() {
    let ou = OuProcess::new(0.0, 1.0, 0.2, 1.0).unwrap();
    let dt = 0.01;
    let grid = TimeGrid::new(101, dt).unwrap();
    let num_paths = 20_000;

    let explicit = OuExplicit::new(ou);
    let implicit = OuImplicit::new(ou);
    let g_explicit = ou_analytic::explicit_amplification(ou.theta, dt);
    let g_implicit = ou_analytic::implicit_amplification(ou.theta, dt).unwrap();

    let mut noise = SeededNoise::new(7);
    let explicit_means =
        ensemble_stats::time_means(&generate_ensemble(&explicit, num_paths, &grid, &mut noise).unwrap())
            .unwrap();
    let implicit_means =
        ensemble_stats::time_means(&generate_ensemble(&implicit, num_paths, &grid, &mut noise).unwrap())
            .unwrap();

    let k = grid.len() - 1;
    let exact = ou_analytic::ou_mean(&ou, grid.horizon());
    let explicit_target = ou_analytic::discrete_mean(&ou, g_explicit, k);
    let implicit_target = ou_analytic::discrete_mean(&ou, g_implicit, k);

    println!(
        "\nE[U_T]: exact {:.5}, explicit {:.5} (sim {:.5}), implicit {:.5} (sim {:.5})",
        exact, explicit_target, explicit_means[k], implicit_target, implicit_means[k]
    );

    assert!((explicit_means[k] - explicit_target).abs() < 0.005);
    assert!((implicit_means[k] - implicit_target).abs() < 0.005);
    // Both schemes are first-order accurate in the mean
    assert!((explicit_target - exact).abs() < 0.01);
    assert!((implicit_target - exact).abs() < 0.01);
}

#[test]
fn test_ou_stationary_variance_per_scheme() {
    // θΔt = 0.5: the two discrete stationary variances differ by a clear margin
    let ou = OuProcess::new(0.0, 1.0, 1.0, 0.0).unwrap();
    let dt = 0.5;
    let grid = TimeGrid::new(60, dt).unwrap();
    let num_paths = 20_000;
    let mut noise = SeededNoise::new(11);

    let explicit_paths = generate_ensemble(&OuExplicit::new(ou), num_paths, &grid, &mut noise).unwrap();
    let implicit_paths = generate_ensemble(&OuImplicit::new(ou), num_paths, &grid, &mut noise).unwrap();

    let (_, explicit_var) = ensemble_stats::terminal_moments(&explicit_paths).unwrap();
    let (_, implicit_var) = ensemble_stats::terminal_moments(&implicit_paths).unwrap();

    let explicit_target = ou_analytic::explicit_stationary_variance(&ou, dt).unwrap();
    let implicit_target = ou_analytic::implicit_stationary_variance(&ou, dt).unwrap();

    println!(
        "\nStationary variance: explicit {:.4} (target {:.4}), implicit {:.4} (target {:.4})",
        explicit_var, explicit_target, implicit_var, implicit_target
    );

    assert!((explicit_var - explicit_target).abs() / explicit_target < 0.05);
    assert!((implicit_var - implicit_target).abs() / implicit_target < 0.05);
}

#[test]
fn test_explicit_instability_versus_implicit_stability() {
    // θΔt = 3 > 2
    let ou = OuProcess::new(0.0, 3.0, 1.0, 1.0).unwrap();
    let dt = 1.0;
    let dw: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 0.1 } else { -0.05 }).collect();

    let explicit = OuExplicit::new(ou).integrate(dt, &dw).unwrap();
    let implicit = OuImplicit::new(ou).integrate(dt, &dw).unwrap();

    assert_eq!(explicit[0], 1.0);
    assert_eq!(implicit[0], 1.0);

    // Explicit: magnitude keeps growing and the sign alternates
    for w in explicit.windows(2).skip(1) {
        assert!(w[1].abs() > w[0].abs(), "explicit path decayed: {:?}", w);
        assert!(w[0] * w[1] < 0.0, "explicit path did not oscillate: {:?}", w);
    }
    assert!(explicit.last().unwrap().abs() > 1e10);

    // Implicit: bounded by the initial value plus the accumulated noise
    assert!(implicit.iter().all(|u| u.abs() <= 1.0));
    assert!(implicit.last().unwrap().abs() < 0.1);
}

#[test]
fn test_degenerate_implicit_parameters() {
    let mut noise = SeededNoise::new(3);

    for dt in [0.5, 0.41, 0.47, 0.3, 0.07] {
        let ou = OuProcess::new(0.0, -1.0 / dt, 1.0, 0.0).unwrap();
        match OuImplicit::new(ou).simulate(40, dt, &mut noise) {
            Err(SdeError::NumericDegenerate { .. }) => {}
            other => panic!("dt = {}: expected NumericDegenerate, got {:?}", dt, other),
        }
        assert!(ou_analytic::implicit_amplification(ou.theta, dt).is_err());
    }

    let dt = 0.5;
    let ou = OuProcess::new(0.0, -1.0 / dt, 1.0, 0.0).unwrap();

    // The explicit scheme has no singular denominator
    let path = OuExplicit::new(ou).simulate(10, dt, &mut noise).unwrap();
    assert!(path.iter().all(|u| u.is_finite()));

    // A noise source still works after the failed call
    assert_eq!(noise.generate(3).unwrap().len(), 3);
}
