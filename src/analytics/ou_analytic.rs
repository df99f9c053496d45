// src/analytics/ou_analytic.rs
//! Closed-form moments for Brownian motion and the Ornstein-Uhlenbeck process,
//! and the matching quantities for both discretisations
//!
//! # Continuous process
//!
//! For `dU = θ(μ - U) dt + σ dW`, `U(0) = U₀`:
//! ```text
//! E[U_t]   = μ + (U₀ - μ) e^(-θt)
//! Var[U_t] = σ²/(2θ) · (1 - e^(-2θt))
//! ```
//!
//! # Discrete schemes
//!
//! Both schemes shrink the distance to μ by a constant amplification factor
//! `g` per step:
//! ```text
//! explicit:  g = 1 - θΔt
//! implicit:  g = 1 / (1 + θΔt)
//! ```
//! so `E[U_k] = μ + (U₀ - μ) gᵏ`. The stationary variances are
//! ```text
//! explicit:  σ² / (θ(2 - θΔt))     (0 < θΔt < 2)
//! implicit:  σ² / (θ(2 + θΔt))     (θ > 0)
//! ```

use crate::error::{SdeError, SdeResult};
use crate::models::ou_process::OuProcess;
use crate::solvers::implicit_euler::implicit_denominator;

/// Variance of standard Brownian motion at time `t`.
pub fn brownian_variance(t: f64) -> f64 {
    t
}

/// Exact OU mean at time `t`.
pub fn ou_mean(process: &OuProcess, t: f64) -> f64 {
    process.mu + (process.u0 - process.mu) * (-process.theta * t).exp()
}

/// Exact OU variance at time `t`; reduces to `σ²t` when `θ = 0`.
pub fn ou_variance(process: &OuProcess, t: f64) -> f64 {
    let sigma2 = process.sigma * process.sigma;
    if process.theta == 0.0 {
        sigma2 * t
    } else {
        sigma2 / (2.0 * process.theta) * (1.0 - (-2.0 * process.theta * t).exp())
    }
}

pub fn explicit_amplification(theta: f64, dt: f64) -> f64 {
    1.0 - theta * dt
}

pub fn implicit_amplification(theta: f64, dt: f64) -> SdeResult<f64> {
    let denom = implicit_denominator(theta, dt).ok_or_else(|| SdeError::NumericDegenerate {
        method: "implicit amplification factor".to_string(),
        reason: format!("1 + theta*dt = {:e} (theta = {}, dt = {})", 1.0 + theta * dt, theta, dt),
    })?;
    Ok(1.0 / denom)
}

/// Whether the forward scheme keeps its deterministic part bounded, `|1 - θΔt| ≤ 1`.
pub fn explicit_is_stable(theta: f64, dt: f64) -> bool {
    explicit_amplification(theta, dt).abs() <= 1.0
}

/// Expected value after `k` steps of a scheme with amplification factor `g`.
pub fn discrete_mean(process: &OuProcess, g: f64, k: usize) -> f64 {
    process.mu + (process.u0 - process.mu) * g.powi(k as i32)
}

/// Stationary variance of the forward scheme, defined only for `0 < θΔt < 2`.
pub fn explicit_stationary_variance(process: &OuProcess, dt: f64) -> Option<f64> {
    let a = process.theta * dt;
    (a > 0.0 && a < 2.0).then(|| process.sigma * process.sigma / (process.theta * (2.0 - a)))
}

/// Stationary variance of the backward scheme, defined for `θ > 0`.
pub fn implicit_stationary_variance(process: &OuProcess, dt: f64) -> Option<f64> {
    let a = process.theta * dt;
    (process.theta > 0.0 && dt > 0.0)
        .then(|| process.sigma * process.sigma / (process.theta * (2.0 + a)))
}
