//! Implicit (backward) Euler scheme for the Ornstein-Uhlenbeck process
//!
//! # Mathematical Framework
//!
//! Evaluating the mean-reversion term at the new point,
//! `U_{n+1} = U_n + θ(μ - U_{n+1})Δt + σ√Δt Z_n`, and solving for `U_{n+1}`:
//! ```text
//! U_{n+1} = (U_n + θμΔt + σ√Δt Z_n) / (1 + θΔt)
//! ```
//!
//! # Stability
//!
//! For `θ ≥ 0, Δt > 0` the amplification factor `1 / (1 + θΔt)` lies in
//! `(0, 1]`, so the deterministic part decays for any step size. The only
//! singular configuration is `θΔt = -1`, which is reported as
//! [`SdeError::NumericDegenerate`]. `θ = -1/Δt` rarely rounds to an exact
//! zero denominator, so anything within a few ulps of zero counts as singular.

use crate::error::{validation::*, SdeError, SdeResult};
use crate::models::model::{unroll, StochasticIntegrator, Trajectory};
use crate::models::ou_process::OuProcess;

/// Backward-Euler OU integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuImplicit {
    pub process: OuProcess,
}

impl OuImplicit {
    pub fn new(process: OuProcess) -> Self {
        OuImplicit { process }
    }

    fn denominator(&self, dt: f64) -> SdeResult<f64> {
        let theta = self.process.theta;
        implicit_denominator(theta, dt).ok_or_else(|| SdeError::NumericDegenerate {
            method: self.name().to_string(),
            reason: format!(
                "denominator 1 + theta*dt = {:e} (theta = {}, dt = {})",
                1.0 + theta * dt,
                theta,
                dt
            ),
        })
    }
}

/// `1 + θΔt`, or `None` when it is non-finite or indistinguishable from zero.
pub(crate) fn implicit_denominator(theta: f64, dt: f64) -> Option<f64> {
    let scaled = theta * dt;
    let denom = 1.0 + scaled;
    let tolerance = 4.0 * f64::EPSILON * (1.0 + scaled.abs());
    (denom.is_finite() && denom.abs() > tolerance).then_some(denom)
}

impl StochasticIntegrator for OuImplicit {
    fn name(&self) -> &'static str {
        "Ornstein-Uhlenbeck (implicit)"
    }

    fn check_step(&self, dt: f64) -> SdeResult<()> {
        validate_finite("dt", dt)?;
        validate_non_negative("dt", dt)?;
        self.denominator(dt).map(|_| ())
    }

    fn integrate(&self, dt: f64, dw: &[f64]) -> SdeResult<Trajectory> {
        self.check_step(dt)?;
        let p = &self.process;
        let denom = self.denominator(dt)?;
        let drift = p.drift_increment(dt);
        let vol = p.sigma * dt.sqrt();

        let path = unroll(p.u0, dw, |u, z| (u + drift + vol * z) / denom);
        if let Some(i) = path.iter().position(|u| !u.is_finite()) {
            return Err(SdeError::NumericDegenerate {
                method: self.name().to_string(),
                reason: format!("non-finite value at step {} (1 + theta*dt = {:e})", i, denom),
            });
        }
        Ok(path)
    }
}
