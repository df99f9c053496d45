//! Explicit (forward) Euler-Maruyama scheme for the Ornstein-Uhlenbeck process
//!
//! # Mathematical Framework
//!
//! For `dU = θ(μ - U) dt + σ dW` the forward discretisation is:
//! ```text
//! U_{n+1} = (1 - θΔt) U_n + θμΔt + σ√Δt Z_n
//! ```
//!
//! # Stability
//!
//! The deterministic part is multiplied by `1 - θΔt` every step. For
//! `θΔt > 2` that factor has magnitude above one and the path oscillates
//! with growing amplitude. This is left untouched: the scheme is meant to
//! be contrasted with [`super::implicit_euler`].

use crate::error::SdeResult;
use crate::models::model::{unroll, StochasticIntegrator, Trajectory};
use crate::models::ou_process::OuProcess;

/// Forward-Euler OU integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuExplicit {
    pub process: OuProcess,
}

impl OuExplicit {
    pub fn new(process: OuProcess) -> Self {
        OuExplicit { process }
    }
}

impl StochasticIntegrator for OuExplicit {
    fn name(&self) -> &'static str {
        "Ornstein-Uhlenbeck (explicit)"
    }

    fn integrate(&self, dt: f64, dw: &[f64]) -> SdeResult<Trajectory> {
        self.check_step(dt)?;
        let p = &self.process;
        let decay = 1.0 - p.theta * dt;
        let drift = p.drift_increment(dt);
        let vol = p.sigma * dt.sqrt();

        Ok(unroll(p.u0, dw, |u, z| decay * u + drift + vol * z))
    }
}
