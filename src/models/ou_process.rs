use crate::error::{validation::*, SdeResult};

/// Ornstein-Uhlenbeck parameters for `dU = θ(μ - U) dt + σ dW`, `U(0) = U0`.
///
/// Shared by both OU discretisations; see `solvers::implicit_euler` and
/// `solvers::euler_maruyama`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuProcess {
    /// Long-run mean
    pub mu: f64,
    /// Mean-reversion rate
    pub theta: f64,
    pub sigma: f64,
    pub u0: f64,
}

impl OuProcess {
    pub fn new(mu: f64, theta: f64, sigma: f64, u0: f64) -> SdeResult<Self> {
        let process = OuProcess {
            mu,
            theta,
            sigma,
            u0,
        };
        process.validate()?;
        Ok(process)
    }

    pub fn validate(&self) -> SdeResult<()> {
        validate_finite("mu", self.mu)?;
        validate_finite("theta", self.theta)?;
        validate_finite("sigma", self.sigma)?;
        validate_finite("u0", self.u0)
    }

    /// Mean-reversion pull accumulated over one step, `θ·μ·Δt`.
    pub(crate) fn drift_increment(&self, dt: f64) -> f64 {
        self.theta * self.mu * dt
    }
}

impl Default for OuProcess {
    fn default() -> Self {
        OuProcess {
            mu: 0.0,
            theta: 1.0,
            sigma: 1.0,
            u0: 0.0,
        }
    }
}
