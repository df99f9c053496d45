use crate::error::{validation::*, SdeResult};
use crate::rng::NoiseSource;

/// One discretised path, index-aligned with the time grid (`x[i]` at `t[i]`).
pub type Trajectory = Vec<f64>;

/// A discretisation scheme that turns a standard-normal batch into a path.
///
/// Implementations hold only immutable parameters; each call is a pure
/// function of its arguments and the batch it consumes.
pub trait StochasticIntegrator {
    /// Short label for logs and error messages.
    fn name(&self) -> &'static str;

    /// Reject parameter/step combinations the recurrence cannot evaluate.
    fn check_step(&self, dt: f64) -> SdeResult<()> {
        validate_finite("dt", dt)?;
        validate_non_negative("dt", dt)
    }

    /// Fold `dw` into a trajectory of the same length.
    ///
    /// `dw[0]` is never read: the recurrence starts at index 1.
    fn integrate(&self, dt: f64, dw: &[f64]) -> SdeResult<Trajectory>;

    /// Draw one batch of `n` values from `noise` and integrate it.
    fn simulate(&self, n: usize, dt: f64, noise: &mut dyn NoiseSource) -> SdeResult<Trajectory> {
        self.check_step(dt)?;
        let dw = noise.generate(n)?;
        self.integrate(dt, &dw)
    }
}

/// Unroll `x[i] = step(x[i-1], dw[i])` from `x[0] = x0`.
pub(crate) fn unroll<F>(x0: f64, dw: &[f64], mut step: F) -> Trajectory
where
    F: FnMut(f64, f64) -> f64,
{
    let mut path = Vec::with_capacity(dw.len());
    let Some(rest) = dw.get(1..) else {
        return path;
    };

    path.push(x0);
    let mut current = x0;
    for &z in rest {
        current = step(current, z);
        path.push(current);
    }
    path
}
