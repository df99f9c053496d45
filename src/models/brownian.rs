//! Standard Brownian motion (Wiener process)
//!
//! ```text
//! X_0 = 0
//! X_i = X_{i-1} + √Δt · Z_i,   Z_i ~ N(0, 1)
//! ```
//!
//! Increments are i.i.d. N(0, Δt) by construction.

use super::model::{unroll, StochasticIntegrator, Trajectory};
use crate::error::SdeResult;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BrownianMotion;

impl BrownianMotion {
    pub fn new() -> Self {
        BrownianMotion
    }
}

impl StochasticIntegrator for BrownianMotion {
    fn name(&self) -> &'static str {
        "Brownian motion"
    }

    fn integrate(&self, dt: f64, dw: &[f64]) -> SdeResult<Trajectory> {
        self.check_step(dt)?;
        let sqrt_dt = dt.sqrt();
        Ok(unroll(0.0, dw, |x, z| x + sqrt_dt * z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ReplayNoise, SeededNoise};

    #[test]
    fn test_fixed_batch_unit_step() {
        let path = BrownianMotion
            .integrate(1.0, &[0.0, 1.0, -1.0, 0.5, 2.0])
            .unwrap();
        assert_eq!(path, vec![0.0, 1.0, 0.0, 0.5, 2.5]);
    }

    #[test]
    fn test_first_draw_is_ignored() {
        let a = BrownianMotion.integrate(0.25, &[100.0, 1.0, 2.0]).unwrap();
        let b = BrownianMotion.integrate(0.25, &[-7.0, 1.0, 2.0]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, vec![0.0, 0.5, 1.5]);
    }

    #[test]
    fn test_degenerate_lengths() {
        let mut noise = ReplayNoise::new(vec![vec![], vec![3.0]]);

        assert!(BrownianMotion.simulate(0, 0.1, &mut noise).unwrap().is_empty());
        // One draw is still requested for a single-point path
        assert_eq!(BrownianMotion.simulate(1, 0.1, &mut noise).unwrap(), vec![0.0]);
        assert_eq!(noise.remaining(), 0);
    }

    #[test]
    fn test_starts_at_zero() {
        let mut noise = SeededNoise::new(3);
        for _ in 0..10 {
            let path = BrownianMotion.simulate(50, 0.01, &mut noise).unwrap();
            assert_eq!(path.len(), 50);
            assert_eq!(path[0], 0.0);
        }
    }

    #[test]
    fn test_rejects_negative_step() {
        assert!(BrownianMotion.integrate(-0.1, &[0.0, 1.0]).is_err());
        assert!(BrownianMotion.integrate(f64::NAN, &[0.0, 1.0]).is_err());
    }
}
