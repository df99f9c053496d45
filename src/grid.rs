use crate::error::{validation::*, SdeResult};

/// Uniform time grid `t[i] = i·Δt`, shared read-only by every trajectory of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    dt: f64,
    times: Vec<f64>,
}

impl TimeGrid {
    /// `dt` must be positive and finite so the grid is strictly increasing.
    pub fn new(points: usize, dt: f64) -> SdeResult<Self> {
        validate_finite("dt", dt)?;
        validate_positive("dt", dt)?;

        let times = (0..points).map(|i| i as f64 * dt).collect();
        Ok(TimeGrid { dt, times })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    /// Last grid time, or `0` for an empty grid.
    pub fn horizon(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_values() {
        let grid = TimeGrid::new(5, 0.5).unwrap();
        assert_eq!(grid.as_slice(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(grid.horizon(), 2.0);
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn test_grid_strictly_increasing() {
        let grid = TimeGrid::new(10_000, 1e-3).unwrap();
        assert_eq!(grid.as_slice()[0], 0.0);
        assert!(grid.as_slice().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_grid_rejects_bad_step() {
        assert!(TimeGrid::new(5, 0.0).is_err());
        assert!(TimeGrid::new(5, -1.0).is_err());
        assert!(TimeGrid::new(5, f64::INFINITY).is_err());
        assert!(TimeGrid::new(0, 0.1).unwrap().is_empty());
    }
}
