//! Cross-sectional statistics of an ensemble (rows = trajectories, columns = grid points)

use crate::error::{SdeError, SdeResult};
use ndarray::{Array1, Array2, Axis};
use statrs::statistics::Statistics;

fn require_rows(paths: &Array2<f64>, min: usize) -> SdeResult<()> {
    if paths.nrows() < min {
        return Err(SdeError::InvalidArgument {
            parameter: "trajectories".to_string(),
            value: paths.nrows() as f64,
            constraint: format!("at least {} required", min),
        });
    }
    Ok(())
}

/// Mean across trajectories at every grid point.
pub fn time_means(paths: &Array2<f64>) -> SdeResult<Array1<f64>> {
    require_rows(paths, 1)?;
    paths.mean_axis(Axis(0)).ok_or_else(|| SdeError::InvalidArgument {
        parameter: "trajectories".to_string(),
        value: 0.0,
        constraint: "must be greater than 0".to_string(),
    })
}

/// Sample variance (n - 1) across trajectories at every grid point.
pub fn time_variances(paths: &Array2<f64>) -> SdeResult<Array1<f64>> {
    require_rows(paths, 2)?;
    Ok(paths.var_axis(Axis(0), 1.0))
}

/// Sample variance of the single-step increments `x[step] - x[step - 1]`.
pub fn increment_variance(paths: &Array2<f64>, step: usize) -> SdeResult<f64> {
    require_rows(paths, 2)?;
    if step == 0 || step >= paths.ncols() {
        return Err(SdeError::InvalidArgument {
            parameter: "step".to_string(),
            value: step as f64,
            constraint: format!("must lie in 1..{}", paths.ncols()),
        });
    }

    let increments = &paths.column(step) - &paths.column(step - 1);
    Ok(increments.iter().variance())
}

/// `(mean, sample variance)` of the last grid point.
pub fn terminal_moments(paths: &Array2<f64>) -> SdeResult<(f64, f64)> {
    require_rows(paths, 2)?;
    let last = paths.ncols().checked_sub(1).ok_or_else(|| SdeError::InvalidArgument {
        parameter: "points".to_string(),
        value: 0.0,
        constraint: "must be greater than 0".to_string(),
    })?;

    let column = paths.column(last);
    Ok((column.iter().mean(), column.iter().variance()))
}
