// src/error.rs
use thiserror::Error;

/// Error types for trajectory generation, configuration and output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SdeError {
    /// Argument outside its admissible domain
    #[error("Invalid argument '{parameter}' = {value}: {constraint}")]
    InvalidArgument {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A recurrence would divide by zero or otherwise leave the reals
    #[error("Numeric degeneracy in {method}: {reason}")]
    NumericDegenerate { method: String, reason: String },

    /// Model selector that names none of the supported processes
    #[error("Unknown model selector '{selector}' (expected B, OU or OUE)")]
    UnknownModel { selector: String },

    /// Missing or malformed run setting
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Entropy source or noise replay failure
    #[error("Random number generation error: {reason}")]
    RandomGenerationError { reason: String },

    /// Sink or summary file could not be written
    #[error("Output error for '{path}': {reason}")]
    OutputError { path: String, reason: String },
}

/// Result type alias for sde-paths operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(SdeError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        if value < 0.0 || value.is_nan() {
            Err(SdeError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidArgument {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a signed count coming from user input and narrow it to `usize`.
    ///
    /// Zero is accepted here; callers that need a strictly positive count
    /// follow up with [`validate_nonzero_count`].
    pub fn validate_count(name: &str, value: i64) -> SdeResult<usize> {
        usize::try_from(value).map_err(|_| SdeError::InvalidArgument {
            parameter: name.to_string(),
            value: value as f64,
            constraint: "must be a non-negative count".to_string(),
        })
    }

    /// Validate that a count is at least one
    pub fn validate_nonzero_count(name: &str, value: usize) -> SdeResult<()> {
        if value == 0 {
            Err(SdeError::InvalidArgument {
                parameter: name.to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
