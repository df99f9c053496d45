//! Run parameters: partial settings from a TOML file, the command line or an
//! interactive prompt, resolved into a validated [`RunConfig`].

use crate::error::{validation::*, SdeError, SdeResult};
use crate::models::{OuProcess, ProcessKind};
use crate::output::CsvLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "./output.csv";

/// Settings as supplied by a single source; every field may be absent.
///
/// Counts are signed so that negative input can be reported as an
/// invalid argument instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    pub model: Option<ProcessKind>,
    pub trajectories: Option<i64>,
    pub points: Option<i64>,
    pub dt: Option<f64>,
    pub mu: Option<f64>,
    pub theta: Option<f64>,
    pub sigma: Option<f64>,
    pub u0: Option<f64>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub trailing_delimiter: Option<bool>,
    pub row_labels: Option<bool>,
}

impl RunSettings {
    pub fn from_toml_str(contents: &str) -> SdeResult<Self> {
        toml::from_str(contents).map_err(|e| SdeError::InvalidConfiguration {
            field: "config".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> SdeResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| SdeError::InvalidConfiguration {
                field: "config".to_string(),
                reason: format!("cannot read {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&contents)
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: RunSettings) -> RunSettings {
        RunSettings {
            model: overrides.model.or(self.model),
            trajectories: overrides.trajectories.or(self.trajectories),
            points: overrides.points.or(self.points),
            dt: overrides.dt.or(self.dt),
            mu: overrides.mu.or(self.mu),
            theta: overrides.theta.or(self.theta),
            sigma: overrides.sigma.or(self.sigma),
            u0: overrides.u0.or(self.u0),
            seed: overrides.seed.or(self.seed),
            output: overrides.output.or(self.output),
            summary: overrides.summary.or(self.summary),
            trailing_delimiter: overrides.trailing_delimiter.or(self.trailing_delimiter),
            row_labels: overrides.row_labels.or(self.row_labels),
        }
    }

    /// Required fields that are still unset, in prompt order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.model.is_none() {
            missing.push("model");
        }
        if self.trajectories.is_none() {
            missing.push("trajectories");
        }
        if self.points.is_none() {
            missing.push("points");
        }
        if self.dt.is_none() {
            missing.push("dt");
        }
        missing
    }

    pub fn resolve(self) -> SdeResult<RunConfig> {
        if let Some(field) = self.missing().first() {
            return Err(SdeError::InvalidConfiguration {
                field: field.to_string(),
                reason: "required setting was not provided".to_string(),
            });
        }

        let defaults = OuProcess::default();
        let ou = OuProcess::new(
            self.mu.unwrap_or(defaults.mu),
            self.theta.unwrap_or(defaults.theta),
            self.sigma.unwrap_or(defaults.sigma),
            self.u0.unwrap_or(defaults.u0),
        )?;

        let mut layout = CsvLayout::default();
        layout.set(
            CsvLayout::TRAILING_DELIMITER,
            self.trailing_delimiter.unwrap_or(true),
        );
        layout.set(CsvLayout::ROW_LABELS, self.row_labels.unwrap_or(false));

        let config = RunConfig {
            model: self.model.unwrap_or(ProcessKind::Brownian),
            trajectories: validate_count("trajectories", self.trajectories.unwrap_or(0))?,
            points: validate_count("points", self.points.unwrap_or(0))?,
            dt: self.dt.unwrap_or(0.0),
            ou,
            seed: self.seed,
            output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            summary: self.summary,
            layout,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Fully specified, validated parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub model: ProcessKind,
    pub trajectories: usize,
    pub points: usize,
    pub dt: f64,
    /// Used by the OU models only
    pub ou: OuProcess,
    /// `None` draws every batch from fresh OS entropy
    pub seed: Option<u64>,
    pub output: PathBuf,
    pub summary: Option<PathBuf>,
    pub layout: CsvLayout,
}

impl RunConfig {
    pub fn validate(&self) -> SdeResult<()> {
        validate_nonzero_count("trajectories", self.trajectories)?;
        validate_nonzero_count("points", self.points)?;
        validate_finite("dt", self.dt)?;
        validate_positive("dt", self.dt)?;
        self.ou.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> RunSettings {
        RunSettings {
            model: Some(ProcessKind::OrnsteinUhlenbeck),
            trajectories: Some(4),
            points: Some(10),
            dt: Some(0.1),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let config = required().resolve().unwrap();

        assert_eq!(config.ou, OuProcess::default());
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.layout, CsvLayout::TRAILING_DELIMITER);
        assert_eq!(config.seed, None);
        assert_eq!((config.trajectories, config.points), (4, 10));
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let settings = RunSettings {
            model: Some(ProcessKind::Brownian),
            ..Default::default()
        };
        assert_eq!(settings.missing(), vec!["trajectories", "points", "dt"]);

        match settings.resolve() {
            Err(SdeError::InvalidConfiguration { field, .. }) => assert_eq!(field, "trajectories"),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_counts_and_step_are_validated() {
        let negative = RunSettings {
            points: Some(-5),
            ..required()
        };
        assert!(matches!(
            negative.resolve(),
            Err(SdeError::InvalidArgument { ref parameter, .. }) if parameter == "points"
        ));

        let zero = RunSettings {
            trajectories: Some(0),
            ..required()
        };
        assert!(zero.resolve().is_err());

        let bad_dt = RunSettings {
            dt: Some(0.0),
            ..required()
        };
        assert!(bad_dt.resolve().is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = RunSettings {
            theta: Some(2.0),
            sigma: Some(0.3),
            ..required()
        };
        let cli = RunSettings {
            theta: Some(5.0),
            row_labels: Some(true),
            ..Default::default()
        };

        let config = file.merge(cli).resolve().unwrap();
        assert_eq!(config.ou.theta, 5.0);
        assert_eq!(config.ou.sigma, 0.3);
        assert!(config.layout.contains(CsvLayout::ROW_LABELS));
    }

    #[test]
    fn test_toml_settings() {
        let settings = RunSettings::from_toml_str(
            r#"
            model = "OUE"
            trajectories = 3
            points = 50
            dt = 0.02
            theta = 4.0
            trailing_delimiter = false
            "#,
        )
        .unwrap();

        let config = settings.resolve().unwrap();
        assert_eq!(config.model, ProcessKind::OrnsteinUhlenbeckExplicit);
        assert_eq!(config.ou.theta, 4.0);
        assert_eq!(config.layout, CsvLayout::NONE);
    }

    #[test]
    fn test_toml_rejects_unknown_model_and_fields() {
        assert!(RunSettings::from_toml_str("model = \"GBM\"").is_err());
        assert!(RunSettings::from_toml_str("steps = 10").is_err());
    }
}
