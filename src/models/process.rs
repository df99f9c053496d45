use super::brownian::BrownianMotion;
use super::model::{StochasticIntegrator, Trajectory};
use super::ou_process::OuProcess;
use crate::error::{SdeError, SdeResult};
use crate::rng::NoiseSource;
use crate::solvers::{OuExplicit, OuImplicit};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Model selector as it appears on the command line or in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ProcessKind {
    /// `B`
    Brownian,
    /// `OU`
    OrnsteinUhlenbeck,
    /// `OUE`
    OrnsteinUhlenbeckExplicit,
}

impl ProcessKind {
    pub const ALL: [ProcessKind; 3] = [
        ProcessKind::Brownian,
        ProcessKind::OrnsteinUhlenbeck,
        ProcessKind::OrnsteinUhlenbeckExplicit,
    ];

    pub fn selector(&self) -> &'static str {
        match self {
            ProcessKind::Brownian => "B",
            ProcessKind::OrnsteinUhlenbeck => "OU",
            ProcessKind::OrnsteinUhlenbeckExplicit => "OUE",
        }
    }

    pub fn is_ornstein_uhlenbeck(&self) -> bool {
        !matches!(self, ProcessKind::Brownian)
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.selector())
    }
}

impl FromStr for ProcessKind {
    type Err = SdeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" => Ok(ProcessKind::Brownian),
            "OU" => Ok(ProcessKind::OrnsteinUhlenbeck),
            "OUE" => Ok(ProcessKind::OrnsteinUhlenbeckExplicit),
            _ => Err(SdeError::UnknownModel {
                selector: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ProcessKind {
    type Error = SdeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A configured integrator, one variant per discretisation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Process {
    Brownian(BrownianMotion),
    OuImplicit(OuImplicit),
    OuExplicit(OuExplicit),
}

impl Process {
    /// `ou` is ignored for Brownian motion.
    pub fn new(kind: ProcessKind, ou: OuProcess) -> Self {
        match kind {
            ProcessKind::Brownian => Process::Brownian(BrownianMotion::new()),
            ProcessKind::OrnsteinUhlenbeck => Process::OuImplicit(OuImplicit::new(ou)),
            ProcessKind::OrnsteinUhlenbeckExplicit => Process::OuExplicit(OuExplicit::new(ou)),
        }
    }

    pub fn kind(&self) -> ProcessKind {
        match self {
            Process::Brownian(_) => ProcessKind::Brownian,
            Process::OuImplicit(_) => ProcessKind::OrnsteinUhlenbeck,
            Process::OuExplicit(_) => ProcessKind::OrnsteinUhlenbeckExplicit,
        }
    }

    fn inner(&self) -> &dyn StochasticIntegrator {
        match self {
            Process::Brownian(p) => p,
            Process::OuImplicit(p) => p,
            Process::OuExplicit(p) => p,
        }
    }
}

impl StochasticIntegrator for Process {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn check_step(&self, dt: f64) -> SdeResult<()> {
        self.inner().check_step(dt)
    }

    fn integrate(&self, dt: f64, dw: &[f64]) -> SdeResult<Trajectory> {
        self.inner().integrate(dt, dw)
    }

    fn simulate(&self, n: usize, dt: f64, noise: &mut dyn NoiseSource) -> SdeResult<Trajectory> {
        self.inner().simulate(n, dt, noise)
    }
}
