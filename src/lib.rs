//! # sde-paths: discretised Brownian and Ornstein-Uhlenbeck trajectories
//!
//! Generates ensembles of sample paths for three processes and writes them,
//! together with their time grid, as comma-separated text.
//!
//! ## Models
//!
//! | Selector | Process | Recurrence |
//! |----------|---------|------------|
//! | `B`   | Brownian motion | `X_i = X_{i-1} + √Δt Z_i` |
//! | `OU`  | OU, implicit    | `U_i = (U_{i-1} + θμΔt + σ√Δt Z_i) / (1 + θΔt)` |
//! | `OUE` | OU, explicit    | `U_i = (1 - θΔt) U_{i-1} + θμΔt + σ√Δt Z_i` |
//!
//! Every trajectory consumes one fresh batch of `N` standard-normal draws;
//! the first draw of each batch is not used by the recurrence.
//!
//! ## Quick Start
//!
//! ```rust
//! use sde_paths::models::{OuProcess, Process, ProcessKind, StochasticIntegrator};
//! use sde_paths::rng::SeededNoise;
//!
//! let ou = Process::new(ProcessKind::OrnsteinUhlenbeck, OuProcess::default());
//! let mut noise = SeededNoise::new(42);
//!
//! let path = ou.simulate(100, 0.01, &mut noise).expect("valid parameters");
//! assert_eq!(path.len(), 100);
//! assert_eq!(path[0], 0.0);
//! ```

// Module declarations
pub mod analytics;
pub mod config;
pub mod error;
pub mod grid;
pub mod math_utils;
pub mod models;
pub mod output;
pub mod prompt;
pub mod rng;
pub mod simulation;
pub mod solvers;

// Re-export commonly used types for convenience
pub use error::{SdeError, SdeResult};
