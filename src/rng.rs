// src/rng.rs
//! Standard-normal noise for trajectory generation
//!
//! # Design
//!
//! Every trajectory consumes exactly one *noise batch*: `N` independent
//! draws from N(0, 1). Batches are never shared between trajectories.
//!
//! The source of those batches is passed explicitly to the integrators as a
//! [`NoiseSource`] trait object rather than living in a module-level
//! generator, so a run can be driven by:
//!
//! - [`EntropyNoise`]: a fresh OS-entropy seed for every batch (production)
//! - [`SeededNoise`]: one reproducible `StdRng` stream (tests, benchmarks)
//! - [`ReplayNoise`]: caller-supplied batches, replayed in order

use crate::error::{SdeError, SdeResult};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use std::collections::VecDeque;

/// Producer of standard-normal noise batches
pub trait NoiseSource {
    /// Return `count` independent N(0, 1) draws. `count == 0` yields an empty batch.
    fn generate(&mut self, count: usize) -> SdeResult<Vec<f64>>;
}

/// Reseeds from the operating system on every batch.
///
/// No two batches are expected to reproduce each other, within a run or
/// across runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyNoise;

impl EntropyNoise {
    pub fn new() -> Self {
        EntropyNoise
    }
}

impl NoiseSource for EntropyNoise {
    fn generate(&mut self, count: usize) -> SdeResult<Vec<f64>> {
        let mut rng = StdRng::from_rng(OsRng).map_err(|e| SdeError::RandomGenerationError {
            reason: format!("failed to seed from OS entropy: {}", e),
        })?;
        Ok(white_noise(&mut rng, count))
    }
}

/// Single seeded stream; successive batches differ but a run is reproducible.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: seed_rng_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn generate(&mut self, count: usize) -> SdeResult<Vec<f64>> {
        Ok(white_noise(&mut self.rng, count))
    }
}

/// Replays pre-recorded batches in order.
///
/// Each call must request exactly the length of the next stored batch.
#[derive(Debug, Clone, Default)]
pub struct ReplayNoise {
    batches: VecDeque<Vec<f64>>,
}

impl ReplayNoise {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        Self {
            batches: batches.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl NoiseSource for ReplayNoise {
    fn generate(&mut self, count: usize) -> SdeResult<Vec<f64>> {
        let batch = self
            .batches
            .pop_front()
            .ok_or_else(|| SdeError::RandomGenerationError {
                reason: "replay source exhausted".to_string(),
            })?;

        if batch.len() != count {
            return Err(SdeError::RandomGenerationError {
                reason: format!(
                    "replayed batch has {} draws, {} requested",
                    batch.len(),
                    count
                ),
            });
        }
        Ok(batch)
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// Draw `count` independent standard-normal values from `rng`.
pub fn white_noise<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<f64> {
    (0..count).map(|_| get_normal_draw(rng)).collect()
}
