//! Random target distances for a test.
//!
//! Targets are drawn uniformly from the requested yardage range. The random
//! source is always passed in: the CLI uses the thread RNG, tests use a
//! seeded `StdRng`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FairwayError, Result};

/// Shot count and yardage range for one test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPlan {
    pub shots: usize,
    pub min_yardage: f64,
    pub max_yardage: f64,
}

impl TargetPlan {
    pub fn new(shots: usize, min_yardage: f64, max_yardage: f64) -> Self {
        Self {
            shots,
            min_yardage,
            max_yardage,
        }
    }

    /// Check the plan can produce targets.
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(FairwayError::invalid_input("a test needs at least one shot"));
        }
        if !self.min_yardage.is_finite() || !self.max_yardage.is_finite() {
            return Err(FairwayError::invalid_input("yardages must be finite numbers"));
        }
        if self.min_yardage >= self.max_yardage {
            return Err(FairwayError::invalid_input(format!(
                "min yardage {} must be below max yardage {}",
                self.min_yardage, self.max_yardage
            )));
        }
        Ok(())
    }

    /// Draw one target per shot.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<f64>> {
        generate_targets(rng, self.shots, self.min_yardage, self.max_yardage)
    }
}

/// Draw `count` independent targets uniformly from `[min_yardage, max_yardage]`.
pub fn generate_targets<R: Rng>(
    rng: &mut R,
    count: usize,
    min_yardage: f64,
    max_yardage: f64,
) -> Result<Vec<f64>> {
    TargetPlan::new(count, min_yardage, max_yardage).validate()?;

    Ok((0..count)
        .map(|_| rng.random_range(min_yardage..=max_yardage))
        .collect())
}
