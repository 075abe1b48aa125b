//! An in-progress practice test.
//!
//! A run owns its targets and the shots entered so far. Nothing is persisted
//! until [`TestRun::finish`] produces a [`Session`]; dropping the run
//! abandons it.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::core::{ClubBag, Session, Shot};
use crate::error::{FairwayError, Result};
use crate::stats::scoring::{session_insight, session_score, shot_score};
use crate::stats::targets::TargetPlan;

/// A test being played, one target at a time.
#[derive(Debug, Clone)]
pub struct TestRun {
    bag: ClubBag,
    targets: Vec<f64>,
    shots: Vec<Shot>,
}

impl TestRun {
    /// Start a run against explicit targets.
    pub fn new(bag: ClubBag, targets: Vec<f64>) -> Result<Self> {
        if bag.is_empty() {
            return Err(FairwayError::invalid_input(
                "set up your bag before starting a test",
            ));
        }
        if targets.is_empty() {
            return Err(FairwayError::invalid_input("a test needs at least one target"));
        }
        Ok(Self {
            bag,
            shots: Vec::with_capacity(targets.len()),
            targets,
        })
    }

    /// Start a run with targets drawn from `plan`.
    pub fn start<R: Rng>(bag: ClubBag, plan: &TargetPlan, rng: &mut R) -> Result<Self> {
        let targets = plan.generate(rng)?;
        Self::new(bag, targets)
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Clubs selectable for this run, in display order.
    pub fn selectable_clubs(&self) -> Vec<&str> {
        self.bag.sorted()
    }

    /// 1-based number of the shot being played, or `None` once complete.
    pub fn shot_number(&self) -> Option<usize> {
        (!self.is_complete()).then(|| self.shots.len() + 1)
    }

    /// Target for the shot being played.
    pub fn current_target(&self) -> Option<f64> {
        self.targets.get(self.shots.len()).copied()
    }

    pub fn remaining(&self) -> usize {
        self.targets.len() - self.shots.len()
    }

    pub fn is_complete(&self) -> bool {
        self.shots.len() >= self.targets.len()
    }

    /// Record the next shot and return its score against the current target.
    pub fn submit(&mut self, shot: Shot) -> Result<f64> {
        let target = self
            .current_target()
            .ok_or_else(|| FairwayError::invalid_input("all shots have been entered"))?;

        if !self.bag.contains(&shot.club) {
            return Err(FairwayError::invalid_input(format!(
                "{} is not in your bag",
                shot.club
            )));
        }

        let score = shot_score(shot.distance, target, shot.deviation);
        tracing::debug!(
            shot = self.shots.len() + 1,
            club = %shot.club,
            target,
            score,
            "shot recorded"
        );
        self.shots.push(shot);
        Ok(score)
    }

    /// Close the run and build the session to persist.
    pub fn finish(self, now: DateTime<Utc>) -> Result<Session> {
        if !self.is_complete() {
            return Err(FairwayError::invalid_input(format!(
                "{} shots still to play",
                self.remaining()
            )));
        }

        let score = session_score(&self.shots, &self.targets)?;
        Ok(Session::new(now, score, session_insight(score), self.shots))
    }
}
