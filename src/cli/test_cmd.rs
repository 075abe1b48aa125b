//! Test command for Fairway.
//!
//! Plays a practice test interactively: one random target at a time, one
//! shot line per target. Shot lines look like `7 Iron, 148, 12L` where the
//! deviation is `<feet>L`, `<feet>R`, or a signed number (negative = left).
//! Entering `q` abandons the test without saving anything.

use std::io::{BufRead, Write};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{AppState, ClubBag, Direction, Shot, TestRun};
use crate::error::{FairwayError, Result};
use crate::stats::{ScoreBand, TargetPlan};
use crate::storage::KeyValueStore;

/// Options for the test command.
#[derive(Debug, Clone, Default)]
pub struct TestOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Number of shots (overrides config).
    pub shots: Option<usize>,
    /// Shortest target in yards (overrides config).
    pub min_yardage: Option<f64>,
    /// Longest target in yards (overrides config).
    pub max_yardage: Option<f64>,
}

/// Output format for the test command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutput {
    /// Whether the command ran without error.
    pub success: bool,
    /// Whether every shot was entered and the session saved.
    pub completed: bool,
    /// Targets for this test, in yards.
    pub targets: Vec<f64>,
    /// Shots entered, with per-shot scores.
    pub shots: Vec<ShotResult>,
    /// Session score when completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Session insight when completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    /// Error message if the test could not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One scored shot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShotResult {
    pub number: usize,
    pub club: String,
    pub target: f64,
    pub distance: f64,
    pub deviation: f64,
    pub score: f64,
}

impl TestOutput {
    fn from_run(run: &TestRun, scores: &[f64]) -> Self {
        let shots = run
            .shots()
            .iter()
            .zip(run.targets())
            .zip(scores)
            .enumerate()
            .map(|(i, ((shot, target), score))| ShotResult {
                number: i + 1,
                club: shot.club.clone(),
                target: *target,
                distance: shot.distance,
                deviation: shot.deviation,
                score: *score,
            })
            .collect();

        Self {
            success: true,
            completed: false,
            targets: run.targets().to_vec(),
            shots,
            score: None,
            insights: None,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            completed: false,
            targets: Vec::new(),
            shots: Vec::new(),
            score: None,
            insights: None,
            error: Some(error.into()),
        }
    }
}

/// The test command implementation.
pub struct TestCommand<S: KeyValueStore> {
    state: AppState<S>,
    config: Config,
}

impl<S: KeyValueStore> TestCommand<S> {
    /// Create a new test command.
    pub fn new(store: S, config: Config) -> Self {
        Self {
            state: AppState::load(store),
            config,
        }
    }

    /// Target plan from config, with command-line overrides applied.
    pub fn plan(&self, options: &TestOptions) -> TargetPlan {
        let defaults = self.config.test.plan();
        TargetPlan::new(
            options.shots.unwrap_or(defaults.shots),
            options.min_yardage.unwrap_or(defaults.min_yardage),
            options.max_yardage.unwrap_or(defaults.max_yardage),
        )
    }

    /// Run the test, reading shot lines from `input` and writing prompts to
    /// `prompt`.
    pub fn run<I, W, R>(
        &self,
        options: &TestOptions,
        input: &mut I,
        prompt: &mut W,
        rng: &mut R,
    ) -> TestOutput
    where
        I: BufRead,
        W: Write,
        R: Rng,
    {
        let mut run = match TestRun::start(self.state.bag().clone(), &self.plan(options), rng) {
            Ok(run) => run,
            Err(e) => return TestOutput::failure(e.to_string()),
        };

        let mut scores = Vec::with_capacity(run.targets().len());
        match self.play(&mut run, &mut scores, input, prompt) {
            Ok(true) => self.complete(run, &scores),
            Ok(false) => {
                tracing::info!(entered = run.shots().len(), "test abandoned");
                TestOutput::from_run(&run, &scores)
            }
            Err(e) => TestOutput::failure(e.to_string()),
        }
    }

    /// Prompt for every target. Returns `false` if the golfer quits.
    fn play<I: BufRead, W: Write>(
        &self,
        run: &mut TestRun,
        scores: &mut Vec<f64>,
        input: &mut I,
        prompt: &mut W,
    ) -> Result<bool> {
        writeln!(prompt, "Clubs: {}", run.selectable_clubs().join(", "))?;
        writeln!(prompt, "Enter shots as '<club>, <distance>, <deviation>' (q to quit)")?;

        let total = run.targets().len();
        let mut line = String::new();

        while let (Some(number), Some(target)) = (run.shot_number(), run.current_target()) {
            write!(prompt, "Shot {}/{}: target {:.0} yds > ", number, total, target)?;
            prompt.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(prompt)?;
                return Ok(false);
            }

            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            if entry.eq_ignore_ascii_case("q") || entry.eq_ignore_ascii_case("quit") {
                return Ok(false);
            }

            let shot = match parse_shot_line(entry, self.state.bag()) {
                Ok(shot) => shot,
                Err(e) => {
                    writeln!(prompt, "  {}", e)?;
                    continue;
                }
            };

            match run.submit(shot) {
                Ok(score) => {
                    writeln!(prompt, "  score {:.1}", score)?;
                    scores.push(score);
                }
                Err(e) => writeln!(prompt, "  {}", e)?,
            }
        }

        Ok(true)
    }

    fn complete(&self, run: TestRun, scores: &[f64]) -> TestOutput {
        let mut output = TestOutput::from_run(&run, scores);

        let session = match run.finish(Utc::now()) {
            Ok(session) => session,
            Err(e) => return TestOutput::failure(e.to_string()),
        };
        if let Err(e) = self.state.record_session(&session) {
            return TestOutput::failure(format!("Failed to save session: {}", e));
        }

        output.completed = true;
        output.score = Some(session.score());
        output.insights = Some(session.insights().to_string());
        output
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &TestOutput, options: &TestOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &TestOutput) -> String {
        if !output.success {
            return format!(
                "Test failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if !output.completed {
            return format!(
                "Test abandoned after {} of {} shots. Nothing was saved.\n",
                output.shots.len(),
                output.targets.len()
            );
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "{:>3}  {:<16} {:>6} {:>6} {:>6} {:>6}",
            "#", "Club", "Target", "Dist", "Dev", "Score"
        ));
        for shot in &output.shots {
            lines.push(format!(
                "{:>3}  {:<16} {:>6.0} {:>6.0} {:>6.0} {:>6.1}",
                shot.number, shot.club, shot.target, shot.distance, shot.deviation, shot.score
            ));
        }
        lines.push(String::new());

        if let Some(score) = output.score {
            lines.push(format!(
                "Session score: {:.1} ({})",
                score,
                ScoreBand::for_score(score).display_name()
            ));
        }
        if let Some(insights) = &output.insights {
            lines.push(insights.clone());
        }

        lines.join("\n")
    }
}

/// Parse `<club>, <distance>, <deviation>` against the clubs in `bag`.
///
/// Fields are split from the right, so a club name may itself contain commas.
pub fn parse_shot_line(line: &str, bag: &ClubBag) -> Result<Shot> {
    let mut parts = line.rsplitn(3, ',').map(str::trim);
    let (Some(deviation), Some(distance), Some(club)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FairwayError::invalid_input(
            "expected '<club>, <distance>, <deviation>'",
        ));
    };

    let club = bag
        .resolve(club)
        .ok_or_else(|| FairwayError::invalid_input(format!("{} is not in your bag", club)))?;

    let distance: f64 = distance
        .parse()
        .ok()
        .filter(|d: &f64| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| {
            FairwayError::invalid_input(format!("distance '{}' is not a number of yards", distance))
        })?;

    Ok(match parse_deviation(deviation)? {
        (miss, Some(direction)) => Shot::with_direction(club, distance, miss, direction),
        (deviation, None) => Shot::new(club, distance, deviation),
    })
}

/// Parse `12L`, `12R`, or a signed number of feet.
///
/// Returns the magnitude and side for `L`/`R` entries, or the signed value
/// with no side.
pub fn parse_deviation(input: &str) -> Result<(f64, Option<Direction>)> {
    let input = input.trim();
    let invalid = || {
        FairwayError::invalid_input(format!(
            "deviation '{}' should look like 12L, 12R or -12",
            input
        ))
    };

    let (number, direction) = match input.char_indices().last() {
        Some((i, 'l' | 'L')) => (&input[..i], Some(Direction::Left)),
        Some((i, 'r' | 'R')) => (&input[..i], Some(Direction::Right)),
        _ => (input, None),
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }

    if direction.is_some() && value < 0.0 {
        return Err(invalid());
    }
    Ok((value, direction))
}
