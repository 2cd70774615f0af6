//! Reaction-time trial for the Fitts's Law demo.
//!
//! The learner clicks a small target a fixed number of times, then a large
//! one. Each click is timed from the moment the target was armed. Timestamps
//! are caller-supplied milliseconds so the trial can be driven from any
//! clock; `*_now` helpers use wall-clock time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    pub clicks_per_target: usize,
    pub small_target_px: u32,
    pub large_target_px: u32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            clicks_per_target: 5,
            small_target_px: 40,
            large_target_px: 80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSize {
    Small,
    Large,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReactionError {
    #[error("click before the target was shown")]
    NotStarted,
    #[error("trial already finished")]
    Finished,
}

/// What a recorded click led to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Same target again; the timer restarted at the click.
    Again { target: TargetSize, remaining: usize },
    /// Small target done; `start` must be called for the large one.
    SwitchedToLarge,
    Finished { summary: ReactionSummary },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummary {
    pub small_target_px: u32,
    pub large_target_px: u32,
    pub small_times_ms: Vec<u64>,
    pub large_times_ms: Vec<u64>,
    pub small_average_ms: Option<u64>,
    pub large_average_ms: Option<u64>,
    /// `None` until both targets have at least one click.
    pub large_faster: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ReactionTrial {
    config: ReactionConfig,
    target: Option<TargetSize>,
    armed_at: Option<i64>,
    small: Vec<u64>,
    large: Vec<u64>,
}

impl ReactionTrial {
    /// A `clicks_per_target` of zero is treated as one.
    pub fn new(config: ReactionConfig) -> Self {
        let config = ReactionConfig {
            clicks_per_target: config.clicks_per_target.max(1),
            ..config
        };
        Self {
            config,
            target: Some(TargetSize::Small),
            armed_at: None,
            small: Vec::new(),
            large: Vec::new(),
        }
    }

    /// Target currently being measured; `None` once the trial is over.
    pub fn target(&self) -> Option<TargetSize> {
        self.target
    }

    pub fn target_px(&self) -> Option<u32> {
        self.target.map(|t| match t {
            TargetSize::Small => self.config.small_target_px,
            TargetSize::Large => self.config.large_target_px,
        })
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.target.is_none()
    }

    /// Show the target and start the timer.
    pub fn start(&mut self, at_ms: i64) -> Result<(), ReactionError> {
        if self.target.is_none() {
            return Err(ReactionError::Finished);
        }
        self.armed_at = Some(at_ms);
        Ok(())
    }

    pub fn click(&mut self, at_ms: i64) -> Result<ClickOutcome, ReactionError> {
        let target = self.target.ok_or(ReactionError::Finished)?;
        let started = self.armed_at.ok_or(ReactionError::NotStarted)?;
        let elapsed = u64::try_from(at_ms.saturating_sub(started)).unwrap_or(0);

        let times = match target {
            TargetSize::Small => &mut self.small,
            TargetSize::Large => &mut self.large,
        };
        times.push(elapsed);
        let remaining = self.config.clicks_per_target.saturating_sub(times.len());
        tracing::trace!(?target, elapsed, remaining, "reaction click recorded");

        if remaining > 0 {
            self.armed_at = Some(at_ms);
            return Ok(ClickOutcome::Again { target, remaining });
        }

        self.armed_at = None;
        match target {
            TargetSize::Small => {
                self.target = Some(TargetSize::Large);
                Ok(ClickOutcome::SwitchedToLarge)
            }
            TargetSize::Large => {
                self.target = None;
                Ok(ClickOutcome::Finished {
                    summary: self.summary(),
                })
            }
        }
    }

    pub fn start_now(&mut self) -> Result<(), ReactionError> {
        self.start(Utc::now().timestamp_millis())
    }

    pub fn click_now(&mut self) -> Result<ClickOutcome, ReactionError> {
        self.click(Utc::now().timestamp_millis())
    }

    pub fn summary(&self) -> ReactionSummary {
        let small_average_ms = rounded_average(&self.small);
        let large_average_ms = rounded_average(&self.large);
        ReactionSummary {
            small_target_px: self.config.small_target_px,
            large_target_px: self.config.large_target_px,
            small_times_ms: self.small.clone(),
            large_times_ms: self.large.clone(),
            small_average_ms,
            large_average_ms,
            large_faster: small_average_ms
                .zip(large_average_ms)
                .map(|(small, large)| large < small),
        }
    }
}

impl Default for ReactionTrial {
    fn default() -> Self {
        Self::new(ReactionConfig::default())
    }
}

fn rounded_average(times: &[u64]) -> Option<u64> {
    if times.is_empty() {
        return None;
    }
    let sum: u64 = times.iter().sum();
    Some((sum as f64 / times.len() as f64).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(trial: &mut ReactionTrial, start: i64, gaps: &[i64]) -> Vec<ClickOutcome> {
        trial.start(start).expect("start should succeed");
        let mut now = start;
        gaps.iter()
            .map(|gap| {
                now += gap;
                trial.click(now).expect("click should be recorded")
            })
            .collect()
    }

    #[test]
    fn click_without_start_is_ignored() {
        let mut trial = ReactionTrial::default();
        assert_eq!(trial.click(100), Err(ReactionError::NotStarted));
        assert!(trial.summary().small_times_ms.is_empty());
    }

    #[test]
    fn small_then_large_with_rounded_averages() {
        let mut trial = ReactionTrial::default();
        let small = run(&mut trial, 0, &[500, 450, 480, 470, 451]);
        assert_eq!(
            small[0],
            ClickOutcome::Again {
                target: TargetSize::Small,
                remaining: 4
            }
        );
        assert_eq!(small[4], ClickOutcome::SwitchedToLarge);
        assert_eq!(trial.target_px(), Some(80));
        assert!(!trial.is_armed());
        assert_eq!(trial.click(5000), Err(ReactionError::NotStarted));

        let large = run(&mut trial, 10_000, &[300, 310, 290, 305, 296]);
        let ClickOutcome::Finished { summary } = &large[4] else {
            panic!("expected finished outcome, got {:?}", large[4]);
        };
        // 2351 / 5 = 470.2, 1501 / 5 = 300.2
        assert_eq!(summary.small_average_ms, Some(470));
        assert_eq!(summary.large_average_ms, Some(300));
        assert_eq!(summary.large_faster, Some(true));
        assert!(trial.is_finished());
        assert_eq!(trial.start(20_000), Err(ReactionError::Finished));
    }

    #[test]
    fn averages_round_half_up() {
        assert_eq!(rounded_average(&[1, 2]), Some(2));
        assert_eq!(rounded_average(&[]), None);
    }

    #[test]
    fn zero_clicks_per_target_means_one() {
        let mut trial = ReactionTrial::new(ReactionConfig {
            clicks_per_target: 0,
            ..ReactionConfig::default()
        });
        assert_eq!(run(&mut trial, 0, &[10]), vec![ClickOutcome::SwitchedToLarge]);
    }

    #[test]
    fn wall_clock_trial_runs_to_completion() {
        let mut trial = ReactionTrial::new(ReactionConfig {
            clicks_per_target: 2,
            ..ReactionConfig::default()
        });
        assert_eq!(trial.click_now(), Err(ReactionError::NotStarted));

        trial.start_now().expect("start small target");
        assert!(trial.is_armed());
        trial.click_now().expect("first small click");
        assert_eq!(trial.click_now(), Ok(ClickOutcome::SwitchedToLarge));

        trial.start_now().expect("start large target");
        trial.click_now().expect("first large click");
        let outcome = trial.click_now().expect("last large click");
        let ClickOutcome::Finished { summary } = outcome else {
            panic!("expected finished outcome, got {outcome:?}");
        };
        assert_eq!(summary.small_times_ms.len(), 2);
        assert_eq!(summary.large_times_ms.len(), 2);
        assert!(summary.large_faster.is_some());
        assert_eq!(trial.start_now(), Err(ReactionError::Finished));
    }

    #[test]
    fn clock_going_backwards_records_zero() {
        let mut trial = ReactionTrial::default();
        trial.start(1_000).expect("start");
        trial.click(900).expect("click");
        assert_eq!(trial.summary().small_times_ms, vec![0]);
    }
}
