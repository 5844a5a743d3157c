//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events, allowing
//! composable data collection without coupling the training loop to specific
//! output formats or metrics.

use serde::{Deserialize, Serialize};

use super::learner::Transition;
use crate::Result;

/// Per-episode record handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index (0-based)
    pub episode: usize,
    /// Sum of rewards collected in the episode
    pub total_reward: f32,
    /// Number of steps taken
    pub steps: usize,
    /// Whether the environment signalled `done` (as opposed to the pipeline's
    /// own per-episode cap cutting the episode short)
    pub terminated: bool,
    /// Whether the episode ended in a terminal state rather than being
    /// truncated by a step limit
    pub reached_goal: bool,
    /// Exploration rate after the end-of-episode decay, i.e. the rate the next
    /// episode will use
    pub epsilon: Option<f32>,
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - for each transition, after the learner has seen it
///    - `on_episode_end(summary)`
/// 3. `on_training_end()` - once at the end
///
/// Every method has a no-op default, so observers only implement what they
/// care about.
///
/// # Examples
///
/// ```no_run
/// use gridq::ports::{EpisodeSummary, Observer};
///
/// struct SuccessCounter {
///     successes: usize,
/// }
///
/// impl Observer for SuccessCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> gridq::Result<()> {
///         if summary.total_reward > 0.0 {
///             self.successes += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step: usize, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Use this to flush files or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
