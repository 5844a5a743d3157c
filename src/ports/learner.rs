//! Learner port - anything that picks actions and (optionally) learns from them

use serde::{Deserialize, Serialize};

use crate::Result;

/// One observed step of experience
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: usize,
    pub action: usize,
    pub reward: f32,
    pub next_state: usize,
    pub done: bool,
}

/// Learner trait - unified interface for the training pipeline
///
/// Implemented by the Q-learning agent and by baselines such as a uniformly
/// random policy. Learners only ever see state and action ids, never the
/// environment that produced them.
///
/// # Examples
///
/// ```no_run
/// use gridq::ports::{Learner, Transition};
///
/// fn replay<L: Learner>(learner: &mut L, experience: &[Transition]) -> gridq::Result<()> {
///     for transition in experience {
///         learner.learn(transition)?;
///     }
///     Ok(())
/// }
/// ```
pub trait Learner: Send {
    /// Choose an action for `state`.
    ///
    /// With `greedy` set the learner must not explore.
    fn select_action(&mut self, state: usize, greedy: bool) -> usize;

    /// Update from a single transition.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for non-adaptive baselines.
    fn learn(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Name used in logs and summaries
    fn name(&self) -> &str;

    /// Current exploration rate, if the learner has one.
    fn exploration_rate(&self) -> Option<f32> {
        None
    }

    /// Replace the exploration rate. Ignored by learners without one.
    fn set_exploration_rate(&mut self, _epsilon: f32) {}

    /// Reseed the learner's random sources.
    ///
    /// Training pipelines call this when given a seed so runs are reproducible.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
