//! Environment port - discrete-state, discrete-action simulators

use serde::{Deserialize, Serialize};

use crate::Result;

/// What the environment reports back after one action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Id of the state the action led to
    pub state: usize,
    /// Immediate reward for the action
    pub reward: f32,
    /// Whether the episode is over
    pub done: bool,
    /// Set with `done` when the episode was cut off by a time limit rather
    /// than ending in a terminal state
    pub truncated: bool,
}

/// Episodic environment with enumerable states and actions.
///
/// State ids are always in `0..n_states()` and action ids in `0..n_actions()`,
/// which lets learners use them directly as table indices.
///
/// # Examples
///
/// ```
/// use gridq::{
///     gridworld::{GridConfig, GridWorld},
///     ports::Environment,
/// };
///
/// let mut env = GridWorld::new(GridConfig::new(3, 3))?;
/// let state = Environment::reset(&mut env);
/// let feedback = Environment::step(&mut env, 2)?;
/// assert_eq!(state, 0);
/// assert_eq!(feedback.state, 3);
/// assert!(!feedback.done && !feedback.truncated);
/// # Ok::<(), gridq::Error>(())
/// ```
pub trait Environment: Send {
    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> usize;

    /// Apply `action` to the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if `action` is not one of the environment's actions.
    fn step(&mut self, action: usize) -> Result<Feedback>;

    /// Size of the state space
    fn n_states(&self) -> usize;

    /// Size of the action space
    fn n_actions(&self) -> usize;
}
