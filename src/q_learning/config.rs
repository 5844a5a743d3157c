//! Hyperparameters for the Q-learning agent

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for creating a [`QLearningAgent`](super::QLearningAgent).
///
/// # Examples
///
/// ```
/// use gridq::q_learning::QLearningConfig;
///
/// let config = QLearningConfig::default().with_epsilon(0.3).with_seed(42);
/// assert_eq!(config.learning_rate, 0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Step size α, in `(0, 1]`
    pub learning_rate: f32,
    /// Discount factor γ, in `[0, 1]`
    pub discount_factor: f32,
    /// Initial exploration rate ε, in `[0, 1]`
    pub epsilon: f32,
    /// Seed for exploration and tie-breaking; `None` draws from the OS
    pub seed: Option<u64>,
}

impl QLearningConfig {
    pub fn new(learning_rate: f32, discount_factor: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            discount_factor,
            epsilon,
            seed: None,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::config(format!(
                "learning rate {} must be in (0, 1]",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::config(format!(
                "discount factor {} must be in [0, 1]",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::config(format!(
                "epsilon {} must be in [0, 1]",
                self.epsilon
            )));
        }
        Ok(())
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self::new(0.1, 0.99, 0.2)
    }
}
