//! Exploration-rate schedules applied between episodes

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How ε changes after each episode.
///
/// Every schedule is non-increasing and keeps ε inside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpsilonSchedule {
    /// Keep ε fixed
    Constant,
    /// Multiply by `decay`, never dropping below `min_epsilon`
    Exponential { decay: f32, min_epsilon: f32 },
}

impl EpsilonSchedule {
    pub fn exponential(decay: f32, min_epsilon: f32) -> Self {
        EpsilonSchedule::Exponential { decay, min_epsilon }
    }

    /// ε for the next episode
    pub fn next(&self, epsilon: f32) -> f32 {
        match *self {
            EpsilonSchedule::Constant => epsilon,
            // An ε already below the floor stays where it is.
            EpsilonSchedule::Exponential { decay, min_epsilon } => {
                (epsilon * decay).max(min_epsilon).min(epsilon)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let EpsilonSchedule::Exponential { decay, min_epsilon } = *self {
            if !(0.0..=1.0).contains(&decay) {
                return Err(Error::config(format!(
                    "epsilon decay {decay} must be in [0, 1]"
                )));
            }
            if !(0.0..=1.0).contains(&min_epsilon) {
                return Err(Error::config(format!(
                    "minimum epsilon {min_epsilon} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EpsilonSchedule {
    fn default() -> Self {
        Self::exponential(0.995, 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_decay_hits_floor() {
        let schedule = EpsilonSchedule::default();
        let mut epsilon = 0.3;
        for _ in 0..2000 {
            let next = schedule.next(epsilon);
            assert!(next <= epsilon);
            epsilon = next;
        }
        assert_eq!(epsilon, 0.01);
    }

    #[test]
    fn test_exponential_single_step() {
        let schedule = EpsilonSchedule::exponential(0.5, 0.1);
        assert_eq!(schedule.next(0.8), 0.4);
        assert_eq!(schedule.next(0.15), 0.1);
    }

    #[test]
    fn test_never_raises_epsilon_below_floor() {
        let schedule = EpsilonSchedule::exponential(0.995, 0.01);
        assert_eq!(schedule.next(0.0), 0.0);
    }

    #[test]
    fn test_constant() {
        assert_eq!(EpsilonSchedule::Constant.next(0.25), 0.25);
    }

    #[test]
    fn test_validate() {
        assert!(EpsilonSchedule::exponential(1.2, 0.01).validate().is_err());
        assert!(EpsilonSchedule::exponential(0.9, -0.5).validate().is_err());
        assert!(EpsilonSchedule::Constant.validate().is_ok());
    }
}
