//! Baseline learners

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::ports::Learner;

/// Uniformly random policy. Never learns.
pub struct RandomLearner {
    name: String,
    n_actions: usize,
    rng: StdRng,
}

impl RandomLearner {
    pub fn new(name: impl Into<String>, n_actions: usize) -> Self {
        Self {
            name: name.into(),
            n_actions,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random learner with a deterministic seed
    pub fn with_seed(name: impl Into<String>, n_actions: usize, seed: u64) -> Self {
        Self {
            name: name.into(),
            n_actions,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Learner for RandomLearner {
    fn select_action(&mut self, _state: usize, _greedy: bool) -> usize {
        self.rng.random_range(0..self.n_actions)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_in_range() {
        let mut learner = RandomLearner::with_seed("random", 4, 9);
        for state in 0..500 {
            assert!(learner.select_action(state, false) < 4);
        }
    }

    #[test]
    fn test_reseed_repeats_sequence() {
        let mut learner = RandomLearner::new("random", 4);
        learner.set_rng_seed(1);
        let first: Vec<_> = (0..20).map(|_| learner.select_action(0, true)).collect();
        learner.set_rng_seed(1);
        let second: Vec<_> = (0..20).map(|_| learner.select_action(0, true)).collect();
        assert_eq!(first, second);
    }
}
