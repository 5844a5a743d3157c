//! Episodic training loop

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    ports::{Environment, EpisodeSummary, Learner, Observer, Transition},
    q_learning::EpsilonSchedule,
    utils::{mean, moving_average},
};

/// Episodes averaged for [`TrainingResult::recent_mean_reward`] and for each
/// point of [`TrainingResult::smoothed_rewards`]
pub const RECENT_WINDOW: usize = 50;

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Per-episode step cap enforced by the loop, on top of the
    /// environment's own termination
    pub max_steps_per_episode: usize,

    /// Random seed handed to the learner before training
    pub seed: Option<u64>,

    /// How ε evolves between episodes
    pub epsilon_schedule: EpsilonSchedule,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps_per_episode: 50,
            seed: None,
            epsilon_schedule: EpsilonSchedule::default(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps_per_episode == 0 {
            return Err(Error::config("max_steps_per_episode must be at least 1"));
        }
        self.epsilon_schedule.validate()
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub episodes: usize,

    /// Cumulative reward of every episode, in order
    pub rewards: Vec<f32>,

    /// Learning curve: moving average of `rewards` over [`RECENT_WINDOW`]
    /// episodes (the raw rewards when fewer episodes were played)
    pub smoothed_rewards: Vec<f32>,

    /// Mean reward over all episodes
    pub mean_reward: f32,

    /// Mean reward over the last [`RECENT_WINDOW`] episodes
    pub recent_mean_reward: f32,

    /// Best single-episode reward
    pub best_reward: Option<f32>,

    /// Exploration rate after the last decay step
    pub final_epsilon: Option<f32>,
}

impl TrainingResult {
    pub fn new(rewards: Vec<f32>, final_epsilon: Option<f32>) -> Self {
        let recent = &rewards[rewards.len().saturating_sub(RECENT_WINDOW)..];
        Self {
            episodes: rewards.len(),
            smoothed_rewards: moving_average(&rewards, RECENT_WINDOW),
            mean_reward: mean(&rewards),
            recent_mean_reward: mean(recent),
            best_reward: rewards.iter().copied().reduce(f32::max),
            final_epsilon,
            rewards,
        }
    }
}

/// Training pipeline for a single learner in a single environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `learner` for the configured number of episodes.
    ///
    /// After every episode the learner's exploration rate (if it has one) is
    /// advanced by the configured schedule.
    pub fn run(
        &mut self,
        env: &mut dyn Environment,
        learner: &mut dyn Learner,
    ) -> Result<TrainingResult> {
        self.config.validate()?;

        if let Some(seed) = self.config.seed {
            learner.set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut rewards = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let mut summary = self.run_episode(episode, env, learner)?;
            rewards.push(summary.total_reward);

            if let Some(epsilon) = learner.exploration_rate() {
                learner.set_exploration_rate(self.config.epsilon_schedule.next(epsilon));
            }
            summary.epsilon = learner.exploration_rate();

            debug!(
                episode,
                reward = summary.total_reward,
                steps = summary.steps,
                terminated = summary.terminated,
                reached_goal = summary.reached_goal,
                "episode finished"
            );

            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(rewards, learner.exploration_rate()))
    }

    fn run_episode(
        &mut self,
        episode: usize,
        env: &mut dyn Environment,
        learner: &mut dyn Learner,
    ) -> Result<EpisodeSummary> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut state = env.reset();
        let mut total_reward = 0.0;
        let mut steps = 0;
        let mut terminated = false;
        let mut reached_goal = false;

        while steps < self.config.max_steps_per_episode {
            let action = learner.select_action(state, false);
            let feedback = env.step(action)?;
            let transition = Transition {
                state,
                action,
                reward: feedback.reward,
                next_state: feedback.state,
                done: feedback.done,
            };
            learner.learn(&transition)?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &transition)?;
            }

            state = feedback.state;
            total_reward += feedback.reward;
            steps += 1;

            if feedback.done {
                terminated = true;
                reached_goal = !feedback.truncated;
                break;
            }
        }

        Ok(EpisodeSummary {
            episode,
            total_reward,
            steps,
            terminated,
            reached_goal,
            epsilon: None,
        })
    }
}
