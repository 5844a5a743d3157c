//! Training and evaluation pipeline
//!
//! This module provides:
//! - The episodic training loop over any [`Environment`] and [`Learner`]
//! - Greedy rollouts for evaluating a learned policy
//! - Observers for progress bars, metrics, log lines and JSONL export
//! - A uniformly random baseline learner

pub mod baselines;
pub mod evaluation;
pub mod observers;
pub mod training;

pub use baselines::RandomLearner;
pub use evaluation::{Rollout, greedy_rollout};
pub use observers::{
    EpisodeRecord, JsonlObserver, LoggingObserver, MetricsObserver, MetricsSummary,
    ProgressObserver, SharedObserver,
};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Environment, Learner, Observer};
