//! Tabular Q-learning on a discrete grid world
//!
//! This crate provides:
//! - A deterministic grid-navigation environment with obstacles and a step cap
//! - A Q-learning agent with ε-greedy exploration and random tie-breaking
//! - An environment-agnostic training loop with pluggable observers
//! - MessagePack persistence of learned tables and CSV learning curves
//! - The `gridq` command-line driver
//!
//! # Examples
//!
//! ```
//! use gridq::{
//!     gridworld::{GridConfig, GridWorld},
//!     pipeline::{TrainingConfig, TrainingPipeline, greedy_rollout},
//!     q_learning::{QLearningAgent, QLearningConfig},
//! };
//!
//! let mut env = GridWorld::new(GridConfig::new(3, 1)).unwrap();
//! let mut agent = QLearningAgent::new(
//!     env.n_states(),
//!     env.n_actions(),
//!     QLearningConfig::new(0.5, 0.9, 0.5).with_seed(1),
//! )
//! .unwrap();
//!
//! let config = TrainingConfig {
//!     episodes: 200,
//!     seed: Some(1),
//!     ..TrainingConfig::default()
//! };
//! TrainingPipeline::new(config).run(&mut env, &mut agent).unwrap();
//!
//! let rollout = greedy_rollout(&mut env, &mut agent, 10).unwrap();
//! assert_eq!(rollout.states, vec![0, 1, 2]);
//! ```

pub mod adapters;
pub mod cli;
pub mod error;
pub mod export;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod utils;

pub use error::{Error, Result};
