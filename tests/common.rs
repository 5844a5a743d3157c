//! Shared helpers for the gridq integration tests.

#![allow(dead_code)]

use gridq::{
    gridworld::{GridConfig, GridWorld},
    pipeline::{TrainingConfig, TrainingPipeline, TrainingResult},
    q_learning::{EpsilonSchedule, QLearningAgent, QLearningConfig},
};

/// 3x3 grid, start (0,0), goal (2,2), 50-step cap.
pub fn three_by_three() -> GridWorld {
    GridWorld::new(GridConfig::new(3, 3)).unwrap()
}

/// Agent with the default CLI hyperparameters.
pub fn default_agent(env: &GridWorld, seed: u64) -> QLearningAgent {
    QLearningAgent::new(
        env.n_states(),
        env.n_actions(),
        QLearningConfig::new(0.1, 0.99, 0.3).with_seed(seed),
    )
    .unwrap()
}

/// Train `agent` with ε decaying ×0.995 down to 0.01.
pub fn train(
    env: &mut GridWorld,
    agent: &mut QLearningAgent,
    episodes: usize,
    seed: u64,
) -> TrainingResult {
    let config = TrainingConfig {
        episodes,
        max_steps_per_episode: env.config().max_steps,
        seed: Some(seed),
        epsilon_schedule: EpsilonSchedule::exponential(0.995, 0.01),
    };
    TrainingPipeline::new(config).run(env, agent).unwrap()
}
