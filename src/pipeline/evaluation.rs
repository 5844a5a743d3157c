//! Greedy policy evaluation

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, Learner},
};

/// Trace of one greedy episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollout {
    /// Visited states, starting with the reset state
    pub states: Vec<usize>,
    /// Actions taken; one fewer than `states`
    pub actions: Vec<usize>,
    pub total_reward: f32,
    /// Whether the environment ended the episode (goal or its own step cap)
    pub done: bool,
    /// Whether the episode ended in a terminal state rather than a step cap
    pub reached_goal: bool,
}

impl Rollout {
    pub fn steps(&self) -> usize {
        self.actions.len()
    }
}

/// Play one episode without exploration and without learning.
///
/// Stops when the environment reports `done` or after `max_steps` steps.
pub fn greedy_rollout(
    env: &mut dyn Environment,
    learner: &mut dyn Learner,
    max_steps: usize,
) -> Result<Rollout> {
    let mut state = env.reset();
    let mut rollout = Rollout {
        states: vec![state],
        actions: Vec::new(),
        total_reward: 0.0,
        done: false,
        reached_goal: false,
    };

    for _ in 0..max_steps {
        let action = learner.select_action(state, true);
        let feedback = env.step(action)?;

        rollout.actions.push(action);
        rollout.states.push(feedback.state);
        rollout.total_reward += feedback.reward;
        state = feedback.state;

        if feedback.done {
            rollout.done = true;
            rollout.reached_goal = !feedback.truncated;
            break;
        }
    }

    Ok(rollout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gridworld::{Action, GridConfig, GridWorld},
        q_learning::{QLearningAgent, QLearningConfig},
    };

    #[test]
    fn test_rollout_follows_table() {
        let mut env = GridWorld::new(GridConfig::new(3, 1)).unwrap();
        let mut agent = QLearningAgent::new(3, 4, QLearningConfig::default().with_seed(0)).unwrap();
        agent.update(0, Action::Right.index(), 1.0, 1, true);
        agent.update(1, Action::Right.index(), 1.0, 2, true);

        let rollout = greedy_rollout(&mut env, &mut agent, 10).unwrap();

        assert_eq!(rollout.states, vec![0, 1, 2]);
        assert_eq!(rollout.actions, vec![1, 1]);
        assert_eq!(rollout.total_reward, 9.0);
        assert!(rollout.done);
        assert!(rollout.reached_goal);
        assert_eq!(rollout.steps(), 2);
    }

    #[test]
    fn test_rollout_respects_cap() {
        let mut env = GridWorld::new(GridConfig::new(3, 1)).unwrap();
        let mut agent = QLearningAgent::new(3, 4, QLearningConfig::default().with_seed(0)).unwrap();
        // Make "left" the only greedy choice so the agent stays put.
        for state in 0..3 {
            agent.update(state, Action::Left.index(), 1.0, state, true);
        }

        let rollout = greedy_rollout(&mut env, &mut agent, 4).unwrap();

        assert_eq!(rollout.steps(), 4);
        assert!(!rollout.done);
        assert!(!rollout.reached_goal);
        assert_eq!(rollout.total_reward, -4.0);
    }
}
