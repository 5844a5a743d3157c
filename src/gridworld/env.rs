//! Grid world state machine

use serde::{Deserialize, Serialize};

use super::{
    config::GridConfig,
    position::{Action, Position},
};
use crate::{
    Error, Result,
    ports::{Environment, Feedback},
};

/// Reward for every step that does not reach the goal
pub const STEP_REWARD: f32 = -1.0;

/// Reward for the step that lands on the goal
pub const GOAL_REWARD: f32 = 10.0;

/// Debugging information attached to each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Position after the step
    pub position: Position,
    /// Steps taken so far in the episode, including this one
    pub steps: usize,
}

/// Result of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub state: usize,
    pub reward: f32,
    pub done: bool,
    /// The step cap ended the episode before the goal was reached
    pub truncated: bool,
    pub info: StepInfo,
}

/// Deterministic grid-navigation environment.
///
/// Moves that would leave the grid or enter an obstacle leave the agent where
/// it is; they still cost a step.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: GridConfig,
    position: Position,
    steps: usize,
}

impl GridWorld {
    /// Create an environment positioned at the start cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the layout fails
    /// [`GridConfig::validate`].
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let position = config.start;
        Ok(Self {
            config,
            position,
            steps: 0,
        })
    }

    /// Return to the start cell and clear the step counter.
    pub fn reset(&mut self) -> usize {
        self.position = self.config.start;
        self.steps = 0;
        self.state()
    }

    pub fn step(&mut self, action: Action) -> StepOutcome {
        if let Some(candidate) = self.position.moved(action).filter(|&p| self.is_open(p)) {
            self.position = candidate;
        }

        self.steps += 1;

        let (reward, done, truncated) = if self.position == self.config.goal {
            (GOAL_REWARD, true, false)
        } else {
            let capped = self.steps >= self.config.max_steps;
            (STEP_REWARD, capped, capped)
        };

        StepOutcome {
            state: self.state(),
            reward,
            done,
            truncated,
            info: StepInfo {
                position: self.position,
                steps: self.steps,
            },
        }
    }

    /// Step with a raw action index, as produced by value tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for indices outside `0..4`; the
    /// environment is left untouched in that case.
    pub fn step_index(&mut self, action: usize) -> Result<StepOutcome> {
        let action = Action::try_from(action)?;
        Ok(self.step(action))
    }

    /// State id of the current position
    pub fn state(&self) -> usize {
        self.state_of(self.position)
    }

    /// Encode a position as `x + y * width`.
    pub fn state_of(&self, position: Position) -> usize {
        position.x + position.y * self.config.width
    }

    /// Inverse of [`GridWorld::state_of`].
    pub fn position_of(&self, state: usize) -> Result<Position> {
        if state >= self.n_states() {
            return Err(Error::StateOutOfRange {
                state,
                n_states: self.n_states(),
            });
        }
        Ok(Position::new(
            state % self.config.width,
            state / self.config.width,
        ))
    }

    pub fn n_states(&self) -> usize {
        self.config.n_states()
    }

    pub fn n_actions(&self) -> usize {
        Action::COUNT
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    fn is_open(&self, position: Position) -> bool {
        self.config.contains(position) && !self.config.is_obstacle(position)
    }
}

impl Environment for GridWorld {
    fn reset(&mut self) -> usize {
        GridWorld::reset(self)
    }

    fn step(&mut self, action: usize) -> Result<Feedback> {
        let outcome = self.step_index(action)?;
        Ok(Feedback {
            state: outcome.state,
            reward: outcome.reward,
            done: outcome.done,
            truncated: outcome.truncated,
        })
    }

    fn n_states(&self) -> usize {
        GridWorld::n_states(self)
    }

    fn n_actions(&self) -> usize {
        GridWorld::n_actions(self)
    }
}
