//! Construction parameters for the grid world

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::{Error, Result};

/// Default episode step cap
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Static layout of a grid world.
///
/// The builder methods never fail; [`GridConfig::validate`] (called by
/// [`GridWorld::new`](super::GridWorld::new)) rejects layouts that would give an
/// unusable environment.
///
/// # Examples
///
/// ```
/// use gridq::gridworld::{GridConfig, Position};
///
/// let config = GridConfig::new(4, 3)
///     .with_max_steps(20)
///     .with_obstacle(Position::new(1, 1));
/// assert_eq!(config.goal, Position::new(3, 2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub start: Position,
    pub goal: Position,
    pub max_steps: usize,
    pub obstacles: BTreeSet<Position>,
}

impl GridConfig {
    /// Layout with the start in the top-left corner and the goal in the
    /// bottom-right corner.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            start: Position::new(0, 0),
            goal: Position::new(width.saturating_sub(1), height.saturating_sub(1)),
            max_steps: DEFAULT_MAX_STEPS,
            obstacles: BTreeSet::new(),
        }
    }

    pub fn with_start(mut self, start: impl Into<Position>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_goal(mut self, goal: impl Into<Position>) -> Self {
        self.goal = goal.into();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_obstacle(mut self, obstacle: impl Into<Position>) -> Self {
        self.obstacles.insert(obstacle.into());
        self
    }

    pub fn with_obstacles<I, P>(mut self, obstacles: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        self.obstacles.extend(obstacles.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// Number of cells. Saturates for layouts that [`GridConfig::validate`]
    /// would reject as too large.
    pub fn n_states(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Check that the layout describes a usable episode.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::config(format!(
                "grid must be at least 1x1 (got {}x{})",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(Error::config(format!(
                "a {}x{} grid has more cells than state ids can address",
                self.width, self.height
            )));
        }
        if self.max_steps == 0 {
            return Err(Error::config("max_steps must be at least 1"));
        }
        for (name, position) in [("start", self.start), ("goal", self.goal)] {
            if !self.contains(position) {
                return Err(Error::config(format!(
                    "{name} {position} lies outside the {}x{} grid",
                    self.width, self.height
                )));
            }
            if self.is_obstacle(position) {
                return Err(Error::config(format!(
                    "{name} {position} is covered by an obstacle"
                )));
            }
        }
        if self.start == self.goal {
            return Err(Error::config(format!(
                "start and goal coincide at {}",
                self.start
            )));
        }
        if let Some(outside) = self.obstacles.iter().find(|&&p| !self.contains(p)) {
            return Err(Error::config(format!(
                "obstacle {outside} lies outside the {}x{} grid",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(5, 5)
    }
}
