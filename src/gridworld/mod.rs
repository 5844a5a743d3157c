//! Deterministic grid-navigation environment
//!
//! The agent walks a `width x height` rectangle one cell at a time. Every step
//! costs `-1`; the step that lands on the goal pays `+10` and ends the episode.
//! Episodes are also cut off after a configurable number of steps.
//!
//! ```
//! use gridq::gridworld::{Action, GridConfig, GridWorld};
//!
//! let mut env = GridWorld::new(GridConfig::new(2, 1))?;
//! let start = env.reset();
//! let outcome = env.step(Action::Right);
//! assert_eq!(start, 0);
//! assert_eq!(outcome.reward, 10.0);
//! assert!(outcome.done);
//! # Ok::<(), gridq::Error>(())
//! ```

pub mod config;
pub mod env;
pub mod position;
pub mod render;

pub use config::GridConfig;
pub use env::{GOAL_REWARD, GridWorld, STEP_REWARD, StepInfo, StepOutcome};
pub use position::{Action, Position};
pub use render::{render_ascii, render_policy};
