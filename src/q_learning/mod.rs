//! Tabular Q-learning
//!
//! Q-learning is off-policy temporal-difference control: every update
//! bootstraps from the best action in the successor state, whatever action the
//! exploring policy actually takes next.
//!
//! ```text
//! target        = r                              if done
//!               = r + γ · max_a' Q(s', a')       otherwise
//! Q(s, a)      ← Q(s, a) + α · (target − Q(s, a))
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use gridq::q_learning::{QLearningAgent, QLearningConfig};
//!
//! let config = QLearningConfig::new(0.5, 0.9, 0.1).with_seed(7);
//! let mut agent = QLearningAgent::new(4, 2, config)?;
//!
//! agent.update(0, 1, 10.0, 1, true);
//! assert_eq!(agent.q_table().get(0, 1), 5.0);
//! assert_eq!(agent.select_action(0, true), 1);
//! # Ok::<(), gridq::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod exploration;
pub mod q_table;
pub mod serialization;

pub use agent::QLearningAgent;
pub use config::QLearningConfig;
pub use exploration::EpsilonSchedule;
pub use q_table::QTable;
pub use serialization::SavedQTable;
