//! Ports (trait boundaries) between the learning core and its collaborators.
//!
//! The training pipeline only talks to environments, learners, observers and
//! table storage through these traits, so none of them needs to know about the
//! others' concrete types.

pub mod environment;
pub mod learner;
pub mod observer;
pub mod repository;

pub use environment::{Environment, Feedback};
pub use learner::{Learner, Transition};
pub use observer::{EpisodeSummary, Observer};
pub use repository::QTableRepository;
