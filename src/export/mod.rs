//! Export of training data for external analysis

pub mod learning_curve;

pub use learning_curve::{LearningCurveRow, LearningCurveWriter, read_learning_curve};
