//! CLI infrastructure for gridq
//!
//! This module provides the command-line interface for training a Q-learning
//! agent on a grid world and replaying the learned policy.

pub mod commands;
pub mod config;
pub mod output;
