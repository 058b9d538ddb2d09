//! CLI infrastructure
//!
//! Command-line interface for training, evaluating, inspecting and playing
//! against Q-learning agents.

pub mod commands;
pub mod output;
