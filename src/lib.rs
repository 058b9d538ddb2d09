//! Tabular Q-learning for Tic-Tac-Toe with board-symmetry expansion
//!
//! This crate provides:
//! - A 3x3 board engine with 9-character state keys and move history
//! - The eight symmetries of the square acting on boards and moves
//! - A Q-learning agent whose every update is written to all symmetric
//!   images of the transition
//! - Training and evaluation drivers for the opening and replying seats
//! - A transport-free play session for human-vs-agent games
//! - MessagePack persistence of trained agents

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod session;
pub mod tictactoe;
pub mod training;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{QLearningAgent, QTable, SymmetryPolicy};
pub use tictactoe::{Action, Board, Player};
pub use types::StateKey;
