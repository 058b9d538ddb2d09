//! Tabular Q-learning with symmetry expansion
//!
//! This module implements the learning core:
//!
//! - [`QTable`]: (state key, action) → value with an implicit 0 baseline
//! - [`symmetric_transitions`]: one transition mapped onto its symmetric
//!   images under a chosen [`SymmetryPolicy`]
//! - [`epsilon_greedy`]: exploration plus uniform tie-breaking among maxima
//! - [`QLearningAgent`]: the TD update that writes every symmetric image
//!
//! ## Usage Example
//!
//! ```
//! use tictactoe_q::q_learning::QLearningAgent;
//! use tictactoe_q::tictactoe::{Action, Board, Player};
//!
//! let mut agent = QLearningAgent::new(
//!     0.1, // alpha
//!     1.0, // gamma
//!     0.1, // epsilon
//! )
//! .with_seed(42);
//!
//! let mut board = Board::new();
//! let state = board.state_key();
//! let action = agent.choose_action(&state, &board.legal_actions(), true)?;
//! board.apply_move(action, Player::One);
//! agent.learn(&state, action, -0.1, &board.state_key(), &board.legal_actions())?;
//! # Ok::<(), tictactoe_q::Error>(())
//! ```

pub mod agent;
pub mod expansion;
pub mod policy;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{AgentParams, QLearningAgent};
pub use expansion::{SymmetryPolicy, symmetric_transitions};
pub use policy::epsilon_greedy;
pub use q_table::{INIT_Q_VALUE, QEntry, QTable};
pub use serialization::{SavedAgent, TrainingMetadata};
