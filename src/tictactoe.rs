//! Tic-Tac-Toe board engine

pub mod board;
pub mod game;
pub mod symmetry;

pub use board::{Action, Board, Cell, Player, WINNING_LINES};
pub use game::{GameOutcome, Move};
pub use symmetry::Symmetry;
