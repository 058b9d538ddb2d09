//! Move history entries and game outcomes

use serde::{Deserialize, Serialize};

use super::board::{Action, Player};

/// A move recorded in the board history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub action: Action,
}

impl Move {
    pub fn new(player: Player, action: Action) -> Self {
        Move { player, action }
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}
