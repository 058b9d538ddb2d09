//! Training and evaluation drivers
//!
//! The learning agent always holds the first-player marker on the board.
//! [`Role`] only decides who opens: as [`Role::Second`] the opponent places
//! a random opening move before the agent's first turn.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

pub mod config;
mod episode;
pub mod evaluation;
pub mod trainer;

pub use config::{Rewards, TrainingConfig};
pub use evaluation::{MatchReport, evaluate_match};
pub use trainer::{Trainer, TrainingReport, train_first_mover, train_second_mover};

/// Which seat the learning agent takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The agent opens the game
    #[default]
    First,
    /// The opponent opens the game
    Second,
}

impl Role {
    pub const VARIANTS: [&'static str; 2] = ["first", "second"];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::First => "first",
            Role::Second => "second",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "x" => Ok(Role::First),
            "second" | "o" => Ok(Role::Second),
            _ => Err(Error::ParseRole {
                input: s.to_string(),
                expected: Self::VARIANTS.join(", "),
            }),
        }
    }
}
