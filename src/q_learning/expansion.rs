//! Symmetry expansion of learned transitions
//!
//! A transition `(state, action)` is equivalent to its image under any of the
//! eight board symmetries. Expanding it lets one real game move train up to
//! eight table entries. How duplicate images are handled is an explicit
//! [`SymmetryPolicy`]:
//!
//! | Policy | Result for `("010000200", (1, 2))` | Result for `("200000000", (2, 2))` |
//! |--------|-----------------------------------|-----------------------------------|
//! | `All` | 8 pairs | 8 pairs, 4 distinct |
//! | `Distinct` | 8 pairs | 4 pairs |
//! | `PostMoveOrbit` | 4 pairs | 4 pairs |
//!
//! `All` and `Distinct` write exactly the same table entries during learning.
//! `PostMoveOrbit` decides redundancy from the post-move board alone; when the
//! post-move board is symmetric but the pre-move board is not, it drops pairs
//! that are genuinely different and leaves them untrained.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{Action, Board, Player, Symmetry},
    types::StateKey,
};

/// Strategy for de-duplicating the symmetric images of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymmetryPolicy {
    /// One pair per D4 element, duplicates included
    #[default]
    All,
    /// Exact duplicate pairs removed, first occurrence kept
    Distinct,
    /// Transforms that map the post-move board onto an image already seen
    /// are skipped
    PostMoveOrbit,
}

impl SymmetryPolicy {
    pub const VARIANTS: [&'static str; 3] = ["all", "distinct", "post_move_orbit"];

    pub fn as_str(self) -> &'static str {
        match self {
            SymmetryPolicy::All => "all",
            SymmetryPolicy::Distinct => "distinct",
            SymmetryPolicy::PostMoveOrbit => "post_move_orbit",
        }
    }
}

impl fmt::Display for SymmetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymmetryPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Ok(SymmetryPolicy::All),
            "distinct" => Ok(SymmetryPolicy::Distinct),
            "post_move_orbit" => Ok(SymmetryPolicy::PostMoveOrbit),
            _ => Err(Error::ParseSymmetryPolicy {
                input: s.to_string(),
                expected: Self::VARIANTS.join(", "),
            }),
        }
    }
}

/// Images of `(state, action)` under the board symmetries.
///
/// The move is always placed with the first-player marker; callers playing
/// the other seat swap the labels of `state` beforehand.
///
/// # Errors
///
/// Returns [`Error::IllegalTransition`] when `action` is not an empty cell of
/// `state`. That is a caller bug, not a recoverable input.
pub fn symmetric_transitions(
    state: &StateKey,
    action: Action,
    policy: SymmetryPolicy,
) -> Result<Vec<(StateKey, Action)>> {
    let mut board = Board::from_state_key(state);
    if !board.apply_move(action, Player::One) {
        return Err(Error::IllegalTransition {
            state: state.to_string(),
            action,
        });
    }
    let next_state = board.state_key();

    let image = |symmetry: Symmetry| {
        (
            symmetry.apply_to_key(state),
            symmetry.transform_action(action),
        )
    };

    let pairs = match policy {
        SymmetryPolicy::All => Symmetry::ALL.iter().map(|&s| image(s)).collect(),
        SymmetryPolicy::Distinct => {
            let mut pairs: Vec<(StateKey, Action)> = Vec::with_capacity(8);
            for symmetry in Symmetry::ALL {
                let pair = image(symmetry);
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
            pairs
        }
        SymmetryPolicy::PostMoveOrbit => {
            let mut seen_next: Vec<StateKey> = Vec::with_capacity(8);
            let mut pairs = Vec::with_capacity(8);
            for symmetry in Symmetry::ALL {
                let transformed_next = symmetry.apply_to_key(&next_state);
                if seen_next.contains(&transformed_next) {
                    continue;
                }
                seen_next.push(transformed_next);
                pairs.push(image(symmetry));
            }
            pairs
        }
    };

    Ok(pairs)
}
