//! D4 symmetry group operations on the 3x3 board

use serde::{Deserialize, Serialize};

use super::board::{Action, Cell};
use crate::types::StateKey;

/// One of the eight symmetries of the square.
///
/// Rotations turn counter-clockwise. `FlipMainDiagonal` mirrors across the
/// top-left to bottom-right diagonal (transpose) and `FlipAntiDiagonal` across
/// the top-right to bottom-left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symmetry {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipLeftRight,
    FlipUpDown,
    FlipAntiDiagonal,
    FlipMainDiagonal,
}

impl Symmetry {
    /// All 8 D4 elements, identity first
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::FlipLeftRight,
        Symmetry::FlipUpDown,
        Symmetry::FlipAntiDiagonal,
        Symmetry::FlipMainDiagonal,
    ];

    /// Where the cell at `action` lands after the transform
    pub fn transform_action(self, action: Action) -> Action {
        let (r, c) = (action.row, action.col);
        let (row, col) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::Rotate90 => (2 - c, r),
            Symmetry::Rotate180 => (2 - r, 2 - c),
            Symmetry::Rotate270 => (c, 2 - r),
            Symmetry::FlipLeftRight => (r, 2 - c),
            Symmetry::FlipUpDown => (2 - r, c),
            Symmetry::FlipAntiDiagonal => (2 - c, 2 - r),
            Symmetry::FlipMainDiagonal => (c, r),
        };
        Action::new(row, col)
    }

    /// The element that undoes this one
    pub fn inverse(self) -> Symmetry {
        match self {
            Symmetry::Rotate90 => Symmetry::Rotate270,
            Symmetry::Rotate270 => Symmetry::Rotate90,
            other => other,
        }
    }

    /// Apply the transform to row-major cells
    pub fn apply_to_cells(self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            let target = self.transform_action(Action::from_index(idx));
            transformed[target.index()] = cell;
        }
        transformed
    }

    /// Apply the transform to the grid encoded by `key`
    pub fn apply_to_key(self, key: &StateKey) -> StateKey {
        StateKey::from_cells(self.apply_to_cells(key.cells()))
    }
}
