//! Newtype wrappers for improved type safety and domain modeling.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::tictactoe::Cell;

/// Canonical serialization of a board configuration.
///
/// Row-major concatenation of the nine cell digits (`0` empty, `1` first
/// marker, `2` second marker). Every grid has exactly one key and every key
/// names exactly one grid, which makes it the lookup key for the value table.
/// Serialized as its 9-character string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey([Cell; 9]);

impl StateKey {
    /// Number of cells encoded by a key.
    pub const LEN: usize = 9;

    /// Key of the empty board.
    pub const fn empty() -> Self {
        StateKey([Cell::Empty; 9])
    }

    /// Build a key from row-major cells.
    pub const fn from_cells(cells: [Cell; 9]) -> Self {
        StateKey(cells)
    }

    /// Parse a 9-character digit string over `{0, 1, 2}`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKeyLength`] for strings that are not
    /// exactly 9 characters and [`crate::Error::InvalidCellDigit`] for any
    /// character other than `0`, `1` or `2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_q::types::StateKey;
    ///
    /// let key = StateKey::parse("200000000")?;
    /// assert_eq!(key.to_string(), "200000000");
    /// # Ok::<(), tictactoe_q::Error>(())
    /// ```
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let got = s.chars().count();
        if got != Self::LEN {
            return Err(crate::Error::InvalidStateKeyLength {
                expected: Self::LEN,
                got,
                key: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (position, character) in s.chars().enumerate() {
            cells[position] =
                Cell::from_digit(character).ok_or_else(|| crate::Error::InvalidCellDigit {
                    character,
                    position,
                    key: s.to_string(),
                })?;
        }
        Ok(StateKey(cells))
    }

    /// Row-major cells of the encoded grid.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.0
    }

    /// The same grid seen from the other seat: every `1` becomes `2` and
    /// every `2` becomes `1`.
    #[must_use]
    pub fn swap_players(&self) -> Self {
        StateKey(self.0.map(Cell::swapped))
    }
}

impl Default for StateKey {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.to_digit())?;
        }
        Ok(())
    }
}

impl FromStr for StateKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for StateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StateKey::parse(&raw).map_err(de::Error::custom)
    }
}
