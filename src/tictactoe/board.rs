//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::game::{GameOutcome, Move};
use crate::{Error, types::StateKey};

/// Row-major cell indices of the three rows, three columns and two diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A cell on the Tic-Tac-Toe board
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Cell {
    #[default]
    Empty,
    P1,
    P2,
}

impl Cell {
    pub fn to_digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::P1 => '1',
            Cell::P2 => '2',
        }
    }

    pub fn from_digit(c: char) -> Option<Cell> {
        match c {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::P1),
            '2' => Some(Cell::P2),
            _ => None,
        }
    }

    /// Exchange the two markers, leaving empty cells alone.
    pub fn swapped(self) -> Cell {
        match self {
            Cell::P1 => Cell::P2,
            Cell::P2 => Cell::P1,
            Cell::Empty => Cell::Empty,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::P1,
            Player::Two => Cell::P2,
        }
    }
}

/// A cell coordinate `(row, col)`, each in `0..3`
///
/// Deserialization rejects coordinates off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawAction")]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Row-major position (0-8).
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `0..3`.
    pub fn index(self) -> usize {
        assert!(
            self.row < 3 && self.col < 3,
            "action {self} is outside the 3x3 board"
        );
        self.row * 3 + self.col
    }

    /// Inverse of [`Action::index`].
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..9`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < 9, "position {index} is outside the 3x3 board");
        Action::new(index / 3, index % 3)
    }
}

#[derive(Deserialize)]
struct RawAction {
    row: usize,
    col: usize,
}

impl TryFrom<RawAction> for Action {
    type Error = Error;

    fn try_from(RawAction { row, col }: RawAction) -> Result<Self, Self::Error> {
        if row < 3 && col < 3 {
            Ok(Action::new(row, col))
        } else {
            Err(Error::ActionOutOfRange { row, col })
        }
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Action::new(row, col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Mutable 3x3 board with a move history.
///
/// Cells are stored row-major. Illegal moves are reported through the boolean
/// return value and never mutate the board. Coordinates outside `0..3` are a
/// caller bug and panic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; 9],
    history: Vec<Move>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
            history: Vec::new(),
        }
    }

    /// Create a board holding the grid encoded by `key`, with an empty history.
    pub fn from_state_key(key: &StateKey) -> Self {
        Board {
            cells: *key.cells(),
            history: Vec::new(),
        }
    }

    /// Replace the grid with the one encoded by `key` and clear the history.
    pub fn set_state_key(&mut self, key: &StateKey) {
        self.cells = *key.cells();
        self.history.clear();
    }

    /// Canonical 9-character serialization of the grid
    pub fn state_key(&self) -> StateKey {
        StateKey::from_cells(self.cells)
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get the cell at `action`
    pub fn cell(&self, action: Action) -> Cell {
        self.cells[action.index()]
    }

    /// Moves applied since the last reset, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Check whether the cell at `action` is empty
    pub fn is_legal(&self, action: Action) -> bool {
        self.cell(action) == Cell::Empty
    }

    /// Place `player`'s marker at `action` if the cell is empty.
    ///
    /// Returns whether the move was applied. Successful moves are appended to
    /// the history.
    pub fn apply_move(&mut self, action: Action, player: Player) -> bool {
        if !self.is_legal(action) {
            return false;
        }
        self.cells[action.index()] = player.to_cell();
        self.history.push(Move::new(player, action));
        true
    }

    /// Withdraw the most recent move, which must have been played at `action`.
    ///
    /// Returns `false` without touching the board when the cell is empty or
    /// when `action` is not the most recent history entry.
    pub fn undo_last(&mut self, action: Action) -> bool {
        if self.is_legal(action) {
            return false;
        }
        match self.history.last() {
            Some(last) if last.action == action => {
                self.undo();
                true
            }
            _ => false,
        }
    }

    /// Withdraw the most recent move, whatever it was.
    pub fn undo(&mut self) -> Option<Move> {
        let last = self.history.pop()?;
        self.cells[last.action.index()] = Cell::Empty;
        Some(last)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        let mark = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| self.cells[idx] == mark))
    }

    /// Check if the grid is full.
    ///
    /// This does not look at winning lines; callers check wins first.
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::One) {
            Some(Player::One)
        } else if self.has_won(Player::Two) {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Outcome of the game, or `None` while it is still in progress
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.winner() {
            Some(player) => Some(GameOutcome::Win(player)),
            None if self.is_draw() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    /// Check if the game is over (win or full grid)
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// All empty cells in row-major order
    pub fn legal_actions(&self) -> Vec<Action> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Action::from_index(i))
            .collect()
    }

    /// Clear the grid and the history
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
        self.history.clear();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_digit())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
