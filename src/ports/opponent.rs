//! Opponent port - whoever plays the other seat during training and evaluation

use crate::{
    Result,
    tictactoe::{Action, Board, Player},
};

/// A move source for the seat the learning agent does not occupy.
///
/// Implementations receive the live board and the marker they play with and
/// return an empty cell. They must not assume which seat opened the game.
pub trait Opponent: Send {
    /// Pick a move for `player` on `board`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no legal actions.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action>;

    /// Name used in reports and logs
    fn name(&self) -> &str;
}

impl<O: Opponent + ?Sized> Opponent for Box<O> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        (**self).select_move(board, player)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
