//! Human-vs-agent play, independent of any transport.
//!
//! The wire shapes mirror what a browser client sends: a 3x3 grid of
//! `"X"`, `"O"` or `""`, with the agent always `"X"` and the human `"O"`.
//! A [`PlaySession`] owns its own board and reads the two trained tables
//! through shared references, so any number of sessions can run side by
//! side over the same tables.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    q_learning::{QTable, epsilon_greedy},
    tictactoe::{Action, Board, Cell, Player},
    types::StateKey,
};

pub const AGENT_MARK: &str = "X";
pub const HUMAN_MARK: &str = "O";

pub const MSG_INVALID_MOVE: &str = "Invalid Move!";
pub const MSG_INVALID_BOARD: &str = "Invalid Board!";
pub const MSG_GAME_OVER: &str = "Game is over!";
pub const MSG_HUMAN_WINS: &str = "You win!";
pub const MSG_AGENT_WINS: &str = "AI wins!";
pub const MSG_DRAW: &str = "It is a draw!";

/// Board as exchanged with clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// `board[x][y]`, row `x`, column `y`
    pub board: [[String; 3]; 3],
    /// `"X"` when the agent opened the game, `"O"` when the human did
    pub player_who_move_first: String,
    pub message: String,
}

impl GameState {
    /// Empty board for a game opened by `first` (`"X"` or `"O"`).
    pub fn new(first: &str) -> Self {
        Self {
            board: Default::default(),
            player_who_move_first: first.to_string(),
            message: String::new(),
        }
    }

    fn agent_moved_first(&self) -> bool {
        self.player_who_move_first == AGENT_MARK
    }

    fn to_state_key(&self) -> Option<StateKey> {
        let mut cells = [Cell::Empty; 9];
        for (x, row) in self.board.iter().enumerate() {
            for (y, mark) in row.iter().enumerate() {
                cells[x * 3 + y] = match mark.as_str() {
                    AGENT_MARK => Cell::P1,
                    HUMAN_MARK => Cell::P2,
                    "" => Cell::Empty,
                    _ => return None,
                };
            }
        }
        Some(StateKey::from_cells(cells))
    }

    fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}

/// A human move on a given state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub state: GameState,
    pub x: i64,
    pub y: i64,
}

/// One play context: a private board plus read-only access to the trained
/// first-mover and second-mover tables.
pub struct PlaySession {
    first_mover: Arc<QTable>,
    second_mover: Arc<QTable>,
    board: Board,
    rng: StdRng,
}

impl PlaySession {
    pub fn new(first_mover: Arc<QTable>, second_mover: Arc<QTable>) -> Self {
        Self {
            first_mover,
            second_mover,
            board: Board::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Fix the tie-breaking randomness.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn agent_reply(&mut self, state: &GameState) -> Result<Action> {
        let table = if state.agent_moved_first() {
            &self.first_mover
        } else {
            &self.second_mover
        };
        epsilon_greedy(
            table,
            &self.board.state_key(),
            &self.board.legal_actions(),
            0.0,
            &mut self.rng,
        )
    }

    /// The agent's opening move for a game it starts.
    pub fn opening_move(&mut self) -> Result<GameState> {
        let mut state = GameState::new(AGENT_MARK);
        self.board.reset();
        let action = self.agent_reply(&state)?;
        self.board.apply_move(action, Player::One);
        state.board[action.row][action.col] = AGENT_MARK.to_string();
        Ok(state)
    }

    /// Apply the human's move and, unless that ends the game, the agent's
    /// greedy reply.
    ///
    /// Validation problems are reported in the returned state's message with
    /// the board unchanged. A win is reported ahead of a full board.
    pub fn make_move(&mut self, request: MoveRequest) -> Result<GameState> {
        let MoveRequest { state, x, y } = request;
        let mut state = state.with_message("");

        let Some(key) = state.to_state_key() else {
            return Ok(state.with_message(MSG_INVALID_BOARD));
        };
        self.board.set_state_key(&key);
        if self.board.is_terminal() {
            return Ok(state.with_message(MSG_GAME_OVER));
        }

        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return Ok(state.with_message(MSG_INVALID_MOVE));
        };
        if x >= 3 || y >= 3 || !self.board.apply_move(Action::new(x, y), Player::Two) {
            return Ok(state.with_message(MSG_INVALID_MOVE));
        }
        state.board[x][y] = HUMAN_MARK.to_string();

        if self.board.has_won(Player::Two) {
            return Ok(state.with_message(MSG_HUMAN_WINS));
        }
        if self.board.is_draw() {
            return Ok(state.with_message(MSG_DRAW));
        }

        log::debug!(
            "agent replying on {} with the {} table",
            self.board.state_key(),
            if state.agent_moved_first() { "first-mover" } else { "second-mover" }
        );
        let action = self.agent_reply(&state)?;
        self.board.apply_move(action, Player::One);
        state.board[action.row][action.col] = AGENT_MARK.to_string();

        if self.board.has_won(Player::One) {
            Ok(state.with_message(MSG_AGENT_WINS))
        } else if self.board.is_draw() {
            Ok(state.with_message(MSG_DRAW))
        } else {
            Ok(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: [&str; 3]) -> [[String; 3]; 3] {
        rows.map(|row| {
            let marks: Vec<String> = row
                .chars()
                .map(|c| match c {
                    'X' => "X".to_string(),
                    'O' => "O".to_string(),
                    _ => String::new(),
                })
                .collect();
            [marks[0].clone(), marks[1].clone(), marks[2].clone()]
        })
    }

    fn session() -> PlaySession {
        PlaySession::new(Arc::new(QTable::new()), Arc::new(QTable::new())).with_seed(1)
    }

    fn request(rows: [&str; 3], first: &str, x: i64, y: i64) -> MoveRequest {
        MoveRequest {
            state: GameState {
                board: grid(rows),
                player_who_move_first: first.to_string(),
                message: "stale".to_string(),
            },
            x,
            y,
        }
    }

    #[test]
    fn test_occupied_cell_is_rejected_unchanged() {
        let req = request(["X..", "...", "..."], "X", 0, 0);
        let original = req.state.board.clone();
        let state = session().make_move(req).unwrap();
        assert_eq!(state.message, MSG_INVALID_MOVE);
        assert_eq!(state.board, original);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        for (x, y) in [(-1, 0), (0, 3), (5, 5)] {
            let state = session()
                .make_move(request(["...", "...", "..."], "O", x, y))
                .unwrap();
            assert_eq!(state.message, MSG_INVALID_MOVE);
        }
    }

    #[test]
    fn test_unknown_mark_is_rejected() {
        let mut req = request(["...", "...", "..."], "O", 1, 1);
        req.state.board[0][0] = "Z".to_string();
        assert_eq!(session().make_move(req).unwrap().message, MSG_INVALID_BOARD);
    }

    #[test]
    fn test_human_win_stops_before_agent_moves() {
        let state = session()
            .make_move(request(["OO.", "XX.", "X.."], "O", 0, 2))
            .unwrap();
        assert_eq!(state.message, MSG_HUMAN_WINS);
        assert_eq!(state.board.iter().flatten().filter(|m| *m == "X").count(), 3);
    }

    #[test]
    fn test_agent_replies_with_one_mark() {
        let state = session()
            .make_move(request(["...", "...", "..."], "O", 1, 1))
            .unwrap();
        assert_eq!(state.message, "");
        assert_eq!(state.board[1][1], "O");
        assert_eq!(state.board.iter().flatten().filter(|m| *m == "X").count(), 1);
    }

    #[test]
    fn test_agent_uses_table_for_who_moved_first() {
        // After the human's reply at (1,1) the agent ("X") holds (0,0).
        let mut first = QTable::new();
        let key = StateKey::parse("100020000").unwrap();
        first.set(key, Action::new(2, 2), 1.0);

        let mut session = PlaySession::new(Arc::new(first), Arc::new(QTable::new())).with_seed(3);
        let state = session
            .make_move(request(["X..", "...", "..."], "X", 1, 1))
            .unwrap();
        assert_eq!(state.board[2][2], "X");
    }

    #[test]
    fn test_agent_win_is_reported() {
        let mut first = QTable::new();
        first.set(
            StateKey::parse("110220200").unwrap(),
            Action::new(0, 2),
            1.0,
        );
        let mut session = PlaySession::new(Arc::new(first), Arc::new(QTable::new())).with_seed(4);
        let state = session
            .make_move(request(["XX.", "OO.", "..."], "X", 2, 0))
            .unwrap();
        assert_eq!(state.message, MSG_AGENT_WINS);
    }

    #[test]
    fn test_last_cell_win_is_not_reported_as_draw() {
        // The agent fills the final cell and completes the top row.
        let state = session()
            .make_move(request(["XX.", "OOX", "XO."], "X", 2, 2))
            .unwrap();
        assert_eq!(state.board[0][2], "X");
        assert_eq!(state.message, MSG_AGENT_WINS);
    }

    #[test]
    fn test_opening_move_places_one_mark() {
        let state = session().opening_move().unwrap();
        assert_eq!(state.player_who_move_first, "X");
        assert_eq!(state.board.iter().flatten().filter(|m| *m == "X").count(), 1);
    }
}
