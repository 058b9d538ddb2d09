//! Opponent adapters used by the training and evaluation drivers.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Opponent,
    q_learning::{QTable, epsilon_greedy},
    tictactoe::{Action, Board, Player},
};

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn no_legal_actions(board: &Board) -> Error {
    Error::NoLegalActions {
        state: board.state_key().to_string(),
    }
}

/// Uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, board: &Board, _player: Player) -> Result<Action> {
        board
            .legal_actions()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| no_legal_actions(board))
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Plays from another agent's value table.
///
/// Tables are always learned with the owner as the first-player marker, so
/// when this opponent sits in the second seat it looks the board up with the
/// player labels swapped.
#[derive(Debug, Clone)]
pub struct AgentOpponent {
    table: Arc<QTable>,
    epsilon: f64,
    rng: StdRng,
}

impl AgentOpponent {
    /// Greedy play from `table`.
    pub fn new(table: Arc<QTable>, seed: Option<u64>) -> Self {
        Self {
            table,
            epsilon: 0.0,
            rng: seeded(seed),
        }
    }

    /// Explore with probability `epsilon`, so the learner also sees the
    /// weaker replies an always-greedy table would never make.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Opponent for AgentOpponent {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        let key = match player {
            Player::One => board.state_key(),
            Player::Two => board.state_key().swap_players(),
        };
        epsilon_greedy(
            &self.table,
            &key,
            &board.legal_actions(),
            self.epsilon,
            &mut self.rng,
        )
    }

    fn name(&self) -> &str {
        "agent"
    }
}

/// Takes an immediately winning move when one exists, otherwise defers to
/// the wrapped opponent.
#[derive(Debug, Clone)]
pub struct WinFirst<O> {
    inner: O,
    name: String,
}

impl<O: Opponent> WinFirst<O> {
    pub fn new(inner: O) -> Self {
        let name = format!("win-first {}", inner.name());
        Self { inner, name }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

/// First legal action (row-major) that wins on the spot for `player`.
pub fn winning_move(board: &Board, player: Player) -> Option<Action> {
    let mut probe = board.clone();
    for action in board.legal_actions() {
        let placed = probe.apply_move(action, player);
        debug_assert!(placed, "legal action {action} was refused");
        let wins = probe.has_won(player);
        let undone = probe.undo();
        debug_assert_eq!(undone.map(|m| m.action), Some(action));
        if wins {
            return Some(action);
        }
    }
    None
}

impl<O: Opponent> Opponent for WinFirst<O> {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<Action> {
        match winning_move(board, player) {
            Some(action) => Ok(action),
            None => self.inner.select_move(board, player),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
