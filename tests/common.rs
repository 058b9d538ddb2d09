//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tictactoe_q::{Action, Board, StateKey};

pub fn key(s: &str) -> StateKey {
    StateKey::parse(s).expect("well-formed state key")
}

pub fn board(s: &str) -> Board {
    Board::from_state_key(&key(s))
}

pub fn all_actions() -> Vec<Action> {
    (0..9).map(Action::from_index).collect()
}

/// Every 9-character string over {0, 1, 2}, in base-3 order.
pub fn all_keys() -> impl Iterator<Item = String> {
    (0..3usize.pow(9)).map(|mut n| {
        let mut digits = ['0'; 9];
        for digit in digits.iter_mut().rev() {
            *digit = char::from(b'0' + (n % 3) as u8);
            n /= 3;
        }
        digits.iter().collect()
    })
}
