//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{tictactoe::Action, types::StateKey};

/// Value assumed for state-action pairs that were never written
pub const INIT_Q_VALUE: f64 = 0.0;

/// Q-table mapping (state key, action) pairs to value estimates.
///
/// Reads go through [`QTable::get`], which falls back to [`INIT_Q_VALUE`]
/// without inserting anything. Persisted as a flat list of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<QEntry>", into = "Vec<QEntry>")]
pub struct QTable {
    q_values: HashMap<(StateKey, Action), f64>,
}

/// One persisted table row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateKey,
    pub action: Action,
    pub value: f64,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get Q-value for a state-action pair, or [`INIT_Q_VALUE`] if unseen
    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        self.q_values
            .get(&(*state, action))
            .copied()
            .unwrap_or(INIT_Q_VALUE)
    }

    /// Whether a value was ever written for the pair
    pub fn contains(&self, state: &StateKey, action: Action) -> bool {
        self.q_values.contains_key(&(*state, action))
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Maximum Q-value over `actions`, `None` when there are no actions
    pub fn max_q(&self, state: &StateKey, actions: &[Action]) -> Option<f64> {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
    }

    /// Every action in `actions` whose value equals the maximum.
    ///
    /// Order follows `actions`. Ties are compared exactly, so an unvisited
    /// state returns all of its actions.
    pub fn best_actions(&self, state: &StateKey, actions: &[Action]) -> Vec<Action> {
        let mut best = Vec::new();
        let mut max_q = f64::NEG_INFINITY;
        for &action in actions {
            let q = self.get(state, action);
            if q > max_q {
                max_q = q;
                best.clear();
                best.push(action);
            } else if q == max_q {
                best.push(action);
            }
        }
        best
    }

    /// Iterate over stored entries in arbitrary order
    pub fn entries(&self) -> impl Iterator<Item = QEntry> + '_ {
        self.q_values
            .iter()
            .map(|(&(state, action), &value)| QEntry {
                state,
                action,
                value,
            })
    }

    /// Remove all stored values
    pub fn clear(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}

impl From<Vec<QEntry>> for QTable {
    fn from(entries: Vec<QEntry>) -> Self {
        let q_values = entries
            .into_iter()
            .map(|entry| ((entry.state, entry.action), entry.value))
            .collect();
        QTable { q_values }
    }
}

impl From<QTable> for Vec<QEntry> {
    fn from(table: QTable) -> Self {
        table
            .q_values
            .into_iter()
            .map(|((state, action), value)| QEntry {
                state,
                action,
                value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_qtable_defaults_to_zero() {
        let qtable = QTable::new();
        assert_eq!(qtable.get(&key("000000000"), Action::new(1, 1)), 0.0);
        assert!(!qtable.contains(&key("000000000"), Action::new(1, 1)));
        // Reading does not insert
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new();
        let state = key("100000000");
        qtable.set(state, Action::new(1, 1), 1.5);
        qtable.set(state, Action::new(1, 1), -0.25);
        assert_eq!(qtable.get(&state, Action::new(1, 1)), -0.25);
        assert_eq!(qtable.len(), 1);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::new();
        let state = key("000000000");
        qtable.set(state, Action::new(0, 0), -0.5);
        qtable.set(state, Action::new(0, 1), -1.5);

        let actions = [Action::new(0, 0), Action::new(0, 1)];
        assert_eq!(qtable.max_q(&state, &actions), Some(-0.5));

        // Unvisited actions count as zero
        let with_fresh = [Action::new(0, 0), Action::new(2, 2)];
        assert_eq!(qtable.max_q(&state, &with_fresh), Some(0.0));

        assert_eq!(qtable.max_q(&state, &[]), None);
    }

    #[test]
    fn test_best_actions_collects_ties() {
        let mut qtable = QTable::new();
        let state = key("000000000");
        qtable.set(state, Action::new(0, 0), 0.7);
        qtable.set(state, Action::new(1, 1), 0.7);
        qtable.set(state, Action::new(2, 2), 0.1);

        let actions = [Action::new(0, 0), Action::new(1, 1), Action::new(2, 2)];
        assert_eq!(
            qtable.best_actions(&state, &actions),
            vec![Action::new(0, 0), Action::new(1, 1)]
        );
    }

    #[test]
    fn test_best_actions_on_unvisited_state() {
        let qtable = QTable::new();
        let state = key("000000000");
        let actions: Vec<Action> = (0..9).map(Action::from_index).collect();
        assert_eq!(qtable.best_actions(&state, &actions), actions);
    }

    #[test]
    fn test_entries_round_trip() {
        let mut qtable = QTable::new();
        qtable.set(key("000000000"), Action::new(0, 0), 0.25);
        qtable.set(key("100000000"), Action::new(2, 1), -1.0);

        let entries: Vec<QEntry> = qtable.clone().into();
        assert_eq!(entries.len(), 2);
        assert_eq!(QTable::from(entries), qtable);
    }

    #[test]
    fn test_deserialize_rejects_off_board_action() {
        let json = r#"[{"state":"000000000","action":{"row":7,"col":0},"value":0.5}]"#;
        assert!(serde_json::from_str::<QTable>(json).is_err());

        let json = r#"[{"state":"000000000","action":{"row":2,"col":0},"value":0.5}]"#;
        let table: QTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.get(&key("000000000"), Action::new(2, 0)), 0.5);
    }
}
