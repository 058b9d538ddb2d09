//! ε-greedy action selection over a Q-table

use rand::{Rng, seq::IndexedRandom};

use crate::{Error, Result, q_learning::QTable, tictactoe::Action, types::StateKey};

/// Pick an action for `state` from `legal_actions`.
///
/// With probability `epsilon` a uniformly random legal action is returned.
/// Otherwise one of the maximizing actions is drawn uniformly, so ties on
/// unvisited states do not bias play toward the first cell. An `epsilon` of
/// zero never consumes an exploration draw.
///
/// # Errors
///
/// Returns [`Error::NoLegalActions`] when `legal_actions` is empty.
pub fn epsilon_greedy<R: Rng + ?Sized>(
    table: &QTable,
    state: &StateKey,
    legal_actions: &[Action],
    epsilon: f64,
    rng: &mut R,
) -> Result<Action> {
    let no_actions = || Error::NoLegalActions {
        state: state.to_string(),
    };

    if epsilon > 0.0 && rng.random::<f64>() < epsilon {
        return legal_actions.choose(rng).copied().ok_or_else(no_actions);
    }

    table
        .best_actions(state, legal_actions)
        .choose(rng)
        .copied()
        .ok_or_else(no_actions)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn all_actions() -> Vec<Action> {
        (0..9).map(Action::from_index).collect()
    }

    #[test]
    fn test_greedy_picks_maximum() {
        let mut table = QTable::new();
        let state = StateKey::empty();
        table.set(state, Action::new(2, 0), 0.9);
        table.set(state, Action::new(1, 1), 0.3);

        let mut rng = StdRng::seed_from_u64(1);
        let legal = all_actions();
        for _ in 0..50 {
            let action = epsilon_greedy(&table, &state, &legal, 0.0, &mut rng).unwrap();
            assert_eq!(action, Action::new(2, 0));
        }
    }

    #[test]
    fn test_full_exploration_stays_legal() {
        let table = QTable::new();
        let state = StateKey::parse("120000000").unwrap();
        let legal = [Action::new(0, 2), Action::new(2, 2)];

        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let action = epsilon_greedy(&table, &state, &legal, 1.0, &mut rng).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_empty_actions_is_an_error() {
        let table = QTable::new();
        let mut rng = StdRng::seed_from_u64(3);
        let err = epsilon_greedy(&table, &StateKey::empty(), &[], 0.5, &mut rng).unwrap_err();
        assert!(matches!(err, Error::NoLegalActions { .. }));
    }
}
