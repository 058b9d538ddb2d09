//! Q-learning agent
//!
//! The agent owns its value table and its parameters. Every update is
//! expanded across the board symmetries before it is written, so one real
//! transition trains all of its equivalent orientations at once.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    q_learning::{
        expansion::{SymmetryPolicy, symmetric_transitions},
        policy::epsilon_greedy,
        q_table::QTable,
    },
    tictactoe::Action,
    types::StateKey,
};

/// Scalar parameters of a Q-learning agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Learning rate α, decayed during long training runs
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    pub symmetry_policy: SymmetryPolicy,
    pub rng_seed: Option<u64>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 1.0,
            epsilon: 0.1,
            symmetry_policy: SymmetryPolicy::All,
            rng_seed: None,
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent (off-policy TD control)
///
/// The agent always plays the first-player marker in its own table.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    params: AgentParams,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create a new Q-learning agent with an empty table
    ///
    /// # Arguments
    ///
    /// * `alpha` - learning rate (0.0 to 1.0)
    /// * `gamma` - discount factor (0.0 to 1.0)
    /// * `epsilon` - exploration rate used while learning
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Self {
        Self::from_parts(
            QTable::new(),
            AgentParams {
                alpha,
                gamma,
                epsilon,
                ..AgentParams::default()
            },
        )
    }

    pub(crate) fn from_parts(q_table: QTable, params: AgentParams) -> Self {
        Self {
            q_table,
            rng: build_rng(params.rng_seed),
            params,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.params.rng_seed = Some(seed);
        self
    }

    pub fn with_symmetry_policy(mut self, policy: SymmetryPolicy) -> Self {
        self.params.symmetry_policy = policy;
        self
    }

    /// Start from a previously learned table
    pub fn with_table(mut self, q_table: QTable) -> Self {
        self.q_table = q_table;
        self
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    pub fn alpha(&self) -> f64 {
        self.params.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.params.alpha = alpha;
    }

    /// Multiply the learning rate by `factor`
    pub fn decay_alpha(&mut self, factor: f64) {
        self.params.alpha *= factor;
    }

    pub fn gamma(&self) -> f64 {
        self.params.gamma
    }

    pub fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    pub fn symmetry_policy(&self) -> SymmetryPolicy {
        self.params.symmetry_policy
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Snapshot of the table that can be shared read-only between sessions
    pub fn share_table(&self) -> Arc<QTable> {
        Arc::new(self.q_table.clone())
    }

    pub fn into_table(self) -> QTable {
        self.q_table
    }

    /// Value of `action` in `state`, 0 if never learned
    pub fn get_value(&self, state: &StateKey, action: Action) -> f64 {
        self.q_table.get(state, action)
    }

    pub fn set_value(&mut self, state: StateKey, action: Action, value: f64) {
        self.q_table.set(state, action, value);
    }

    /// ε-greedy choice among `legal_actions`.
    ///
    /// Exploration only happens when `is_learning` is set; otherwise the
    /// choice is uniform among the maximizing actions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] when `legal_actions` is empty.
    pub fn choose_action(
        &mut self,
        state: &StateKey,
        legal_actions: &[Action],
        is_learning: bool,
    ) -> Result<Action> {
        let epsilon = if is_learning { self.params.epsilon } else { 0.0 };
        epsilon_greedy(&self.q_table, state, legal_actions, epsilon, &mut self.rng)
    }

    /// Symmetric images of `(state, action)` under the agent's policy
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalTransition`] when `action` is not legal
    /// in `state`.
    pub fn symmetric_transitions(
        &self,
        state: &StateKey,
        action: Action,
    ) -> Result<Vec<(StateKey, Action)>> {
        symmetric_transitions(state, action, self.params.symmetry_policy)
    }

    /// One temporal-difference update.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') − Q(s,a)]
    ///
    /// An empty `next_legal_actions` marks `next_state` as terminal, in which
    /// case the target is the reward alone. The new value is written to every
    /// symmetric image of `(state, action)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalTransition`] when `action` is not legal
    /// in `state`; the table is left untouched.
    pub fn learn(
        &mut self,
        state: &StateKey,
        action: Action,
        reward: f64,
        next_state: &StateKey,
        next_legal_actions: &[Action],
    ) -> Result<()> {
        let transitions = self.symmetric_transitions(state, action)?;

        let current_q = self.q_table.get(state, action);
        let max_next_q = self
            .q_table
            .max_q(next_state, next_legal_actions)
            .unwrap_or(0.0);
        let td_target = reward + self.params.gamma * max_next_q;
        let new_q = current_q + self.params.alpha * (td_target - current_q);

        for (sym_state, sym_action) in transitions {
            self.q_table.set(sym_state, sym_action, new_q);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_defaults_follow_reference_parameters() {
        let params = AgentParams::default();
        assert_eq!(params.alpha, 0.1);
        assert_eq!(params.gamma, 1.0);
        assert_eq!(params.epsilon, 0.1);
        assert_eq!(params.symmetry_policy, SymmetryPolicy::All);
    }

    #[test]
    fn test_learn_bootstraps_from_next_state() {
        let mut agent = QLearningAgent::new(0.5, 0.9, 0.0).with_seed(7);
        let state = key("000000000");
        let next = key("100020000");
        agent.set_value(next, Action::new(0, 1), 1.0);
        agent.set_value(next, Action::new(2, 2), 2.0);

        let next_legal = [Action::new(0, 1), Action::new(2, 2)];
        agent
            .learn(&state, Action::new(0, 0), -0.1, &next, &next_legal)
            .unwrap();

        // 0 + 0.5 * (-0.1 + 0.9 * 2.0 - 0) = 0.85
        let updated = agent.get_value(&state, Action::new(0, 0));
        assert!((updated - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_learn_writes_every_corner() {
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.0);
        let state = key("000000000");
        agent
            .learn(&state, Action::new(0, 0), 1.0, &key("100000000"), &[])
            .unwrap();

        for corner in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert!((agent.get_value(&state, corner.into()) - 0.1).abs() < 1e-12);
        }
        assert_eq!(agent.get_value(&state, Action::new(1, 1)), 0.0);
        assert_eq!(agent.q_table().len(), 4);
    }

    #[test]
    fn test_learn_rejects_illegal_action_without_writing() {
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.0);
        let state = key("100000000");
        let result = agent.learn(&state, Action::new(0, 0), 1.0, &state, &[]);
        assert!(result.is_err());
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_decay_alpha() {
        let mut agent = QLearningAgent::new(0.1, 1.0, 0.1);
        agent.decay_alpha(0.5);
        assert!((agent.alpha() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_agents_choose_identically() {
        let state = StateKey::empty();
        let legal: Vec<Action> = (0..9).map(Action::from_index).collect();
        let mut a = QLearningAgent::new(0.1, 1.0, 0.3).with_seed(99);
        let mut b = QLearningAgent::new(0.1, 1.0, 0.3).with_seed(99);
        for _ in 0..20 {
            assert_eq!(
                a.choose_action(&state, &legal, true).unwrap(),
                b.choose_action(&state, &legal, true).unwrap()
            );
        }
    }
}
