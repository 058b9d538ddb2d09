//! Configuration types for agent creation.

use crate::{Error, Result, q_learning::SymmetryPolicy};

/// Configuration for creating a Q-learning agent.
///
/// Builder-style and validated when the container turns it into an agent.
///
/// # Examples
///
/// ```
/// use tictactoe_q::app::AgentConfig;
/// use tictactoe_q::q_learning::SymmetryPolicy;
///
/// let config = AgentConfig::new()
///     .with_alpha(0.1)
///     .with_gamma(0.9)
///     .with_epsilon(0.5)
///     .with_symmetry_policy(SymmetryPolicy::Distinct)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// How updates are expanded across board symmetries
    pub symmetry_policy: SymmetryPolicy,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with the reference defaults:
    /// α = 0.1, γ = 1.0, ε = 0.1, all eight symmetries, no seed.
    pub fn new() -> Self {
        Self {
            alpha: 0.1,
            gamma: 1.0,
            epsilon: 0.1,
            symmetry_policy: SymmetryPolicy::default(),
            seed: None,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_symmetry_policy(mut self, policy: SymmetryPolicy) -> Self {
        self.symmetry_policy = policy;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that α, γ and ε are finite and inside [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
