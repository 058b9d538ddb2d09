//! Training run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Reward signal seen by the learning agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
    /// Reward for a move that does not end the game
    pub step: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            win: 1.0,
            loss: -1.0,
            draw: 0.0,
            step: -0.1,
        }
    }
}

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training episodes (games)
    pub episodes: usize,

    /// Factor applied to the learning rate every `decay_every` episodes
    pub alpha_decay: f64,

    /// Decay interval in episodes; 0 disables decay
    pub decay_every: usize,

    /// Progress log interval in episodes; 0 disables progress logging
    pub report_every: usize,

    pub rewards: Rewards,

    /// Seed for the driver's own randomness (the second seat's opening move)
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1_000_000,
            alpha_decay: 0.99,
            decay_every: 10_000,
            report_every: 10_000,
            rewards: Rewards::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Default schedule with a given episode count.
    pub fn with_episodes(episodes: usize) -> Self {
        Self {
            episodes,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the decay factor and rewards.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha_decay.is_finite() || self.alpha_decay <= 0.0 || self.alpha_decay > 1.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha_decay must be within (0, 1], got {}", self.alpha_decay),
            });
        }
        let Rewards {
            win,
            loss,
            draw,
            step,
        } = self.rewards;
        if ![win, loss, draw, step].iter().all(|r| r.is_finite()) {
            return Err(Error::InvalidConfiguration {
                message: "rewards must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open training config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }
}
