//! Serialization support for Q-learning agents.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::{
        agent::{AgentParams, QLearningAgent},
        q_table::QTable,
    },
    training::Role,
};

/// Training provenance stored next to a saved table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Seat the agent was trained for, if known
    pub role: Option<Role>,
    /// Number of training episodes behind the table
    pub episodes: usize,
}

/// Versioned on-disk form of an agent: parameters, table and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub params: AgentParams,
    pub q_table: QTable,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            params: *agent.params(),
            q_table: agent.q_table().clone(),
            metadata,
        }
    }

    /// Rebuild the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for envelopes written by another
    /// format version.
    pub fn to_agent(&self) -> Result<QLearningAgent> {
        self.check_version()?;
        Ok(QLearningAgent::from_parts(self.q_table.clone(), self.params))
    }

    /// Take the table out without building an agent
    pub fn into_table(self) -> Result<QTable> {
        self.check_version()?;
        Ok(self.q_table)
    }

    fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(())
    }
}
