//! MessagePack implementation of the agent repository.
//!
//! The whole agent is written in one pass with rmp_serde; there is no
//! incremental persistence.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// MessagePack-based agent repository.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_q::adapters::MsgPackRepository;
/// use tictactoe_q::ports::AgentRepository;
/// use tictactoe_q::q_learning::{QLearningAgent, SavedAgent, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let agent = QLearningAgent::new(0.1, 1.0, 0.1);
/// let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("first_mover.msgpack"))?;
/// let loaded = repo.load(Path::new("first_mover.msgpack"))?;
/// # Ok::<(), tictactoe_q::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        log::debug!(
            "saved agent with {} table entries to {}",
            agent.q_table.len(),
            path.display()
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let agent: SavedAgent = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize agent from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        log::debug!(
            "loaded agent with {} table entries from {}",
            agent.q_table.len(),
            path.display()
        );
        Ok(agent)
    }
}
