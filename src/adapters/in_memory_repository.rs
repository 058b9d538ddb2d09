//! In-memory agent repository for testing.
//!
//! Stores MessagePack bytes in a shared map so tests exercise the same
//! serialization path as the file adapter without touching the disk.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedAgent};

/// In-memory repository for testing.
///
/// All clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use tictactoe_q::adapters::InMemoryRepository;
/// use tictactoe_q::ports::AgentRepository;
/// use tictactoe_q::q_learning::{QLearningAgent, SavedAgent, TrainingMetadata};
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let agent = QLearningAgent::new(0.1, 1.0, 0.1);
/// let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
///
/// repo.save(&saved, Path::new("first_mover"))?;
/// let loaded = repo.load(Path::new("first_mover"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), tictactoe_q::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the number of agents currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored agents.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if an agent exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&path.to_string_lossy().to_string())
    }
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedAgent> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
