//! Repository port for agent persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent};

/// Port for persisting and loading trained agents.
///
/// The only contract is a lossless round-trip: loading what was saved
/// reproduces the same lookup for every table entry present at save time.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_q::ports::AgentRepository;
/// use tictactoe_q::q_learning::SavedAgent;
/// use std::path::Path;
///
/// fn save_agent<R: AgentRepository>(
///     repo: &R,
///     agent: &SavedAgent,
///     path: &Path,
/// ) -> tictactoe_q::Result<()> {
///     repo.save(agent, path)
/// }
/// ```
pub trait AgentRepository {
    /// Save an agent to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, agent: &SavedAgent, path: &Path) -> Result<()>;

    /// Load an agent from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or corrupted.
    fn load(&self, path: &Path) -> Result<SavedAgent>;
}
