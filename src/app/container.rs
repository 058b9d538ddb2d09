//! Dependency injection container.
//!
//! The container owns infrastructure dependencies and provides factory
//! methods for creating agents and moving them in and out of storage.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    ports::AgentRepository,
    q_learning::{QLearningAgent, QTable, SavedAgent, TrainingMetadata},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use tictactoe_q::app::{AgentConfig, App};
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::new().with_seed(42))?;
/// assert_eq!(agent.alpha(), 0.1);
/// # Ok::<(), tictactoe_q::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use tictactoe_q::app::App;
/// use tictactoe_q::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    agent_repository: Arc<dyn AgentRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults: MessagePack files and no
    /// default seed.
    pub fn new() -> Self {
        Self {
            agent_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the agent repository.
    pub fn agent_repository(&self) -> Arc<dyn AgentRepository + Send + Sync> {
        Arc::clone(&self.agent_repository)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Create a fresh agent with an empty table.
    ///
    /// A seed on the config wins over the container default.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration
    /// does not validate.
    pub fn create_agent(&self, config: AgentConfig) -> Result<QLearningAgent> {
        config.validate()?;

        let mut agent = QLearningAgent::new(config.alpha, config.gamma, config.epsilon)
            .with_symmetry_policy(config.symmetry_policy);
        if let Some(seed) = config.seed.or(self.default_seed) {
            agent = agent.with_seed(seed);
        }
        Ok(agent)
    }

    /// Load an agent and its stored parameters.
    ///
    /// The container default seed, when set, replaces the stored one so that
    /// evaluation runs are reproducible.
    ///
    /// ```no_run
    /// use tictactoe_q::app::App;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let agent = app.load_agent(Path::new("first_mover.msgpack"))?;
    /// # Ok::<(), tictactoe_q::Error>(())
    /// ```
    pub fn load_agent(&self, path: &Path) -> Result<QLearningAgent> {
        let saved = self.agent_repository.load(path)?;
        let agent = saved.to_agent()?;
        log::info!(
            "loaded agent from {} ({} entries, {} episodes)",
            path.display(),
            agent.q_table().len(),
            saved.metadata.episodes
        );

        Ok(match self.default_seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }

    /// Load only the value table, for read-only play.
    pub fn load_table(&self, path: &Path) -> Result<QTable> {
        self.agent_repository.load(path)?.into_table()
    }

    /// Save an agent together with its training provenance.
    pub fn save_agent(
        &self,
        agent: &QLearningAgent,
        metadata: TrainingMetadata,
        path: &Path,
    ) -> Result<()> {
        let saved = SavedAgent::from_agent(agent, metadata);
        self.agent_repository.save(&saved, path)?;
        log::info!(
            "saved agent to {} ({} entries)",
            path.display(),
            saved.q_table.len()
        );
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// ```
/// use tictactoe_q::app::AppBuilder;
/// use tictactoe_q::adapters::InMemoryRepository;
///
/// let app = AppBuilder::new()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// assert_eq!(app.default_seed(), Some(42));
/// ```
pub struct AppBuilder {
    agent_repository: Option<Arc<dyn AgentRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            agent_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom agent repository.
    pub fn with_repository<R: AgentRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.agent_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Without a repository, `MsgPackRepository` is used.
    pub fn build(self) -> App {
        App {
            agent_repository: self
                .agent_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
