//! Agent construction and persistence wiring
//!
//! The container owns the persistence adapter and the default seed, and
//! hands out configured agents. Training drivers and the CLI go through it
//! instead of constructing repositories themselves.
//!
//! Persistence sits behind [`crate::ports::AgentRepository`]: the CLI
//! wires in [`crate::adapters::MsgPackRepository`] and tests swap in
//! [`crate::adapters::InMemoryRepository`].
//!
//! # Usage
//!
//! ```
//! use tictactoe_q::app::{AgentConfig, App};
//! use tictactoe_q::adapters::InMemoryRepository;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! let agent = app.create_agent(AgentConfig::new().with_epsilon(0.2))?;
//! # Ok::<(), tictactoe_q::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
