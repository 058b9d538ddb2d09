//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters:
//! persistence of trained agents, training opponents, and observation of
//! training runs.

pub mod observer;
pub mod opponent;
pub mod repository;

pub use observer::Observer;
pub use opponent::Opponent;
pub use repository::AgentRepository;
