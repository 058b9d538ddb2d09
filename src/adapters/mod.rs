//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports module:
//! agent repositories and training opponents.

pub mod in_memory_repository;
pub mod msgpack_repository;
pub mod opponents;

pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
pub use opponents::{AgentOpponent, RandomOpponent, WinFirst};
