//! Observer port - abstraction for monitoring training runs
//!
//! Observers let the CLI attach progress reporting without coupling the
//! training loop to a terminal.

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(episode, outcome, alpha)` - after every episode
/// 3. `on_training_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_q::{ports::Observer, tictactoe::GameOutcome};
///
/// struct CountingObserver {
///     episodes: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         _outcome: GameOutcome,
///         _alpha: f64,
///     ) -> tictactoe_q::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its outcome from the board's point of
    /// view and the learning rate in effect.
    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome, _alpha: f64) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
