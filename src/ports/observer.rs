//! Observer port - abstraction for training observation
//!
//! Observers allow composable data collection during training without
//! coupling the pipeline to specific output formats.

use crate::{Result, pipeline::EpisodeOutcome};

/// Observer trait for monitoring training runs.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. per episode: `on_episode_start`, then `on_episode_end`
/// 3. `on_training_end()` - once at the end
///
/// Every method has a no-op default so observers implement only what
/// they care about.
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends.
    ///
    /// `streak` is the number of consecutive tubes cleared since the
    /// last crash, after this episode's outcome is applied.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _outcome: EpisodeOutcome,
        _streak: u64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
