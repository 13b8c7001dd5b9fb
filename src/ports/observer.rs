//! Observer port - abstraction for training observation
//!
//! Observers are composed into a training pipeline to collect data or
//! report progress without coupling the pipeline to an output format.

use crate::{Result, pipeline::EpisodeReport, tictactoe::Move};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(game_num)`
///    - `on_episode_end(game_num, report)` - with the full move list
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use menace_engine::{pipeline::EpisodeReport, ports::Observer};
///
/// struct LengthCounter {
///     moves: usize,
/// }
///
/// impl Observer for LengthCounter {
///     fn on_episode_end(
///         &mut self,
///         _game_num: usize,
///         report: &EpisodeReport,
///     ) -> menace_engine::Result<()> {
///         self.moves += report.moves.len();
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (0-based index).
    fn on_episode_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each accepted move, in order, after the episode is played.
    fn on_move(&mut self, _game_num: usize, _step_num: usize, _mv: &Move) -> Result<()> {
        Ok(())
    }

    /// Called after rewards have been handed to both agents.
    fn on_episode_end(&mut self, _game_num: usize, _report: &EpisodeReport) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
