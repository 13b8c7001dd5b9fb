//! Observers for training pipelines

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::session::EpisodeReport;
use crate::{Result, ports::Observer};

/// Progress bar observer - shows training progress with agent A's record
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn record(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, game_num: usize, report: &EpisodeReport) -> Result<()> {
        let reward = report.reward_a();
        if reward == 1.0 {
            self.wins += 1;
        } else if reward == 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.record());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.record());
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcome counts and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    resignations: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> usize {
        self.move_counts.len()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            count as f64 / self.move_counts.len() as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Mean number of moves per game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games(),
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            resignations: self.resignations,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub resignations: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _game_num: usize, report: &EpisodeReport) -> Result<()> {
        let reward = report.reward_a();
        if reward == 1.0 {
            self.wins += 1;
        } else if reward == 0.0 {
            self.losses += 1;
        } else {
            self.draws += 1;
        }
        if report.was_forfeit() {
            self.resignations += 1;
        }
        self.move_counts.push(report.moves.len());
        Ok(())
    }
}
