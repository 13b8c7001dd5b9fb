//! Training pipeline: many episodes through one session

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::session::Session;
use crate::{Result, ports::Observer, utils::rng_from_seed};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub episodes: usize,

    /// Random seed for both agents and seat shuffling
    pub seed: Option<u64>,

    /// Randomize which agent plays X before every episode
    pub shuffle_seats: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 500,
            seed: None,
            shuffle_seats: false,
        }
    }
}

/// Result of a training run, counted from agent A's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    pub wins: usize,

    pub draws: usize,

    pub losses: usize,

    /// Games that ended because either agent resigned
    pub resignations: usize,

    pub win_rate: f64,

    pub draw_rate: f64,

    pub loss_rate: f64,
}

impl TrainingResult {
    pub fn new(
        total_games: usize,
        wins: usize,
        draws: usize,
        losses: usize,
        resignations: usize,
    ) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            resignations,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline driving a [`Session`] for a fixed number of episodes
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Play every configured episode and tally the results.
    ///
    /// Both agents learn from every game; wrap an agent in
    /// [`crate::ports::FrozenAgent`] to evaluate it without training.
    pub fn run(&mut self, session: &mut Session) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            session.agent_a_mut().set_rng_seed(seed);
            session.agent_b_mut().set_rng_seed(seed.wrapping_add(1));
        }
        let mut seat_rng = rng_from_seed(self.config.seed.map(|seed| seed.wrapping_add(2)));

        let mut wins = 0;
        let mut draws = 0;
        let mut losses = 0;
        let mut resignations = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for game_num in 0..self.config.episodes {
            if self.config.shuffle_seats && seat_rng.random::<bool>() {
                session.swap_seats();
            }

            for observer in &mut self.observers {
                observer.on_episode_start(game_num)?;
            }

            let report = session.run_episode()?;

            match report.reward_a() {
                r if r == 1.0 => wins += 1,
                r if r == 0.0 => losses += 1,
                _ => draws += 1,
            }
            if report.was_forfeit() {
                resignations += 1;
            }

            for observer in &mut self.observers {
                for (step_num, mv) in report.moves.iter().enumerate() {
                    observer.on_move(game_num, step_num, mv)?;
                }
                observer.on_episode_end(game_num, &report)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(self.config.episodes, wins, draws, losses, resignations);
        info!(
            agent = %session.agent_a().name(),
            opponent = %session.agent_b().name(),
            games = result.total_games,
            wins = result.wins,
            draws = result.draws,
            losses = result.losses,
            resignations = result.resignations,
            "training finished"
        );
        Ok(result)
    }
}
