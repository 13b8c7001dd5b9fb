//! Agent serialization support
//!
//! Provides save/load functionality for trained MENACE agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::{
    agent::MatchboxAgent,
    builder::MatchboxAgentBuilder,
    classic::{ReinforcementValues, ResignationPolicy},
    table::MatchboxTable,
};
use crate::{ports::AgentProfile, tictactoe::Player};

/// Serializable representation of a trained MENACE agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMatchboxAgent {
    /// Version of the save format
    pub version: u32,
    pub profile: AgentProfile,
    /// The learned bead counts
    pub table: MatchboxTable,
    pub reinforcement: ReinforcementValues,
    pub policy: ResignationPolicy,
    pub infinite_exploration: bool,
    pub metadata: TrainingMetadata,
}

/// Metadata about the training process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of games trained
    pub games_trained: Option<usize>,
    /// Opponent(s) trained against
    pub opponents: Vec<String>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Seat the agent held during training, if it never changed
    pub agent_player: Option<Player>,
}

impl SavedMatchboxAgent {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &MatchboxAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            profile: agent.profile.clone(),
            table: agent.table.clone(),
            reinforcement: agent.reinforcement,
            policy: agent.policy,
            infinite_exploration: agent.infinite_exploration,
            metadata,
        }
    }

    /// Reconstruct an agent from saved data.
    ///
    /// The random source is not persisted; pass a seed for reproducible play.
    pub fn to_agent(&self, seed: Option<u64>) -> Result<MatchboxAgent> {
        if self.version != Self::VERSION {
            bail!(
                "Unsupported save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            );
        }

        let mut builder = MatchboxAgentBuilder::new()
            .name(self.profile.name.clone())
            .elo_rating(self.profile.elo_rating)
            .reinforcement(self.reinforcement)
            .resignation_policy(self.policy)
            .infinite_exploration(self.infinite_exploration)
            .table(self.table.clone());
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }

        let mut agent = builder.build().context("Saved agent has invalid settings")?;
        agent.games_trained = self.metadata.games_trained.unwrap_or(0);
        Ok(agent)
    }

    /// Save agent to a file
    ///
    /// Uses MessagePack format for compact storage of the full table.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize agent")?;

        Ok(())
    }

    /// Load agent from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize agent")
    }
}
