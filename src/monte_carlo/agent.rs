//! Monte-Carlo state-value learner

use std::{any::Any, fs::File, io::{BufReader, BufWriter}, path::Path};

use anyhow::Context;
use rand::rngs::StdRng;

use super::value_table::ValueTable;
use crate::{
    Error, Result,
    agents::StateBuffer,
    ports::{Agent, AgentProfile},
    tictactoe::{GameEngine, Position},
    utils::{choose_uniform, rng_from_seed},
};

/// Agent that explores uniformly and averages terminal rewards per state.
///
/// Selection is identical to the random baseline; what differs is
/// [`Agent::on_episode_end`], which credits the episode's reward to every
/// state the agent moved from.
pub struct MonteCarloAgent {
    profile: AgentProfile,
    rng: StdRng,
    buffer: StateBuffer,
    values: ValueTable,
}

impl MonteCarloAgent {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            profile: AgentProfile::new(name),
            rng: rng_from_seed(seed),
            buffer: StateBuffer::new(),
            values: ValueTable::new(),
        }
    }

    /// Start from previously learned values.
    pub fn with_values(mut self, values: ValueTable) -> Self {
        self.values = values;
        self
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn state_value(&self, state: &str) -> Option<f64> {
        self.values.value(state)
    }

    pub fn state_buffer(&self) -> &StateBuffer {
        &self.buffer
    }

    /// Save the value table as MessagePack.
    pub fn save_values<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &self.values)
            .context("Failed to serialize value table")?;
        Ok(())
    }

    /// Load a value table written by [`MonteCarloAgent::save_values`].
    pub fn load_values<P: AsRef<Path>>(path: P) -> anyhow::Result<ValueTable> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        rmp_serde::decode::from_read(BufReader::new(file))
            .context("Failed to deserialize value table")
    }
}

impl Agent for MonteCarloAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        let moves = engine.legal_moves();
        let choice = choose_uniform(&mut self.rng, &moves).ok_or(Error::NoValidMoves)?;
        self.buffer.record(engine.state_string());
        Ok(choice)
    }

    fn on_episode_end(&mut self, reward: f64) -> Result<()> {
        for state in self.buffer.drain() {
            self.values.record_return(&state, reward);
        }
        Ok(())
    }

    fn reset_for_new_episode(&mut self, _engine: &GameEngine) {
        self.buffer.clear();
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = rng_from_seed(Some(seed));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
