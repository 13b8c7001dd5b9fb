//! Uniform random baseline

use std::any::Any;

use rand::rngs::StdRng;

use super::memory::StateBuffer;
use crate::{
    Error, Result,
    ports::{Agent, AgentProfile},
    tictactoe::{GameEngine, Position},
    utils::{choose_uniform, rng_from_seed},
};

/// Random policy agent (baseline).
///
/// Records the states it moved from but applies no learning.
pub struct RandomAgent {
    profile: AgentProfile,
    rng: StdRng,
    buffer: StateBuffer,
}

impl RandomAgent {
    /// Create a new random agent; `None` draws the seed from entropy.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            profile: AgentProfile::new(name),
            rng: rng_from_seed(seed),
            buffer: StateBuffer::new(),
        }
    }

    pub fn state_buffer(&self) -> &StateBuffer {
        &self.buffer
    }
}

impl Agent for RandomAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        let moves = engine.legal_moves();
        let choice = choose_uniform(&mut self.rng, &moves).ok_or(Error::NoValidMoves)?;
        self.buffer.record(engine.state_string());
        Ok(choice)
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
