//! Agent port - the capability set every player implements
//!
//! The session driver only ever talks to players through this trait:
//! - Baselines (random, heuristic)
//! - Learners (Monte-Carlo value averaging, MENACE matchboxes)
//! - Interactive humans

use std::{any::Any, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    tictactoe::{GameEngine, Position},
};

/// Default Elo-style rating given to new agents.
pub const DEFAULT_ELO_RATING: f64 = 1200.0;

/// Identity shared by all agents.
///
/// The rating is carried for reporting; nothing in the crate updates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub elo_rating: f64,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elo_rating: DEFAULT_ELO_RATING,
        }
    }

    pub fn with_rating(mut self, elo_rating: f64) -> Self {
        self.elo_rating = elo_rating;
        self
    }
}

impl fmt::Display for AgentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player <{}>", self.name)
    }
}

/// A player that can be seated in a session.
///
/// # Event Sequence
///
/// 1. `reset_for_new_episode(engine)` when the session resets the board
/// 2. `select_action(engine)` each time this agent is the mover
/// 3. `on_episode_end(reward)` once the game is over, with this agent's own
///    reward (1.0 win, 0.5 draw, 0.0 loss)
///
/// # Examples
///
/// ```no_run
/// use menace_engine::{ports::Agent, tictactoe::GameEngine};
///
/// fn first_choice(agent: &mut dyn Agent) -> menace_engine::Result<()> {
///     let engine = GameEngine::new();
///     agent.reset_for_new_episode(&engine);
///     let position = agent.select_action(&engine)?;
///     println!("{} opens at {position}", agent.name());
///     Ok(())
/// }
/// ```
pub trait Agent: Send {
    fn profile(&self) -> &AgentProfile;

    fn name(&self) -> &str {
        &self.profile().name
    }

    /// Choose a move for the engine's current mover.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent cannot produce a move, e.g. a MENACE agent
    /// resigning from an empty matchbox.
    fn select_action(&mut self, engine: &GameEngine) -> Result<Position>;

    /// Apply credit assignment for the finished episode.
    ///
    /// The default does nothing, which suits non-adaptive players.
    fn on_episode_end(&mut self, _reward: f64) -> Result<()> {
        Ok(())
    }

    /// Clear per-episode buffers before a new game starts.
    fn reset_for_new_episode(&mut self, _engine: &GameEngine) {}

    /// Reseed the agent's random source.
    ///
    /// Stateless or deterministic players can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}

    /// Enable downcasting to concrete types (for persistence and inspection).
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Wrapper that plays through the inner agent but never learns.
///
/// Used when evaluating a trained policy so the evaluation games do not
/// change it.
pub struct FrozenAgent {
    inner: Box<dyn Agent>,
}

impl FrozenAgent {
    pub fn new(inner: Box<dyn Agent>) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> Box<dyn Agent> {
        self.inner
    }
}

impl Agent for FrozenAgent {
    fn profile(&self) -> &AgentProfile {
        self.inner.profile()
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        self.inner.select_action(engine)
    }

    fn on_episode_end(&mut self, _reward: f64) -> Result<()> {
        Ok(())
    }

    fn reset_for_new_episode(&mut self, engine: &GameEngine) {
        self.inner.reset_for_new_episode(engine);
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.inner.set_rng_seed(seed);
    }

    fn as_any(&self) -> &dyn Any {
        self.inner.as_any()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self.inner.as_any_mut()
    }
}
