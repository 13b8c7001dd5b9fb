//! MENACE agent: samples moves from matchboxes and adjusts beads after each game

use std::any::Any;

use rand::rngs::StdRng;
use tracing::debug;

use super::{
    builder::MatchboxAgentBuilder,
    classic::{ReinforcementValues, ResignationPolicy},
    matchbox::Matchbox,
    table::MatchboxTable,
};
use crate::{
    Error, Result,
    agents::StateBuffer,
    ports::{Agent, AgentProfile},
    tictactoe::{BoardState, GameEngine, Position},
    utils::{choose_uniform, rng_from_seed, weighted_sample},
};

/// MENACE agent.
///
/// Every decision with more than one legal move draws a bead from the
/// matchbox of the current state. The (state, move) pairs drawn during an
/// episode are reinforced together once the episode ends.
pub struct MatchboxAgent {
    pub(crate) profile: AgentProfile,
    pub(crate) rng: StdRng,
    pub(crate) table: MatchboxTable,
    pub(crate) reinforcement: ReinforcementValues,
    pub(crate) policy: ResignationPolicy,
    pub(crate) infinite_exploration: bool,
    pub(crate) states: StateBuffer,
    pub(crate) actions: Vec<(String, Position)>,
    pub(crate) games_trained: usize,
}

impl MatchboxAgent {
    /// Agent with a freshly seeded table and default settings.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let mut builder = MatchboxAgentBuilder::new().name(name);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        builder.build_unchecked()
    }

    pub fn builder() -> MatchboxAgentBuilder {
        MatchboxAgentBuilder::new()
    }

    pub fn table(&self) -> &MatchboxTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut MatchboxTable {
        &mut self.table
    }

    pub fn matchbox(&self, state: &str) -> Option<&Matchbox> {
        self.table.get(state)
    }

    /// Bead count for `position` in the box for `state`.
    pub fn weight(&self, state: &str, position: Position) -> Option<u32> {
        self.table.get(state).map(|matchbox| matchbox.weight(position))
    }

    pub fn reinforcement(&self) -> ReinforcementValues {
        self.reinforcement
    }

    pub fn resignation_policy(&self) -> ResignationPolicy {
        self.policy
    }

    pub fn infinite_exploration(&self) -> bool {
        self.infinite_exploration
    }

    pub fn games_trained(&self) -> usize {
        self.games_trained
    }

    /// States this agent drew a bead from in the current episode.
    pub fn state_buffer(&self) -> &StateBuffer {
        &self.states
    }

    /// (state, move) pairs awaiting reinforcement.
    pub fn pending_actions(&self) -> &[(String, Position)] {
        &self.actions
    }

    /// Apply `delta` to one recorded pair, refilling the legal moves of its box
    /// when infinite exploration is on.
    fn reinforce_pair(&mut self, state: &str, position: Position, delta: i16) -> Result<()> {
        let legal = if self.infinite_exploration {
            BoardState::from_state_string(state)?.legal_moves()
        } else {
            Vec::new()
        };
        let matchbox = self
            .table
            .get_mut(state)
            .ok_or_else(|| Error::MissingMatchbox {
                state: state.to_string(),
            })?;
        matchbox.reinforce(position, delta);
        matchbox.ensure_minimum(legal, 1);
        Ok(())
    }

    fn empty_box_move(&mut self, state: &str, legal: &[Position]) -> Result<Position> {
        match self.policy {
            ResignationPolicy::Resign => Err(Error::PlayerResigned {
                agent: self.profile.name.clone(),
                state: state.to_string(),
            }),
            ResignationPolicy::UniformFallback => {
                debug!(agent = %self.profile.name, state, "empty matchbox, falling back to uniform move");
                choose_uniform(&mut self.rng, legal).ok_or(Error::NoValidMoves)
            }
        }
    }
}

impl Agent for MatchboxAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        let legal = engine.legal_moves();
        match legal.as_slice() {
            [] => return Err(Error::NoValidMoves),
            [forced] => return Ok(*forced),
            _ => {}
        }

        let state = engine.state_string();
        let weights = self
            .table
            .get(&state)
            .ok_or_else(|| Error::MissingMatchbox {
                state: state.clone(),
            })?
            .legal_weights(&legal);

        let choice = match weighted_sample(&mut self.rng, &weights) {
            Some(position) => position,
            None => self.empty_box_move(&state, &legal)?,
        };

        self.states.record(state.clone());
        self.actions.push((state, choice));
        Ok(choice)
    }

    fn on_episode_end(&mut self, reward: f64) -> Result<()> {
        let delta = self.reinforcement.delta_for_reward(reward);
        let actions = std::mem::take(&mut self.actions);
        let mut first_error = None;
        for (state, position) in &actions {
            if let Err(err) = self.reinforce_pair(state, *position, delta) {
                first_error.get_or_insert(err);
            }
        }
        self.states.clear();
        self.games_trained += 1;
        first_error.map_or(Ok(()), Err)
    }

    fn reset_for_new_episode(&mut self, _engine: &GameEngine) {
        self.states.clear();
        self.actions.clear();
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
