//! Builder pattern for MatchboxAgent construction

use super::{
    agent::MatchboxAgent,
    classic::{ReinforcementValues, ResignationPolicy},
    table::MatchboxTable,
};
use crate::{
    Error, Result,
    agents::StateBuffer,
    ports::{AgentProfile, DEFAULT_ELO_RATING},
    utils::rng_from_seed,
};

/// Builder for constructing MatchboxAgent instances with custom configuration.
///
/// # Examples
///
/// ```
/// use menace_engine::menace::{MatchboxAgentBuilder, ResignationPolicy};
///
/// // Defaults: seeded table, 3/1/-1 reinforcement, resign on empty boxes
/// let agent = MatchboxAgentBuilder::new().build().unwrap();
///
/// let explorer = MatchboxAgentBuilder::new()
///     .name("Explorer")
///     .seed(42)
///     .resignation_policy(ResignationPolicy::UniformFallback)
///     .infinite_exploration(true)
///     .build()
///     .unwrap();
/// assert!(explorer.infinite_exploration());
/// ```
#[derive(Debug, Clone)]
pub struct MatchboxAgentBuilder {
    name: String,
    elo_rating: f64,
    seed: Option<u64>,
    reinforcement: ReinforcementValues,
    policy: ResignationPolicy,
    infinite_exploration: bool,
    table: Option<MatchboxTable>,
}

impl Default for MatchboxAgentBuilder {
    fn default() -> Self {
        Self {
            name: "MENACE".to_string(),
            elo_rating: DEFAULT_ELO_RATING,
            seed: None,
            reinforcement: ReinforcementValues::default(),
            policy: ResignationPolicy::default(),
            infinite_exploration: false,
            table: None,
        }
    }
}

impl MatchboxAgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn elo_rating(mut self, rating: f64) -> Self {
        self.elo_rating = rating;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn reinforcement(mut self, values: ReinforcementValues) -> Self {
        self.reinforcement = values;
        self
    }

    pub fn win_reinforcement(mut self, value: i16) -> Self {
        self.reinforcement.win = value;
        self
    }

    pub fn draw_reinforcement(mut self, value: i16) -> Self {
        self.reinforcement.draw = value;
        self
    }

    pub fn loss_reinforcement(mut self, value: i16) -> Self {
        self.reinforcement.loss = value;
        self
    }

    pub fn resignation_policy(mut self, policy: ResignationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Keep every legal move of a reinforced box at one bead or more.
    pub fn infinite_exploration(mut self, enabled: bool) -> Self {
        self.infinite_exploration = enabled;
        self
    }

    /// Start from an existing table instead of seeding a fresh one.
    pub fn table(mut self, table: MatchboxTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Build the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when a win would not be rewarded
    /// more than a draw, or a draw more than a loss.
    pub fn build(self) -> Result<MatchboxAgent> {
        let ReinforcementValues { win, draw, loss } = self.reinforcement;
        if !(win > draw && draw > loss) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "reinforcement must satisfy win > draw > loss (got {win}/{draw}/{loss})"
                ),
            });
        }
        Ok(self.build_unchecked())
    }

    pub(crate) fn build_unchecked(self) -> MatchboxAgent {
        MatchboxAgent {
            profile: AgentProfile::new(self.name).with_rating(self.elo_rating),
            rng: rng_from_seed(self.seed),
            table: self.table.unwrap_or_else(MatchboxTable::seeded),
            reinforcement: self.reinforcement,
            policy: self.policy,
            infinite_exploration: self.infinite_exploration,
            states: StateBuffer::new(),
            actions: Vec::new(),
            games_trained: 0,
        }
    }
}
