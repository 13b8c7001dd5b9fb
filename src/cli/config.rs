//! Agent kinds selectable from the command line

use std::fmt;

use clap::ValueEnum;

use crate::{
    agents::{HeuristicAgent, RandomAgent},
    menace::MatchboxAgent,
    monte_carlo::MonteCarloAgent,
    ports::Agent,
};

/// Agents that can be trained and saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LearnerKind {
    Matchbox,
    MonteCarlo,
}

impl fmt::Display for LearnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LearnerKind::Matchbox => "matchbox",
            LearnerKind::MonteCarlo => "monte-carlo",
        };
        f.write_str(label)
    }
}

/// Built-in opponents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    Random,
    Heuristic,
    Matchbox,
    MonteCarlo,
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpponentKind::Random => "random",
            OpponentKind::Heuristic => "heuristic",
            OpponentKind::Matchbox => "matchbox",
            OpponentKind::MonteCarlo => "monte-carlo",
        };
        f.write_str(label)
    }
}

impl OpponentKind {
    /// Build a fresh opponent. `epsilon` only applies to the heuristic player.
    pub fn build(self, seed: Option<u64>, epsilon: f64) -> crate::Result<Box<dyn Agent>> {
        let agent: Box<dyn Agent> = match self {
            OpponentKind::Random => Box::new(RandomAgent::new("Random", seed)),
            OpponentKind::Heuristic => {
                Box::new(HeuristicAgent::new("Heuristic", seed).with_epsilon(epsilon)?)
            }
            OpponentKind::Matchbox => Box::new(MatchboxAgent::new("MENACE Opponent", seed)),
            OpponentKind::MonteCarlo => Box::new(MonteCarloAgent::new("Monte-Carlo", seed)),
        };
        Ok(agent)
    }
}
