//! MENACE learning system
//!
//! Matchboxes of beads, one per board state, sampled to choose moves and
//! reinforced once each game is over.

pub mod agent;
pub mod builder;
pub mod classic;
pub mod matchbox;
pub mod serialization;
pub mod table;

// Re-export main types
pub use agent::MatchboxAgent;
pub use builder::MatchboxAgentBuilder;
pub use classic::{ReinforcementValues, ResignationPolicy};
pub use matchbox::Matchbox;
pub use serialization::{SavedMatchboxAgent, TrainingMetadata};
pub use table::{MatchboxTable, TableStats};
