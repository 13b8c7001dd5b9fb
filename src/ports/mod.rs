//! Ports (trait boundaries) between the game core and its collaborators.
//!
//! The session driver depends only on these traits; concrete players and
//! observers are adapters implementing them.

pub mod agent;
pub mod observer;

pub use agent::{Agent, AgentProfile, DEFAULT_ELO_RATING, FrozenAgent};
pub use observer::Observer;
