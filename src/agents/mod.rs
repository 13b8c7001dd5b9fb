//! Non-learning players: baselines and the interactive human seat

pub mod heuristic;
pub mod human;
pub mod memory;
pub mod random;

pub use heuristic::{HeuristicAgent, HeuristicRule};
pub use human::{HumanAgent, parse_move};
pub use memory::StateBuffer;
pub use random::RandomAgent;
