//! Monte-Carlo state-value learning
//!
//! Every-visit averaging of terminal rewards over the states an agent moved from.

pub mod agent;
pub mod value_table;

pub use agent::MonteCarloAgent;
pub use value_table::ValueTable;
