//! Per-episode trajectory buffer

use serde::{Deserialize, Serialize};

/// State strings an agent saw while it was the mover, in order.
///
/// Each entry is recorded before the agent's move from that state, so the same
/// physical position always maps to the same key across episodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBuffer {
    states: Vec<String>,
}

impl StateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: String) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Hand the trajectory over, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.states)
    }
}
