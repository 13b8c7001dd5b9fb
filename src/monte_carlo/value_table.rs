//! State-value table for every-visit Monte-Carlo averaging

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::mean;

/// State values keyed by canonical state string.
///
/// Every observed return is kept so the value is always the exact mean of
/// the history, not an incremental approximation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: HashMap<String, f64>,
    returns: HashMap<String, Vec<f64>>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `reward` to the state's return history and refresh its mean.
    pub fn record_return(&mut self, state: &str, reward: f64) {
        let history = self.returns.entry(state.to_string()).or_default();
        history.push(reward);
        if let Some(value) = mean(history) {
            self.values.insert(state.to_string(), value);
        }
    }

    /// Learned value of a state, if it has ever been visited.
    pub fn value(&self, state: &str) -> Option<f64> {
        self.values.get(state).copied()
    }

    pub fn returns(&self, state: &str) -> &[f64] {
        self.returns.get(state).map_or(&[], Vec::as_slice)
    }

    /// Number of returns observed for a state.
    pub fn visits(&self, state: &str) -> usize {
        self.returns(state).len()
    }

    /// Number of distinct states with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(state, &value)| (state.as_str(), value))
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.returns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_mean_of_history() {
        let mut table = ValueTable::new();
        table.record_return("---\n---\n---", 1.0);
        table.record_return("---\n---\n---", 0.0);
        table.record_return("---\n---\n---", 0.5);

        assert_eq!(table.value("---\n---\n---"), Some(0.5));
        assert_eq!(table.visits("---\n---\n---"), 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unseen_state_has_no_value() {
        let table = ValueTable::new();
        assert_eq!(table.value("X--\n---\n---"), None);
        assert!(table.returns("X--\n---\n---").is_empty());
    }
}
