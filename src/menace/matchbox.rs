//! Matchbox implementation for MENACE

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Position;

/// A matchbox holding beads for each candidate move of one board state.
///
/// Beads are kept in a `BTreeMap` so iteration (and therefore seeded
/// sampling) follows row-major position order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchbox {
    beads: BTreeMap<Position, u32>,
}

impl Matchbox {
    /// Create a matchbox giving every move the same bead count.
    pub fn new(moves: impl IntoIterator<Item = Position>, beads_per_move: u32) -> Self {
        Self {
            beads: moves
                .into_iter()
                .map(|pos| (pos, beads_per_move))
                .collect(),
        }
    }

    /// Bead count for a move; moves the box does not hold weigh 0.
    pub fn weight(&self, position: Position) -> u32 {
        self.beads.get(&position).copied().unwrap_or(0)
    }

    /// Iterate over (position, beads) pairs in row-major order.
    pub fn beads(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.beads.iter().map(|(&pos, &count)| (pos, count))
    }

    /// Weights restricted to the given legal moves, in the order given.
    pub fn legal_weights(&self, legal: &[Position]) -> Vec<(Position, u32)> {
        legal.iter().map(|&pos| (pos, self.weight(pos))).collect()
    }

    pub fn total_beads(&self) -> u64 {
        self.beads.values().map(|&count| u64::from(count)).sum()
    }

    pub fn is_depleted(&self) -> bool {
        self.total_beads() == 0
    }

    pub fn move_count(&self) -> usize {
        self.beads.len()
    }

    /// Add or remove beads for a move, never dropping below zero.
    pub fn reinforce(&mut self, position: Position, delta: i16) {
        let count = self.beads.entry(position).or_insert(0);
        if delta >= 0 {
            *count = count.saturating_add(u32::from(delta.unsigned_abs()));
        } else {
            *count = count.saturating_sub(u32::from(delta.unsigned_abs()));
        }
    }

    /// Raise each of `moves` to at least `minimum` beads, adding moves the box lacks.
    pub fn ensure_minimum(&mut self, moves: impl IntoIterator<Item = Position>, minimum: u32) {
        for position in moves {
            let count = self.beads.entry(position).or_insert(0);
            *count = (*count).max(minimum);
        }
    }
}
