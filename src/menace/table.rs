//! The full set of matchboxes, one per encodable board with room to move

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::matchbox::Matchbox;
use crate::tictactoe::{BoardState, STATE_SPACE};

/// Summary counts over a [`MatchboxTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub boxes: usize,
    pub total_beads: u64,
    pub empty_boxes: usize,
}

/// Matchboxes keyed by canonical state string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchboxTable {
    boxes: HashMap<String, Matchbox>,
}

impl MatchboxTable {
    /// Table with no boxes. Mostly useful for tests and hand-built positions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seed a box for every one of the 3^9 encodable boards.
    ///
    /// Each empty cell starts with `empty_cells / 2` beads. Boards where that is
    /// zero get no box: they are full or leave a single forced reply.
    pub fn seeded() -> Self {
        let boxes = (0..STATE_SPACE)
            .filter_map(|value| BoardState::from_state_int(value).ok())
            .filter_map(|board| {
                let beads = (board.empty_count() / 2) as u32;
                (beads > 0).then(|| {
                    (
                        board.to_state_string(),
                        Matchbox::new(board.legal_moves(), beads),
                    )
                })
            })
            .collect();
        Self { boxes }
    }

    pub fn get(&self, state: &str) -> Option<&Matchbox> {
        self.boxes.get(state)
    }

    pub fn get_mut(&mut self, state: &str) -> Option<&mut Matchbox> {
        self.boxes.get_mut(state)
    }

    /// Insert or replace the box for a state.
    pub fn insert(&mut self, state: impl Into<String>, matchbox: Matchbox) {
        self.boxes.insert(state.into(), matchbox);
    }

    pub fn contains(&self, state: &str) -> bool {
        self.boxes.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matchbox)> + '_ {
        self.boxes.iter().map(|(state, matchbox)| (state.as_str(), matchbox))
    }

    pub fn stats(&self) -> TableStats {
        self.boxes
            .values()
            .fold(TableStats::default(), |mut stats, matchbox| {
                let beads = matchbox.total_beads();
                stats.boxes += 1;
                stats.total_beads += beads;
                if beads == 0 {
                    stats.empty_boxes += 1;
                }
                stats
            })
    }
}
