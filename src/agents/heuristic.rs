//! Rule-based player: win, block, center, corner, anything

use std::any::Any;

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::memory::StateBuffer;
use crate::{
    Error, Result,
    ports::{Agent, AgentProfile},
    tictactoe::{BoardState, GameEngine, Player, Position},
    utils::{choose_uniform, rng_from_seed},
};

/// Rung of the priority ladder that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeuristicRule {
    Explore,
    Win,
    Block,
    Center,
    Corner,
    Any,
}

/// Fixed priority-ladder player with optional epsilon exploration.
///
/// Not a minimax solver: it looks exactly one move ahead for itself and for
/// the opponent. Every candidate is evaluated on a scratch copy of the board.
pub struct HeuristicAgent {
    profile: AgentProfile,
    rng: StdRng,
    epsilon: f64,
    buffer: StateBuffer,
}

impl HeuristicAgent {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            profile: AgentProfile::new(name),
            rng: rng_from_seed(seed),
            epsilon: 0.0,
            buffer: StateBuffer::new(),
        }
    }

    /// Explore uniformly with probability `epsilon` before consulting the ladder.
    ///
    /// # Errors
    ///
    /// Returns an error unless `epsilon` lies in [0, 1].
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon must be within [0, 1], got {epsilon}"),
            });
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn state_buffer(&self) -> &StateBuffer {
        &self.buffer
    }

    /// Pick a move for `mover` on `board` and report which rule chose it.
    pub fn decide(
        &mut self,
        board: &BoardState,
        mover: Player,
    ) -> Option<(Position, HeuristicRule)> {
        let legal = board.legal_moves();
        if legal.is_empty() {
            return None;
        }

        if self.epsilon > 0.0 && self.rng.random::<f64>() < self.epsilon {
            return choose_uniform(&mut self.rng, &legal).map(|p| (p, HeuristicRule::Explore));
        }

        let wins = completing_moves(board, &legal, mover);
        if let Some(p) = choose_uniform(&mut self.rng, &wins) {
            return Some((p, HeuristicRule::Win));
        }

        let blocks = completing_moves(board, &legal, mover.opponent());
        if let Some(p) = choose_uniform(&mut self.rng, &blocks) {
            return Some((p, HeuristicRule::Block));
        }

        if board.is_legal(Position::CENTER) {
            return Some((Position::CENTER, HeuristicRule::Center));
        }

        let corners: Vec<Position> = Position::CORNERS
            .into_iter()
            .filter(|&c| board.is_legal(c))
            .collect();
        if let Some(p) = choose_uniform(&mut self.rng, &corners) {
            return Some((p, HeuristicRule::Corner));
        }

        choose_uniform(&mut self.rng, &legal).map(|p| (p, HeuristicRule::Any))
    }
}

/// Legal positions where `player` would complete a line.
fn completing_moves(board: &BoardState, legal: &[Position], player: Player) -> Vec<Position> {
    legal
        .iter()
        .copied()
        .filter(|&pos| {
            board
                .with_mark(pos, player)
                .is_some_and(|scratch| scratch.has_line(player))
        })
        .collect()
}

impl Agent for HeuristicAgent {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        let (position, _rule) = self
            .decide(engine.board(), engine.current_player())
            .ok_or(Error::NoValidMoves)?;
        self.buffer.record(engine.state_string());
        Ok(position)
    }

    fn reset_for_new_episode(&mut self, _engine: &GameEngine) {
        self.buffer.clear();
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = rng_from_seed(Some(seed));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_state_string(s).unwrap()
    }

    fn agent() -> HeuristicAgent {
        HeuristicAgent::new("Heuristic", Some(3))
    }

    #[test]
    fn takes_the_win_before_blocking() {
        // X can win at (0, 2); O threatens (1, 2)
        let b = board("XX-\nOO-\n---");
        assert_eq!(
            agent().decide(&b, Player::X),
            Some((Position::new(0, 2), HeuristicRule::Win))
        );
    }

    #[test]
    fn blocks_the_opponent_line() {
        let b = board("X--\nOO-\nX--");
        assert_eq!(
            agent().decide(&b, Player::X),
            Some((Position::new(1, 2), HeuristicRule::Block))
        );
    }

    /// Every position chosen across a range of seeds, with the rule that chose it.
    fn choices_over_seeds(b: &BoardState, mover: Player) -> Vec<(Position, HeuristicRule)> {
        let mut seen: Vec<(Position, HeuristicRule)> = (0..64)
            .filter_map(|seed| HeuristicAgent::new("Heuristic", Some(seed)).decide(b, mover))
            .collect();
        seen.sort_by_key(|(pos, _)| *pos);
        seen.dedup();
        seen
    }

    #[test]
    fn several_wins_are_chosen_among_uniformly() {
        // X completes row 0 at (0, 2) or column 0 at (2, 0)
        let b = board("XX-\nX-O\n-OO");
        assert_eq!(
            choices_over_seeds(&b, Player::X),
            vec![
                (Position::new(0, 2), HeuristicRule::Win),
                (Position::new(2, 0), HeuristicRule::Win),
            ]
        );
    }

    #[test]
    fn several_threats_are_blocked_among_uniformly() {
        let b = board("XX-\nX-O\n-O-");
        assert_eq!(
            choices_over_seeds(&b, Player::O),
            vec![
                (Position::new(0, 2), HeuristicRule::Block),
                (Position::new(2, 0), HeuristicRule::Block),
            ]
        );
    }

    #[test]
    fn prefers_center_then_corner() {
        assert_eq!(
            agent().decide(&BoardState::new(), Player::X),
            Some((Position::CENTER, HeuristicRule::Center))
        );

        let b = board("---\n-X-\n---");
        let (pos, rule) = agent().decide(&b, Player::O).unwrap();
        assert_eq!(rule, HeuristicRule::Corner);
        assert!(Position::CORNERS.contains(&pos));
    }

    #[test]
    fn falls_back_to_any_edge() {
        // corners and center taken, no threats on the board
        let quiet = board("XOX\n-O-\nOXO");
        let (pos, rule) = agent().decide(&quiet, Player::X).unwrap();
        assert_eq!(rule, HeuristicRule::Any);
        assert!(quiet.is_legal(pos));
    }

    #[test]
    fn decisions_do_not_mutate_the_board() {
        let b = board("XX-\nOO-\n---");
        let before = b;
        let _ = agent().decide(&b, Player::X);
        assert_eq!(b, before);
    }

    #[test]
    fn full_exploration_stays_legal() {
        let mut explorer = agent().with_epsilon(1.0).unwrap();
        let b = board("XX-\nOO-\n---");
        for _ in 0..50 {
            let (pos, rule) = explorer.decide(&b, Player::X).unwrap();
            assert_eq!(rule, HeuristicRule::Explore);
            assert!(b.is_legal(pos));
        }
    }

    #[test]
    fn epsilon_outside_unit_interval_is_rejected() {
        assert!(agent().with_epsilon(1.5).is_err());
        assert!(agent().with_epsilon(-0.1).is_err());
    }
}
