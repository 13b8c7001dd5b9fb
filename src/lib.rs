//! Tic-tac-toe engine with MENACE and Monte-Carlo learning agents
//!
//! This crate provides:
//! - A 3x3 board with exact string and base-3 integer encodings
//! - A game engine enforcing legality, turn order and terminal detection
//! - Baseline players (random, rule-based heuristic, interactive human)
//! - A Monte-Carlo state-value learner
//! - A MENACE matchbox learner with bead-count reinforcement
//! - A session driver and training pipeline with observers

pub mod agents;
pub mod cli;
pub mod error;
pub mod menace;
pub mod monte_carlo;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod utils;

pub use error::{Error, Result};
