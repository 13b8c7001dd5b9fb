//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BOARD_SIZE, BoardState, CELL_COUNT, Cell, Player, Position, STATE_SPACE, SYMBOLS};
pub use game::{GameEngine, GameOutcome, GameStatus, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
