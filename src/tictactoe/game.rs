//! Mutable game session: legality, turn alternation, and terminal detection

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Position, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Terminal reward for the given seat: 1.0 win, 0.5 draw, 0.0 loss.
    pub fn reward_for(self, player: Player) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == player => 1.0,
            GameOutcome::Win(_) => 0.0,
            GameOutcome::Draw => 0.5,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Drawn,
}

impl GameStatus {
    fn of(board: &BoardState) -> Self {
        match board.winner() {
            Some(winner) => GameStatus::Won(winner),
            None if board.is_terminal() => GameStatus::Drawn,
            None => GameStatus::InProgress,
        }
    }
}

/// One game of Tic-Tac-Toe.
///
/// The engine is only mutated through [`GameEngine::make_move`]. Illegal moves are
/// reported through its `false` return value and never change the position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: BoardState,
    status: GameStatus,
    history: Vec<Move>,
}

impl GameEngine {
    /// Create an engine on the empty board with X to move.
    pub fn new() -> Self {
        Self::from_board(BoardState::new())
    }

    /// Create an engine on a preset position.
    ///
    /// The mover is taken from `board.to_move`; winner and finished flags are
    /// derived from the cells.
    pub fn from_board(board: BoardState) -> Self {
        Self {
            board,
            status: GameStatus::of(&board),
            history: Vec::new(),
        }
    }

    /// Clear the board back to the opening position.
    ///
    /// Agents are notified by the session driver, which owns them.
    pub fn reset(&mut self) {
        self.board = BoardState::new();
        self.status = GameStatus::InProgress;
        self.history.clear();
    }

    /// Place the current mover's mark at `pos`.
    ///
    /// Returns `false` without touching the board if the game is over or the cell
    /// is occupied or off the board. On an accepted move the mover always switches,
    /// including on the move that ends the game.
    pub fn make_move(&mut self, pos: Position) -> bool {
        if self.is_finished() || !self.board.is_legal(pos) {
            return false;
        }

        let mover = self.board.to_move;
        if self.board.place(pos, mover).is_err() {
            return false;
        }
        self.history.push(Move {
            position: pos,
            player: mover,
        });

        if self.board.has_line(mover) {
            self.status = GameStatus::Won(mover);
        } else if self.board.legal_moves().is_empty() {
            self.status = GameStatus::Drawn;
        }

        self.board.to_move = mover.opponent();
        true
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn state_string(&self) -> String {
        self.board.to_state_string()
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves()
    }

    pub fn is_legal(&self, pos: Position) -> bool {
        !self.is_finished() && self.board.is_legal(pos)
    }

    /// Player whose mark the next accepted move will place.
    ///
    /// Once the game is finished this is simply the seat after the last mover.
    pub fn current_player(&self) -> Player {
        self.board.to_move
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Outcome once finished, `None` while in progress.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(GameOutcome::Win(player)),
            GameStatus::Drawn => Some(GameOutcome::Draw),
        }
    }

    /// Accepted moves in the order they were played.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Grid with `|` separators and `-----` rulers, for terminal play.
    pub fn render_grid(&self) -> String {
        let mut out = String::new();
        for row in self.board.cells.chunks(3) {
            let symbols: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            out.push_str(&symbols.join("|"));
            out.push('\n');
            out.push_str("-----\n");
        }
        out
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current player: {}", self.current_player())?;
        f.write_str(&self.state_string())
    }
}
