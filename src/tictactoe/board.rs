//! Board state representation and its two canonical encodings

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Number of integers representable by the base-3 encoding (3^9).
pub const STATE_SPACE: u32 = 19_683;

/// Symbol alphabet indexed by cell digit: Empty, X, O.
pub const SYMBOLS: [char; 3] = ['-', 'X', 'O'];

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Base-3 digit used by the integer encoding.
    pub fn digit(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    pub fn from_digit(digit: u32) -> Option<Cell> {
        match digit {
            0 => Some(Cell::Empty),
            1 => Some(Cell::X),
            2 => Some(Cell::O),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        SYMBOLS[self.digit() as usize]
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        SYMBOLS
            .iter()
            .position(|&symbol| symbol == c)
            .and_then(|digit| Cell::from_digit(digit as u32))
    }
}

/// A player in the game. X always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().symbol()
    }

    /// Seat number: 1 for the opening player, 2 for the reply.
    pub fn number(self) -> u8 {
        match self {
            Player::X => 1,
            Player::O => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} ({})", self.number(), self.symbol())
    }
}

/// A (row, column) coordinate on the board. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const CENTER: Position = Position { row: 1, col: 1 };

    pub const CORNERS: [Position; 4] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: 2 },
        Position { row: 2, col: 0 },
        Position { row: 2, col: 2 },
    ];

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a position from a row-major cell index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        })
    }

    /// Row-major cell index, or `None` when off the board.
    pub fn index(self) -> Option<usize> {
        self.in_bounds().then(|| self.row * BOARD_SIZE + self.col)
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    fn checked_index(self) -> crate::Result<usize> {
        self.index().ok_or(crate::Error::PositionOutOfBounds {
            row: self.row,
            col: self.col,
        })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Complete board state including cells and whose turn it is.
///
/// Cells are stored row-major. `to_move` is kept alongside the cells so the
/// engine can carry it through a game; every decoder derives it from the
/// piece counts instead (X moves whenever X has placed no more marks than O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
    pub to_move: Player,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; CELL_COUNT],
            to_move: Player::X,
        }
    }

    /// Create a board from raw cells, deriving the player to move from the counts.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        BoardState {
            cells,
            to_move: Self::turn_from_cells(&cells),
        }
    }

    /// Whoever has placed no more marks than the other moves; X wins ties.
    pub fn turn_from_cells(cells: &[Cell; CELL_COUNT]) -> Player {
        let x = cells.iter().filter(|&&c| c == Cell::X).count();
        let o = cells.iter().filter(|&&c| c == Cell::O).count();
        if x <= o { Player::X } else { Player::O }
    }

    /// Get the cell at a position, or `None` when off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        pos.index().map(|i| self.cells[i])
    }

    /// Number of marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// All empty cells in row-major order.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .filter_map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// True iff the position is on the board and its cell is empty.
    pub fn is_legal(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Set a cell. Only the bounds are checked; legality and turn order belong to the caller.
    pub fn place(&mut self, pos: Position, player: Player) -> crate::Result<()> {
        let index = pos.checked_index()?;
        self.cells[index] = player.to_cell();
        Ok(())
    }

    /// Scratch copy with `player`'s mark added at `pos`, if that cell is empty.
    #[must_use = "with_mark returns a new board state; the original is unchanged"]
    pub fn with_mark(&self, pos: Position, player: Player) -> Option<BoardState> {
        if !self.is_legal(pos) {
            return None;
        }
        let mut scratch = *self;
        scratch.place(pos, player).ok()?;
        Some(scratch)
    }

    /// Check if a player occupies a full row, column, or diagonal
    pub fn has_line(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_line(Player::X) {
            Some(Player::X)
        } else if self.has_line(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Canonical string encoding: three rows of `-XO` joined by newlines.
    pub fn to_state_string(&self) -> String {
        let mut out = String::with_capacity(CELL_COUNT + BOARD_SIZE - 1);
        for (row, chunk) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row > 0 {
                out.push('\n');
            }
            out.extend(chunk.iter().map(|c| c.symbol()));
        }
        out
    }

    /// Parse the canonical string encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not exactly three rows of three symbols
    /// drawn from `-`, `X`, `O`.
    pub fn from_state_string(s: &str) -> crate::Result<Self> {
        let rows: Vec<&str> = s.split('\n').collect();
        let shape_error = |columns: usize| crate::Error::InvalidBoardShape {
            rows: rows.len(),
            columns,
            context: s.to_string(),
        };
        if rows.len() != BOARD_SIZE {
            return Err(shape_error(rows.first().map_or(0, |r| r.chars().count())));
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != BOARD_SIZE {
                return Err(shape_error(symbols.len()));
            }
            for (col, &character) in symbols.iter().enumerate() {
                cells[row * BOARD_SIZE + col] =
                    Cell::from_symbol(character).ok_or(crate::Error::InvalidCellCharacter {
                        character,
                        row,
                        column: col,
                    })?;
            }
        }

        Ok(Self::from_cells(cells))
    }

    /// Base-3 integer encoding, first cell most significant.
    pub fn to_state_int(&self) -> u32 {
        self.cells.iter().fold(0, |acc, cell| acc * 3 + cell.digit())
    }

    /// Decode the base-3 integer encoding.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StateOutOfRange`] when `value >= 3^9`.
    pub fn from_state_int(value: u32) -> crate::Result<Self> {
        if value >= STATE_SPACE {
            return Err(crate::Error::StateOutOfRange { value });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut rest = value;
        for cell in cells.iter_mut().rev() {
            // rest % 3 is always a valid digit
            *cell = Cell::from_digit(rest % 3).unwrap_or(Cell::Empty);
            rest /= 3;
        }

        Ok(Self::from_cells(cells))
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_state_string())
    }
}

impl FromStr for BoardState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_state_string(s)
    }
}
