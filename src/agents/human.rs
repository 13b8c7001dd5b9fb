//! Interactive player reading moves from a text stream

use std::{
    any::Any,
    io::{BufRead, Write},
};

use crate::{
    Error, Result,
    ports::{Agent, AgentProfile},
    tictactoe::{GameEngine, Position},
};

/// Parse "row, col", "row col" or any two digits separated by non-digits.
///
/// # Errors
///
/// Returns [`Error::InvalidMoveInput`] unless the line holds exactly two
/// single-digit numbers, and [`Error::PositionOutOfBounds`] when either is
/// above 2.
pub fn parse_move(input: &str) -> Result<Position> {
    let numbers: Vec<&str> = input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .collect();

    match numbers.as_slice() {
        [row, col] if row.len() == 1 && col.len() == 1 => {
            let row = row.parse::<usize>().map_err(|_| invalid(input))?;
            let col = col.parse::<usize>().map_err(|_| invalid(input))?;
            let position = Position::new(row, col);
            if !position.in_bounds() {
                return Err(Error::PositionOutOfBounds { row, col });
            }
            Ok(position)
        }
        _ => Err(invalid(input)),
    }
}

fn invalid(input: &str) -> Error {
    Error::InvalidMoveInput {
        input: input.trim().to_string(),
    }
}

/// Human player behind any line-oriented reader/writer pair.
///
/// Reprompts until a parseable, legal move is entered. Blocking on input is
/// the only suspension point in the crate.
pub struct HumanAgent<R, W> {
    profile: AgentProfile,
    input: R,
    output: W,
}

impl<R: BufRead + Send + 'static, W: Write + Send + 'static> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            profile: AgentProfile::new(name),
            input,
            output,
        }
    }

    fn prompt(&mut self, engine: &GameEngine) -> Result<()> {
        write!(
            self.output,
            "{}\n{} to move. Enter your move (row col): ",
            engine.render_grid(),
            engine.current_player()
        )?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead + Send + 'static, W: Write + Send + 'static> Agent for HumanAgent<R, W> {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn select_action(&mut self, engine: &GameEngine) -> Result<Position> {
        if engine.legal_moves().is_empty() {
            return Err(Error::NoValidMoves);
        }

        loop {
            self.prompt(engine)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::Io {
                    operation: "read move from input".to_string(),
                    source: std::io::ErrorKind::UnexpectedEof.into(),
                });
            }

            match parse_move(&line) {
                Ok(pos) if engine.is_legal(pos) => return Ok(pos),
                Ok(pos) => writeln!(self.output, "Invalid move {pos}. Try again.")?,
                Err(err) if err.is_input_error() => writeln!(self.output, "{err}. Try again.")?,
                Err(err) => return Err(err),
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
