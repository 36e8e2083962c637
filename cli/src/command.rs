use core::str::FromStr;

use minado_core::{Coord, Coord2, Difficulty};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  n [difficulty]  new game (easy, medium, hard)
  s               best scores
  h               this help
  q               quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame(Option<Difficulty>),
    Scores,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command, type h for help")]
    Empty,
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected argument {0:?}")]
    TrailingInput(String),
    #[error(transparent)]
    Difficulty(#[from] minado_core::GameError),
}

fn parse_coord(word: Option<&str>) -> Result<Coord, ParseCommandError> {
    let word = word.ok_or(ParseCommandError::MissingCoords)?;
    word.parse()
        .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Reveal((parse_coord(words.next())?, parse_coord(words.next())?)),
            "f" | "flag" => Flag((parse_coord(words.next())?, parse_coord(words.next())?)),
            "n" | "new" => NewGame(words.next().map(str::parse).transpose()?),
            "s" | "scores" => Scores,
            "h" | "help" | "?" => Help,
            "q" | "quit" | "exit" => Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::TrailingInput(extra.to_owned())),
            None => Ok(command),
        }
    }
}
