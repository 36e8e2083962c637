use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration: {rows}x{cols} with {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Coordinates {coords:?} are outside of a {size:?} board")]
    OutOfRange { coords: Coord2, size: Coord2 },
    #[error("Generated mine layout does not fit the board")]
    InvalidLayout,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
