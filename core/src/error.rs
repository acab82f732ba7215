use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {coords:?} for a {size:?} board")]
    InvalidCoords { coords: Coord2, size: Coord2 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a generation request cannot leave a safe cell on the board.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board does not fit {max}×{max} cells", max = crate::Coord::MAX)]
    BoardTooLarge,
    #[error("Mine probability must be finite and in [0, 1)")]
    InvalidProbability,
    #[error("Too many mines, requested {requested} but only {capacity} fit")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
