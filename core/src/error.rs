use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {height}x{width} grid cannot hold {mines} mines")]
    InvalidConfiguration {
        height: Coord,
        width: Coord,
        mines: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = std::result::Result<T, GameError>;
