use thiserror::Error;

use crate::maze::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid grid dimensions {rows}x{columns}: rows and columns must both be at least 1")]
    InvalidDimension { rows: usize, columns: usize },

    #[error("coordinate {coord:?} is outside the {rows}x{columns} grid")]
    OutOfBounds {
        coord: Coord,
        rows: usize,
        columns: usize,
    },

    #[error("cells {from:?} and {to:?} are not neighbors")]
    NotNeighbors { from: Coord, to: Coord },

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("cell {0:?} is not reachable through links")]
    UnreachableCell(Coord),

    #[error("no path from {from:?} to {to:?}")]
    NoPath { from: Coord, to: Coord },

    /// The consumer abandoned the run before the producer finished.
    #[error("run was cancelled by the consumer")]
    Cancelled,
}

pub type Result<T, E = MazeError> = std::result::Result<T, E>;
