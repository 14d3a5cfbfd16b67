//! Error types for the burr solver.

use thiserror::Error;

use crate::geometry::Coord;

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving a puzzle.
///
/// An exhausted search is not an error; see [`crate::solver::Outcome`].
#[derive(Debug, Error)]
pub enum Error {
    /// The puzzle definition is empty or inconsistent.
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),

    /// A displacement that is not one of the six unit axis vectors.
    #[error("invalid direction vector ({}, {}, {})", .0.x, .0.y, .0.z)]
    InvalidDirection(Coord),

    /// A piece index past the end of the puzzle.
    #[error("piece index {index} out of range for {count} pieces")]
    PieceOutOfRange { index: usize, count: usize },

    /// A malformed line in a puzzle file.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Failure reading a puzzle file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
