//! Burr Puzzle Solver Library
//!
//! Finds disassembly sequences for interlocking polycube ("burr") puzzles
//! using axis-aligned slides only.

pub mod blocking;
pub mod collision;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod loader;
pub mod pieces;
pub mod session;
pub mod solver;
pub mod state;

#[cfg(test)]
mod fixtures;

use std::time::Duration;

pub use error::{Error, Result};
pub use geometry::{Coord, Direction};
pub use pieces::Puzzle;
pub use session::Session;
pub use solver::{Outcome, SolveReport};
pub use state::PuzzleState;

/// Read-only queries a presentation layer needs to draw a puzzle.
///
/// Implemented by [`Session`], so front ends never touch search internals.
pub trait PuzzleView {
    /// Lattice edge length.
    fn dim(&self) -> i32;
    fn num_pieces(&self) -> usize;
    /// World-space voxels of every piece as currently displayed.
    fn piece_voxels(&self) -> Vec<Vec<Coord>>;
    /// Fixed RGB colour of a piece, components in `[0, 1]`.
    fn piece_color(&self, index: usize) -> [f32; 3] {
        pieces::piece_color(index)
    }
    fn is_solved(&self) -> bool;
    /// Wall-clock time of the last solve, if one ran.
    fn solve_time(&self) -> Option<Duration>;
    fn states_visited(&self) -> usize;
    fn current_step(&self) -> usize;
    fn max_step(&self) -> usize;
}

impl PuzzleView for Session {
    fn dim(&self) -> i32 {
        self.puzzle().dim()
    }

    fn num_pieces(&self) -> usize {
        self.puzzle().num_pieces()
    }

    fn piece_voxels(&self) -> Vec<Vec<Coord>> {
        self.puzzle().world_voxels(self.displayed().positions())
    }

    fn is_solved(&self) -> bool {
        self.report().is_some_and(SolveReport::is_solved)
    }

    fn solve_time(&self) -> Option<Duration> {
        self.report().map(|report| report.elapsed)
    }

    fn states_visited(&self) -> usize {
        self.report().map_or(0, |report| report.states_visited)
    }

    fn current_step(&self) -> usize {
        Session::current_step(self)
    }

    fn max_step(&self) -> usize {
        Session::max_step(self)
    }
}
