//! Interactive facade over a puzzle: manual nudges, solving and playback.
//!
//! A presentation layer drives a [`Session`] through its three commands and
//! reads everything it draws through [`crate::PuzzleView`].

use log::debug;

use crate::collision::Occupancy;
use crate::error::{Error, Result};
use crate::geometry::{Coord, Direction};
use crate::pieces::Puzzle;
use crate::solver::SolveReport;
use crate::state::PuzzleState;

pub struct Session {
    puzzle: Puzzle,
    occupancy: Occupancy,
    displayed: PuzzleState,
    report: Option<SolveReport>,
    step: usize,
}

impl Session {
    /// Starts a session showing the assembled puzzle.
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            occupancy: Occupancy::new(&puzzle),
            displayed: puzzle.start_state(),
            puzzle,
            report: None,
            step: 0,
        }
    }

    #[inline]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// The state currently on display.
    #[inline]
    pub fn displayed(&self) -> &PuzzleState {
        &self.displayed
    }

    /// Report of the last solve, if any.
    #[inline]
    pub fn report(&self) -> Option<&SolveReport> {
        self.report.as_ref()
    }

    /// Nudges one piece a single unit along `direction`.
    ///
    /// Returns `Ok(false)` without changing anything when the move would
    /// leave the lattice or hit a locked piece.
    pub fn move_piece(&mut self, index: usize, direction: Direction) -> Result<bool> {
        let count = self.puzzle.num_pieces();
        if index >= count {
            return Err(Error::PieceOutOfRange { index, count });
        }

        self.occupancy.rebuild(&self.displayed);
        if self
            .occupancy
            .piece_collides(&self.displayed, index, direction.vector())
        {
            debug!("piece {} cannot move {direction}", index + 1);
            return Ok(false);
        }

        let mut positions = self.displayed.positions().to_vec();
        positions[index] += direction.vector();
        self.displayed = PuzzleState::new(positions, self.puzzle.dim());
        Ok(true)
    }

    /// [`Session::move_piece`] for a raw displacement, which must be one of
    /// the six unit axis vectors.
    pub fn nudge(&mut self, index: usize, vector: Coord) -> Result<bool> {
        let direction = Direction::from_vector(vector)?;
        self.move_piece(index, direction)
    }

    /// Searches from the initial offsets, replacing any earlier result.
    ///
    /// On success the playback cursor is rewound and the assembled state is
    /// shown; manual moves made before are discarded.
    pub fn solve(&mut self) -> &SolveReport {
        let report = self.puzzle.solve();
        if let Some(first) = report.solution().and_then(|states| states.first()) {
            self.displayed = first.clone();
        }
        self.step = 0;
        self.report.insert(report)
    }

    /// Moves the playback cursor one state forward or back, clamped to the
    /// solution, and displays that state. Returns the new cursor.
    pub fn step_solution(&mut self, forward: bool) -> usize {
        let Some(solution) = self.report.as_ref().and_then(SolveReport::solution) else {
            return self.step;
        };

        let last = solution.len().saturating_sub(1);
        self.step = if forward {
            (self.step + 1).min(last)
        } else {
            self.step.saturating_sub(1)
        };
        if let Some(state) = solution.get(self.step) {
            self.displayed = state.clone();
        }
        self.step
    }

    #[inline]
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Index of the last solution state, or 0 without a solution.
    pub fn max_step(&self) -> usize {
        self.report
            .as_ref()
            .and_then(SolveReport::solution)
            .map_or(0, |states| states.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::PuzzleView;

    #[test]
    fn test_manual_move_into_gap() {
        let mut session = Session::new(fixtures::nested());
        assert!(session.move_piece(fixtures::NESTED_INNER, Direction::PosX).unwrap());
        assert_eq!(
            session.displayed().position(fixtures::NESTED_INNER),
            Coord::new(8, 5, 5)
        );
        assert_eq!(session.piece_voxels()[fixtures::NESTED_INNER], vec![Coord::new(8, 5, 5)]);

        // the gap is now behind it
        assert!(!session.move_piece(fixtures::NESTED_INNER, Direction::PosX).unwrap());
        assert!(session.move_piece(fixtures::NESTED_INNER, Direction::NegX).unwrap());
    }

    #[test]
    fn test_blocked_move_is_a_no_op() {
        let mut session = Session::new(fixtures::locked_cross());
        for direction in Direction::ALL {
            assert!(!session.move_piece(fixtures::NESTED_INNER, direction).unwrap());
        }
        assert!(session
            .displayed()
            .same_positions(&session.puzzle().start_state()));
    }

    #[test]
    fn test_move_off_the_lattice_is_refused() {
        let mut session = Session::new(fixtures::separated());
        assert!(!session.move_piece(0, Direction::NegX).unwrap());
        assert!(session.move_piece(0, Direction::PosX).unwrap());
    }

    #[test]
    fn test_locked_piece_is_kept_inside_the_lattice() {
        let mut session = Session::new(fixtures::long_bar());
        assert!(!session.move_piece(fixtures::LONG_BAR, Direction::PosX).unwrap());
        assert!(session.move_piece(fixtures::LONG_BAR, Direction::NegX).unwrap());
        assert!(session.move_piece(fixtures::LONG_BAR, Direction::PosX).unwrap());
    }

    #[test]
    fn test_bad_piece_index() {
        let mut session = Session::new(fixtures::separated());
        assert!(matches!(
            session.move_piece(2, Direction::PosY),
            Err(Error::PieceOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn test_nudge_takes_unit_vectors_only() {
        let mut session = Session::new(fixtures::nested());
        assert!(matches!(
            session.nudge(fixtures::NESTED_INNER, Coord::new(2, 0, 0)),
            Err(Error::InvalidDirection(_))
        ));
        assert!(matches!(
            session.nudge(fixtures::NESTED_INNER, Coord::ZERO),
            Err(Error::InvalidDirection(_))
        ));
        assert!(session.nudge(fixtures::NESTED_INNER, Coord::new(1, 0, 0)).unwrap());
    }

    #[test]
    fn test_playback_is_clamped() {
        let mut session = Session::new(fixtures::nested());
        assert_eq!(session.step_solution(true), 0, "no solution yet");
        assert!(!session.is_solved());

        session.move_piece(fixtures::NESTED_INNER, Direction::PosX).unwrap();
        assert!(session.solve().is_solved());
        assert_eq!(session.current_step(), 0);
        assert!(session
            .displayed()
            .same_positions(&session.puzzle().start_state()));
        assert_eq!(session.max_step(), 1);

        assert_eq!(session.step_solution(true), 1);
        assert_eq!(
            session.displayed().position(fixtures::NESTED_INNER),
            Coord::new(8, 5, 5)
        );
        assert_eq!(session.step_solution(true), 1);
        assert_eq!(session.step_solution(false), 0);
        assert_eq!(session.step_solution(false), 0);
        assert!(session
            .displayed()
            .same_positions(&session.puzzle().start_state()));
    }

    #[test]
    fn test_failed_solve_keeps_display() {
        let mut session = Session::new(fixtures::locked_cross());
        let report = session.solve();
        assert!(!report.is_solved());
        assert_eq!(report.states_visited, 1);
        assert!(!session.is_solved());
        assert_eq!(session.states_visited(), 1);
        assert!(session.solve_time().is_some());
        assert_eq!(session.max_step(), 0);
        assert_eq!(session.step_solution(true), 0);
    }
}
