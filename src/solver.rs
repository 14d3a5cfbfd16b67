//! Greedy best-first disassembly search.
//!
//! States are expanded in ascending [`PuzzleState::priority`] order. For
//! each popped state and each of the six directions the locked pieces are
//! split into rigid groups (see [`crate::blocking`]); every small enough
//! group that can slide at least one unit yields one successor. Successors
//! are deduplicated by canonical key before they are queued, so no state is
//! ever re-parented.
//!
//! The search is not cost-accumulating, so the returned sequence is a
//! disassembly, not necessarily the shortest one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rustc_hash::FxHashSet;

use crate::blocking::BlockingGraph;
use crate::collision::Occupancy;
use crate::geometry::{Coord, Direction};
use crate::pieces::Puzzle;
use crate::state::{CanonicalKey, PuzzleState};

/// A state is solved once at most this many pieces remain locked.
pub const GOAL_LOCKED_PIECES: usize = 2;

/// How many expansions between progress lines in the debug log.
const PROGRESS_INTERVAL: usize = 10_000;

/// Result of one search.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// Ordered states from the assembled start to a goal state.
    Solved(Vec<PuzzleState>),
    /// The frontier ran dry. Not a proof of impossibility: rigid groups
    /// larger than half the locked pieces are never tried.
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct SolveReport {
    pub outcome: Outcome,
    /// Distinct canonical keys seen, start state included.
    pub states_visited: usize,
    pub elapsed: Duration,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&[PuzzleState]> {
        match &self.outcome {
            Outcome::Solved(states) => Some(states),
            Outcome::Exhausted => None,
        }
    }
}

/// Search driver owning all per-solve scratch data.
///
/// Each instance carries its own mask caches and voxel fields, so separate
/// instances can search concurrently.
pub struct Disassembler {
    dim: i32,
    occupancy: Occupancy,
    start: PuzzleState,
}

impl Disassembler {
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            dim: puzzle.dim(),
            occupancy: Occupancy::new(puzzle),
            start: puzzle.start_state(),
        }
    }

    /// Goal test: all but the last [`GOAL_LOCKED_PIECES`] pieces are free.
    pub fn is_goal(state: &PuzzleState) -> bool {
        state.free_count() >= state.num_pieces().saturating_sub(GOAL_LOCKED_PIECES)
    }

    /// Runs the search from the puzzle's initial offsets.
    pub fn solve(&mut self) -> SolveReport {
        let started = Instant::now();
        debug!(
            "solving {} pieces on a {}^3 lattice",
            self.start.num_pieces(),
            self.dim
        );

        let mut search = Search::new(self.start.clone());
        let mut expanded = 0usize;
        let mut goal = None;

        while let Some(Reverse((priority, id))) = search.frontier.pop() {
            let state = search.arena[id].clone();
            if Self::is_goal(&state) {
                goal = Some(id);
                break;
            }

            expanded += 1;
            if expanded % PROGRESS_INTERVAL == 0 {
                debug!(
                    "expanded {expanded} states, {} visited, {} queued",
                    search.visited.len(),
                    search.frontier.len()
                );
            }
            trace!(
                "expanding state {id} (priority {priority}, {} free)",
                state.free_count()
            );

            for successor in self.successors(&state) {
                search.push(successor, id);
            }
        }

        let elapsed = started.elapsed();
        let states_visited = search.visited.len();
        let outcome = match goal {
            Some(id) => {
                let path = search.trace_path(id);
                debug_assert!(path
                    .first()
                    .is_some_and(|first| first.same_positions(&self.start)));
                info!(
                    "solved in {} moves: {states_visited} states visited in {elapsed:?}",
                    path.len() - 1
                );
                Outcome::Solved(path)
            }
            None => {
                info!("no disassembly found: {states_visited} states visited in {elapsed:?}");
                Outcome::Exhausted
            }
        };

        SolveReport {
            outcome,
            states_visited,
            elapsed,
        }
    }

    /// Every successor of `state`, directions in [`Direction::ALL`] order.
    pub fn successors(&mut self, state: &PuzzleState) -> Vec<PuzzleState> {
        self.occupancy.rebuild(state);
        let mut out = Vec::new();
        for direction in Direction::ALL {
            self.expand_direction(state, direction, &mut out);
        }
        out
    }

    /// Successors of `state` along a single direction.
    pub fn successors_in(&mut self, state: &PuzzleState, direction: Direction) -> Vec<PuzzleState> {
        self.occupancy.rebuild(state);
        let mut out = Vec::new();
        self.expand_direction(state, direction, &mut out);
        out
    }

    /// Expects the occupancy field to hold `state`.
    fn expand_direction(
        &mut self,
        state: &PuzzleState,
        direction: Direction,
        out: &mut Vec<PuzzleState>,
    ) {
        let max_group = state.locked_count() / 2;
        let graph = BlockingGraph::build(&mut self.occupancy, state, direction);

        for group in graph.rigid_groups() {
            if group.len() > max_group {
                continue;
            }
            let slide = self.max_slide(state, &group, direction);
            if slide == 0 {
                continue;
            }

            let axis = direction.axis();
            let face = direction.exit_face(self.dim);
            let exits = group
                .iter()
                .any(|&piece| state.position(piece).get(axis) + direction.sign() * slide == face);
            let offset: Coord = if exits {
                direction.vector() * slide
            } else {
                direction.vector()
            };

            let mut positions = state.positions().to_vec();
            for &piece in &group {
                positions[piece] += offset;
            }
            out.push(PuzzleState::new(positions, self.dim));
        }
    }

    /// Largest number of units the group can slide along `direction` without
    /// a collision, stopping at the first blocked step.
    fn max_slide(&mut self, state: &PuzzleState, group: &[usize], direction: Direction) -> i32 {
        let mut slide = 0;
        for units in 1..self.dim {
            if self.occupancy.group_collides(state, group, direction.vector() * units) {
                break;
            }
            slide = units;
        }
        slide
    }
}

impl Puzzle {
    /// Searches for a disassembly of this puzzle with fresh scratch data.
    pub fn solve(&self) -> SolveReport {
        Disassembler::new(self).solve()
    }
}

/// Frontier and bookkeeping of one solve.
struct Search {
    /// Every generated state, indexed by discovery order.
    arena: Vec<PuzzleState>,
    parents: Vec<Option<usize>>,
    visited: FxHashSet<CanonicalKey>,
    // discovery id breaks priority ties first in, first out
    frontier: BinaryHeap<Reverse<(i32, usize)>>,
}

impl Search {
    fn new(start: PuzzleState) -> Self {
        let mut search = Self {
            arena: Vec::new(),
            parents: Vec::new(),
            visited: FxHashSet::default(),
            frontier: BinaryHeap::new(),
        };
        search.insert(start, None);
        search
    }

    fn push(&mut self, state: PuzzleState, parent: usize) {
        if !self.visited.contains(state.key()) {
            self.insert(state, Some(parent));
        }
    }

    fn insert(&mut self, state: PuzzleState, parent: Option<usize>) {
        let id = self.arena.len();
        self.visited.insert(state.key().clone());
        self.frontier.push(Reverse((state.priority(), id)));
        self.arena.push(state);
        self.parents.push(parent);
    }

    /// Walks parent links from `goal` back to the start.
    fn trace_path(&self, goal: usize) -> Vec<PuzzleState> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(id) = current {
            path.push(self.arena[id].clone());
            current = self.parents[id];
        }
        path.reverse();
        path
    }
}
