//! Collision predicates over a rebuilt voxel field.
//!
//! [`Occupancy`] owns everything a collision query mutates: the per-piece
//! mask caches, the field of locked voxels for the current state, and a probe
//! field that queries scribble on. Each solve gets its own instance, so no
//! cache is ever shared between concurrent searches.
//!
//! Masks drop voxels outside the lattice, so the field alone cannot see a
//! piece sticking out of it. A move therefore also collides when a piece that
//! is still locked at its new offset would not fit inside the lattice. Pieces
//! that end up free are exempt.

use crate::geometry::{Coord, Direction};
use crate::grid::{in_lattice, VoxelField};
use crate::pieces::{PieceShape, Puzzle};
use crate::state::{is_free_offset, PuzzleState};

#[derive(Clone, Debug)]
pub struct Occupancy {
    dim: i32,
    shapes: Vec<PieceShape>,
    field: VoxelField,
    probe: VoxelField,
}

impl Occupancy {
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            dim: puzzle.dim(),
            shapes: puzzle.shapes().to_vec(),
            field: VoxelField::new(puzzle.dim()),
            probe: VoxelField::new(puzzle.dim()),
        }
    }

    #[inline]
    pub fn dim(&self) -> i32 {
        self.dim
    }

    /// Field of locked voxels as of the last [`Occupancy::rebuild`].
    #[inline]
    pub fn field(&self) -> &VoxelField {
        &self.field
    }

    /// Clears the field and unions in every locked piece of `state`.
    pub fn rebuild(&mut self, state: &PuzzleState) {
        self.field.clear();
        for piece in state.locked() {
            let mask = self.shapes[piece].mask_at(state.position(piece));
            self.field.union_with(mask);
        }
    }

    /// Would moving `piece` by `offset` leave the lattice or hit another
    /// locked piece?
    ///
    /// The field must have been rebuilt from `state`. The piece's own voxels
    /// are lifted out of the probe first when it is locked.
    pub fn piece_collides(&mut self, state: &PuzzleState, piece: usize, offset: Coord) -> bool {
        let from = state.position(piece);
        let to = from + offset;
        if !in_lattice(to, self.dim) || self.sticks_out(piece, to) {
            return true;
        }

        self.probe.copy_from(&self.field);
        if !state.is_free(piece) {
            self.probe.xor_with(self.shapes[piece].mask_at(from));
        }
        self.probe.intersects(self.shapes[piece].mask_at(to))
    }

    /// Would moving every piece of `group` by `offset` together leave the
    /// lattice or hit a locked piece outside the group?
    ///
    /// The whole group is lifted out of the probe, then each member is
    /// checked and dropped back in at its new position, so members never
    /// collide with each other.
    pub fn group_collides(&mut self, state: &PuzzleState, group: &[usize], offset: Coord) -> bool {
        if group
            .iter()
            .any(|&piece| !in_lattice(state.position(piece) + offset, self.dim))
        {
            return true;
        }
        if group
            .iter()
            .any(|&piece| self.sticks_out(piece, state.position(piece) + offset))
        {
            return true;
        }

        self.probe.copy_from(&self.field);
        for &piece in group {
            if !state.is_free(piece) {
                self.probe.xor_with(self.shapes[piece].mask_at(state.position(piece)));
            }
        }

        for &piece in group {
            let moved = self.shapes[piece].mask_at(state.position(piece) + offset);
            if self.probe.intersects(moved) {
                return true;
            }
            self.probe.union_with(moved);
        }
        false
    }

    /// A piece still locked at `offset` must lie wholly inside the lattice.
    fn sticks_out(&mut self, piece: usize, offset: Coord) -> bool {
        !is_free_offset(offset, self.dim) && !self.shapes[piece].fits_at(offset)
    }

    /// Locked pieces that `piece` would run into if it alone moved one unit
    /// along `direction`.
    ///
    /// A move that would push the piece's offset out of the lattice reports
    /// no blockers; the slide scan rejects it separately.
    pub fn blockers(
        &mut self,
        state: &PuzzleState,
        piece: usize,
        direction: Direction,
    ) -> Vec<usize> {
        let target = state.position(piece) + direction.vector();
        if !in_lattice(target, self.dim) {
            return Vec::new();
        }

        let moved = self.shapes[piece].mask_at(target).clone();
        let mut blocked_by = Vec::new();
        for other in state.locked() {
            if other == piece {
                continue;
            }
            if self.shapes[other].mask_at(state.position(other)).intersects(&moved) {
                blocked_by.push(other);
            }
        }
        blocked_by
    }
}
