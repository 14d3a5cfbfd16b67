//! Piece shapes and validated puzzle definitions.
//!
//! A piece is a fixed set of local voxel coordinates. Its absolute position in
//! the lattice is an offset added to every local voxel, so two pieces with the
//! same offset may still occupy different cells.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use crate::geometry::Coord;
use crate::grid::{coord_to_idx, in_lattice, Mask};
use crate::state::PuzzleState;

/// Largest supported lattice edge.
pub const MAX_DIM: i32 = 256;

/// Largest magnitude accepted for any local voxel or offset component.
///
/// Keeps every sum the search forms (voxel plus offset plus slide, distances
/// to the faces, priorities) far away from `i32` overflow.
pub const COORD_LIMIT: i32 = MAX_DIM * 2;

fn within_limit(coord: Coord) -> bool {
    [coord.x, coord.y, coord.z]
        .into_iter()
        .all(|c| (-COORD_LIMIT..=COORD_LIMIT).contains(&c))
}

/// Display colours, cycled by piece index.
pub const PALETTE: [[f32; 3]; 6] = [
    [1.0, 0.0, 1.0], // magenta
    [1.0, 1.0, 0.0], // yellow
    [0.0, 1.0, 1.0], // cyan
    [1.0, 0.0, 0.0], // red
    [0.0, 1.0, 0.0], // green
    [0.0, 0.0, 1.0], // blue
];

/// Returns the fixed display colour for a piece index.
pub fn piece_color(piece_index: usize) -> [f32; 3] {
    PALETTE[piece_index % PALETTE.len()]
}

/// Immutable voxel pattern of one piece plus a memo table of its masks.
///
/// The table maps an absolute offset to the occupancy mask of the shape
/// translated there. It is derived data: cloning a shape clones the table, so
/// each solve can own an independent cache.
#[derive(Clone, Debug)]
pub struct PieceShape {
    voxels: Vec<Coord>,
    dim: i32,
    masks: FxHashMap<Coord, Mask>,
}

impl PieceShape {
    /// Creates a shape, rejecting empty or duplicated voxel lists and voxels
    /// beyond [`COORD_LIMIT`].
    pub fn new(voxels: Vec<Coord>, dim: i32) -> Result<Self> {
        if voxels.is_empty() {
            return Err(Error::InvalidPuzzle("piece has no voxels".into()));
        }
        if let Some(far) = voxels.iter().find(|&&v| !within_limit(v)) {
            return Err(Error::InvalidPuzzle(format!(
                "voxel {far} exceeds the coordinate limit {COORD_LIMIT}"
            )));
        }
        let mut seen = FxHashSet::default();
        if let Some(duplicate) = voxels.iter().find(|&&v| !seen.insert(v)) {
            return Err(Error::InvalidPuzzle(format!(
                "piece lists voxel {duplicate} twice"
            )));
        }

        Ok(Self {
            voxels,
            dim,
            masks: FxHashMap::default(),
        })
    }

    /// Local voxel coordinates.
    #[inline]
    pub fn voxels(&self) -> &[Coord] {
        &self.voxels
    }

    /// Number of unit cubes.
    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// World-space voxels with the shape placed at `offset`.
    pub fn voxels_at(&self, offset: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.voxels.iter().map(move |&v| v + offset)
    }

    /// Occupancy mask with the shape placed at `offset`, memoized.
    ///
    /// No bounds validation happens here: voxels that land outside the
    /// lattice are simply left out of the mask. Keeping the offset legal is
    /// up to the collision layer.
    pub fn mask_at(&mut self, offset: Coord) -> &Mask {
        let voxels = &self.voxels;
        let dim = self.dim;
        self.masks.entry(offset).or_insert_with(|| {
            Mask::from_cells(
                voxels
                    .iter()
                    .map(|&v| v + offset)
                    .filter(|&cell| in_lattice(cell, dim))
                    .map(|cell| coord_to_idx(cell, dim)),
            )
        })
    }

    /// Whether every voxel lands inside the lattice with the shape placed at
    /// `offset`. Shares the memoized mask, which drops the ones that don't.
    pub fn fits_at(&mut self, offset: Coord) -> bool {
        let len = self.voxels.len();
        self.mask_at(offset).count() == len
    }

    /// Number of offsets with a cached mask.
    pub fn cached_masks(&self) -> usize {
        self.masks.len()
    }
}

/// A validated puzzle: lattice size, piece shapes and their start offsets.
#[derive(Clone, Debug)]
pub struct Puzzle {
    dim: i32,
    shapes: Vec<PieceShape>,
    initial_offsets: Vec<Coord>,
}

impl Puzzle {
    /// Builds a puzzle from parsed piece data.
    ///
    /// Fails on an empty or inconsistent definition, on coordinates beyond
    /// [`COORD_LIMIT`], and on locked start pieces that overlap or stick out
    /// of the lattice.
    pub fn new(dim: i32, pieces: Vec<Vec<Coord>>, initial_offsets: Vec<Coord>) -> Result<Self> {
        if !(1..=MAX_DIM).contains(&dim) {
            return Err(Error::InvalidPuzzle(format!(
                "lattice dimension {dim} outside 1..={MAX_DIM}"
            )));
        }
        if pieces.is_empty() {
            return Err(Error::InvalidPuzzle("puzzle has no pieces".into()));
        }
        if pieces.len() != initial_offsets.len() {
            return Err(Error::InvalidPuzzle(format!(
                "{} pieces but {} initial offsets",
                pieces.len(),
                initial_offsets.len()
            )));
        }

        let shapes = pieces
            .into_iter()
            .enumerate()
            .map(|(index, voxels)| {
                PieceShape::new(voxels, dim).map_err(|err| match err {
                    Error::InvalidPuzzle(message) => {
                        Error::InvalidPuzzle(format!("piece {}: {message}", index + 1))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some((index, far)) = initial_offsets
            .iter()
            .enumerate()
            .find(|(_, &offset)| !within_limit(offset))
        {
            return Err(Error::InvalidPuzzle(format!(
                "piece {}: offset {far} exceeds the coordinate limit {COORD_LIMIT}",
                index + 1
            )));
        }

        let puzzle = Self {
            dim,
            shapes,
            initial_offsets,
        };
        puzzle.check_start_layout()?;
        Ok(puzzle)
    }

    /// Lattice edge length.
    #[inline]
    pub fn dim(&self) -> i32 {
        self.dim
    }

    #[inline]
    pub fn num_pieces(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn shapes(&self) -> &[PieceShape] {
        &self.shapes
    }

    #[inline]
    pub fn initial_offsets(&self) -> &[Coord] {
        &self.initial_offsets
    }

    /// The fully assembled start state.
    pub fn start_state(&self) -> PuzzleState {
        PuzzleState::new(self.initial_offsets.clone(), self.dim)
    }

    /// World-space voxels of every piece at the given offsets.
    pub fn world_voxels(&self, positions: &[Coord]) -> Vec<Vec<Coord>> {
        self.shapes
            .iter()
            .zip(positions)
            .map(|(shape, &offset)| shape.voxels_at(offset).collect())
            .collect()
    }

    /// Locked start pieces must lie inside the lattice and be disjoint.
    fn check_start_layout(&self) -> Result<()> {
        let start = self.start_state();
        let mut owner: FxHashMap<Coord, usize> = FxHashMap::default();
        for piece in start.locked() {
            for voxel in self.shapes[piece].voxels_at(start.position(piece)) {
                if !in_lattice(voxel, self.dim) {
                    return Err(Error::InvalidPuzzle(format!(
                        "piece {} sticks out of the lattice at {voxel}",
                        piece + 1
                    )));
                }
                if let Some(other) = owner.insert(voxel, piece) {
                    return Err(Error::InvalidPuzzle(format!(
                        "pieces {} and {} overlap at {voxel}",
                        other + 1,
                        piece + 1
                    )));
                }
            }
        }
        Ok(())
    }
}
