//! Immutable search states and their canonical deduplication keys.

use crate::geometry::Coord;

/// A piece counts as free once any offset component is closer than this to
/// either end of the lattice.
pub const EDGE_THRESHOLD: i32 = 3;

/// Translation- and free-normalized fingerprint of a state.
///
/// Locked offsets are taken relative to their component-wise minimum and
/// free pieces collapse to the zero vector, so layouts that differ only by a
/// uniform shift of the locked core, or by where freed pieces ended up, share
/// a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalKey(Vec<Coord>);

impl CanonicalKey {
    pub fn as_slice(&self) -> &[Coord] {
        &self.0
    }
}

/// Snapshot of every piece offset plus values derived once at construction.
///
/// There is no `PartialEq`: use [`PuzzleState::same_positions`] for identity
/// and [`PuzzleState::same_key`] for canonical equivalence.
#[derive(Clone, Debug)]
pub struct PuzzleState {
    positions: Vec<Coord>,
    free: Vec<bool>,
    key: CanonicalKey,
    priority: i32,
}

impl PuzzleState {
    pub fn new(positions: Vec<Coord>, dim: i32) -> Self {
        let free: Vec<bool> = positions
            .iter()
            .map(|&p| is_free_offset(p, dim))
            .collect();
        let priority = positions.iter().map(|&p| edge_distance(p, dim)).sum();

        // undefined when nothing is locked, but then every key entry is zero anyway
        let min_locked = positions
            .iter()
            .zip(&free)
            .filter(|(_, &free)| !free)
            .map(|(&p, _)| p)
            .reduce(Coord::component_min)
            .unwrap_or(Coord::ZERO);

        let key = positions
            .iter()
            .zip(&free)
            .map(|(&p, &free)| if free { Coord::ZERO } else { p - min_locked })
            .collect();

        Self {
            positions,
            free,
            key: CanonicalKey(key),
            priority,
        }
    }

    #[inline]
    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    #[inline]
    pub fn position(&self, piece: usize) -> Coord {
        self.positions[piece]
    }

    #[inline]
    pub fn free(&self) -> &[bool] {
        &self.free
    }

    #[inline]
    pub fn is_free(&self, piece: usize) -> bool {
        self.free[piece]
    }

    pub fn num_pieces(&self) -> usize {
        self.positions.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.iter().filter(|&&free| free).count()
    }

    pub fn locked_count(&self) -> usize {
        self.num_pieces() - self.free_count()
    }

    /// Indices of the pieces still subject to collision checks.
    pub fn locked(&self) -> impl Iterator<Item = usize> + '_ {
        self.free
            .iter()
            .enumerate()
            .filter(|(_, &free)| !free)
            .map(|(piece, _)| piece)
    }

    #[inline]
    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Sum of every piece's distance to its nearest lattice face; lower is
    /// closer to disassembled.
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Identity equality: every offset matches exactly.
    pub fn same_positions(&self, other: &PuzzleState) -> bool {
        self.positions == other.positions
    }

    /// Canonical equality: the deduplication keys match.
    pub fn same_key(&self, other: &PuzzleState) -> bool {
        self.key == other.key
    }
}

/// Whether a piece at `position` has left the interlocked core.
///
/// Freedom depends on the offset alone. A piece that slides with an exiting
/// group but stops short of the threshold stays locked.
pub fn is_free_offset(position: Coord, dim: i32) -> bool {
    [position.x, position.y, position.z]
        .into_iter()
        .any(|c| c < EDGE_THRESHOLD || c > dim - EDGE_THRESHOLD)
}

fn edge_distance(p: Coord, dim: i32) -> i32 {
    [p.x, p.y, p.z, dim - p.x, dim - p.y, dim - p.z]
        .into_iter()
        .min()
        .unwrap_or(0)
}
