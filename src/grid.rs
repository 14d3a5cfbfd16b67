//! Lattice indexing and voxel occupancy bit sets.
//!
//! The lattice is a cube of edge `dim`, flattened x-major:
//! `idx = x * dim * dim + y * dim + z`. Occupancy is tracked two ways:
//!
//! - [`Mask`]: the sparse bits of a single piece at one position, stored as
//!   `(word index, bits)` pairs so a piece costs a handful of words even on a
//!   48^3 lattice.
//! - [`VoxelField`]: a dense `dim^3` bit set holding the union of many masks.

use crate::geometry::Coord;

/// Converts lattice coordinates to a linear cell index.
///
/// The caller must ensure `coord` is inside the lattice (see [`in_lattice`]).
#[inline(always)]
pub const fn coord_to_idx(coord: Coord, dim: i32) -> usize {
    let dim = dim as usize;
    (coord.x as usize) * dim * dim + (coord.y as usize) * dim + (coord.z as usize)
}

/// Converts a linear cell index back to lattice coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize, dim: i32) -> Coord {
    let dim = dim as usize;
    Coord::new(
        (cell_index / (dim * dim)) as i32,
        ((cell_index / dim) % dim) as i32,
        (cell_index % dim) as i32,
    )
}

/// Returns true if every component of `coord` is in `[0, dim)`.
#[inline(always)]
pub fn in_lattice(coord: Coord, dim: i32) -> bool {
    (0..dim).contains(&coord.x) && (0..dim).contains(&coord.y) && (0..dim).contains(&coord.z)
}

/// Number of 64-bit words needed for a `dim^3` bit set.
#[inline]
fn word_count(dim: i32) -> usize {
    let dim = dim as usize;
    (dim * dim * dim).div_ceil(64)
}

/// Sparse occupancy bits of one piece at one lattice position.
///
/// Words are kept sorted by index and never zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mask {
    words: Vec<(usize, u64)>,
}

impl Mask {
    /// Builds a mask from linear cell indices (duplicates are fine).
    pub fn from_cells(cells: impl IntoIterator<Item = usize>) -> Self {
        let mut cells: Vec<usize> = cells.into_iter().collect();
        cells.sort_unstable();

        let mut words: Vec<(usize, u64)> = Vec::new();
        for cell in cells {
            let word = cell / 64;
            let bit = 1u64 << (cell % 64);
            match words.last_mut() {
                Some((last, bits)) if *last == word => *bits |= bit,
                _ => words.push((word, bit)),
            }
        }

        Self { words }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|(_, bits)| bits.count_ones() as usize)
            .sum()
    }

    /// Returns true if the two masks share any cell.
    pub fn intersects(&self, other: &Mask) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.words.len() && j < other.words.len() {
            let (a_word, a_bits) = self.words[i];
            let (b_word, b_bits) = other.words[j];
            if a_word < b_word {
                i += 1;
            } else if b_word < a_word {
                j += 1;
            } else {
                if a_bits & b_bits != 0 {
                    return true;
                }
                i += 1;
                j += 1;
            }
        }
        false
    }

    /// Iterates the occupied linear cell indices in ascending order.
    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().flat_map(|&(word, bits)| {
            (0..64usize)
                .filter(move |bit| bits & (1u64 << bit) != 0)
                .map(move |bit| word * 64 + bit)
        })
    }
}

/// Dense `dim^3` occupancy bit set.
///
/// Scratch state only: it is rebuilt from a puzzle state before each
/// collision query and never carried between states.
#[derive(Clone, Debug)]
pub struct VoxelField {
    words: Vec<u64>,
}

impl VoxelField {
    /// Creates an empty field for a lattice of edge `dim`.
    pub fn new(dim: i32) -> Self {
        Self {
            words: vec![0; word_count(dim)],
        }
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Overwrites this field with `other` without reallocating.
    pub fn copy_from(&mut self, other: &VoxelField) {
        self.words.copy_from_slice(&other.words);
    }

    pub fn union_with(&mut self, mask: &Mask) {
        for &(word, bits) in &mask.words {
            self.words[word] |= bits;
        }
    }

    /// Toggles the bits of `mask`; used to lift a piece out before probing.
    pub fn xor_with(&mut self, mask: &Mask) {
        for &(word, bits) in &mask.words {
            self.words[word] ^= bits;
        }
    }

    /// Returns true if any bit of `mask` is already set.
    pub fn intersects(&self, mask: &Mask) -> bool {
        mask.words
            .iter()
            .any(|&(word, bits)| self.words.get(word).is_some_and(|w| w & bits != 0))
    }

    #[inline]
    pub fn is_occupied(&self, cell_index: usize) -> bool {
        self.words
            .get(cell_index / 64)
            .is_some_and(|w| w & (1u64 << (cell_index % 64)) != 0)
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Formats world-space voxels of each piece as z-slices side by side.
///
/// Only the bounding box of the voxels is drawn, so pieces that have been
/// slid far out of the lattice widen the picture. Rows run from the highest
/// y to the lowest; cells show the 1-based piece number (`A`.. from 10) or
/// `.` for empty. Where free pieces overlap, the later piece wins.
pub fn format_pieces(pieces: &[Vec<Coord>]) -> String {
    let mut voxels = pieces.iter().flatten();
    let Some(&first) = voxels.next() else {
        return String::new();
    };
    let (lo, hi) = voxels.fold((first, first), |(lo, hi), &v| {
        (
            lo.component_min(v),
            Coord::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z)),
        )
    });

    let width = (hi.x - lo.x + 1) as usize;
    let height = (hi.y - lo.y + 1) as usize;
    let depth = (hi.z - lo.z + 1) as usize;

    // indexed [z][y][x] relative to the bounding box
    let mut cells = vec![vec![vec!['.'; width]; height]; depth];
    for (piece_index, voxels) in pieces.iter().enumerate() {
        let symbol = piece_symbol(piece_index);
        for v in voxels {
            let (x, y, z) = ((v.x - lo.x) as usize, (v.y - lo.y) as usize, (v.z - lo.z) as usize);
            cells[z][y][x] = symbol;
        }
    }

    let labels: Vec<String> = (lo.z..=hi.z).map(|z| format!("z={z}")).collect();
    let column = labels.iter().map(String::len).max().unwrap_or(0).max(width);

    let mut lines = Vec::with_capacity(height + 1);
    lines.push(
        labels
            .iter()
            .map(|label| format!("{label:<column$}"))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for y in (0..height).rev() {
        let row: Vec<String> = cells
            .iter()
            .map(|slice| {
                let text: String = slice[y].iter().collect();
                format!("{text:<column$}")
            })
            .collect();
        lines.push(row.join("  "));
    }

    let mut output = String::new();
    for line in lines {
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// Display character for a 0-based piece index.
fn piece_symbol(piece_index: usize) -> char {
    let number = piece_index + 1;
    match number {
        1..=9 => char::from(b'0' + number as u8),
        10..=35 => char::from(b'A' + (number - 10) as u8),
        _ => '#',
    }
}
