//! Small hand-checked puzzles shared by the unit tests.

use crate::geometry::Coord;
use crate::pieces::Puzzle;

fn c(x: i32, y: i32, z: i32) -> Coord {
    Coord::new(x, y, z)
}

fn cube() -> Vec<Coord> {
    vec![Coord::ZERO]
}

/// Every cell of the box `lo..=hi` that is not listed in `holes`, relative
/// to `lo`.
fn block_around(lo: Coord, hi: Coord, holes: &[Coord]) -> Vec<Coord> {
    let mut voxels = Vec::new();
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                let cell = c(x, y, z);
                if !holes.contains(&cell) {
                    voxels.push(cell - lo);
                }
            }
        }
    }
    voxels
}

/// Two cubes already touching opposite corners of a 6^3 lattice: both free
/// from the start.
pub fn separated() -> Puzzle {
    Puzzle::new(6, vec![cube(), cube()], vec![c(0, 0, 0), c(5, 5, 5)]).unwrap()
}

/// Three single cubes on one row along x, two empty cells apart.
pub fn row_of_cubes() -> Puzzle {
    Puzzle::new(
        10,
        vec![cube(), cube(), cube()],
        vec![c(3, 5, 5), c(5, 5, 5), c(7, 5, 5)],
    )
    .unwrap()
}

pub const NESTED_INNER: usize = 0;
pub const NESTED_OUTER: usize = 1;
pub const NESTED_CAGE: usize = 2;

/// A cube inside a cage inside a solid block, on a 10^3 lattice.
///
/// The cage leaves one empty cell on the cube's +x side, so the only legal
/// move is the cube stepping once along +x, which already frees it.
pub fn nested() -> Puzzle {
    let inner = c(7, 5, 5);
    let gap = c(8, 5, 5);
    let cage: Vec<Coord> = vec![
        c(6, 5, 5),
        c(9, 5, 5),
        c(7, 4, 5),
        c(8, 4, 5),
        c(7, 6, 5),
        c(8, 6, 5),
        c(7, 5, 4),
        c(8, 5, 4),
        c(7, 5, 6),
        c(8, 5, 6),
    ];
    caged_puzzle(inner, &cage, &[inner, gap])
}

/// Like [`nested`] but the cage hugs the cube on all six sides, so nothing
/// can move at all.
pub fn locked_cross() -> Puzzle {
    let inner = c(7, 5, 5);
    let cage: Vec<Coord> = [
        c(6, 5, 5),
        c(8, 5, 5),
        c(7, 4, 5),
        c(7, 6, 5),
        c(7, 5, 4),
        c(7, 5, 6),
    ]
    .to_vec();
    caged_puzzle(inner, &cage, &[inner])
}

fn caged_puzzle(inner: Coord, cage: &[Coord], hollow: &[Coord]) -> Puzzle {
    let cage_offset = c(6, 4, 4);
    let block_lo = c(5, 3, 3);
    let block_hi = c(9, 7, 7);

    let mut holes = cage.to_vec();
    holes.extend_from_slice(hollow);

    Puzzle::new(
        10,
        vec![
            cube(),
            block_around(block_lo, block_hi, &holes),
            cage.iter().map(|&v| v - cage_offset).collect(),
        ],
        vec![inner, block_lo, cage_offset],
    )
    .unwrap()
}

pub const COMB_UPPER: usize = 0;
pub const COMB_LOWER: usize = 1;
pub const COMB_LOOSE_A: usize = 2;
pub const COMB_LOOSE_B: usize = 3;

/// Two interleaved combs that block each other along x, plus two loose
/// cubes, on a 16^3 lattice.
pub fn combs() -> Puzzle {
    let upper = vec![c(0, 0, 0), c(0, 1, 0), c(1, 1, 0), c(2, 1, 0), c(2, 0, 0)];
    let lower = vec![c(0, 1, 0), c(2, 1, 0), c(0, 0, 0), c(1, 0, 0), c(2, 0, 0)];
    Puzzle::new(
        16,
        vec![upper, lower, cube(), cube()],
        vec![c(5, 6, 5), c(6, 5, 5), c(10, 10, 10), c(4, 12, 12)],
    )
    .unwrap()
}

pub const SHUTTLE_BLOCK: usize = 0;
pub const SHUTTLE_X: usize = 1;
pub const SHUTTLE_Y: usize = 2;

/// A solid 5^3 block with two sealed tunnels of length three, one along x
/// and one along y, each holding a cube, on a 12^3 lattice.
///
/// Both cubes can shuttle back and forth but never get out: the search sees
/// 3 x 3 layouts before the frontier runs dry.
pub fn shuttles() -> Puzzle {
    let x_tunnel = [c(4, 4, 4), c(5, 4, 4), c(6, 4, 4)];
    let y_tunnel = [c(4, 4, 6), c(4, 5, 6), c(4, 6, 6)];
    let holes: Vec<Coord> = x_tunnel.iter().chain(&y_tunnel).copied().collect();
    let block_lo = c(3, 3, 3);

    Puzzle::new(
        12,
        vec![block_around(block_lo, c(7, 7, 7), &holes), cube(), cube()],
        vec![block_lo, x_tunnel[0], y_tunnel[0]],
    )
    .unwrap()
}

pub const LONG_BAR: usize = 0;

/// A bar of five cubes whose far end touches the +x face of a 10^3 lattice,
/// next to two single cubes.
pub fn long_bar() -> Puzzle {
    let bar = (0..5).map(|x| c(x, 0, 0)).collect();
    Puzzle::new(
        10,
        vec![bar, cube(), cube()],
        vec![c(5, 5, 5), c(3, 3, 3), c(6, 6, 6)],
    )
    .unwrap()
}
