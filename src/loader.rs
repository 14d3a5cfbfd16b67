//! Plain-text puzzle files.
//!
//! ```text
//! 0 0 0        voxel of the current piece (local coordinates)
//! 1 0 0
//!              blank line ends the piece
//! 0 0 0
//!
//! # 20 20 20   initial offset of the next piece, in piece order
//! #21 20 20
//! ```
//!
//! End of input also ends the last piece. The lattice size is not part of the
//! file and comes from the caller.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::geometry::Coord;
use crate::pieces::Puzzle;

/// Reads and validates a puzzle file.
pub fn load_puzzle(path: impl AsRef<Path>, dim: i32) -> Result<Puzzle> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let puzzle = parse_puzzle(&text, dim)?;
    debug!(
        "loaded {} pieces from {}",
        puzzle.num_pieces(),
        path.display()
    );
    Ok(puzzle)
}

/// Parses puzzle text into a validated [`Puzzle`].
pub fn parse_puzzle(text: &str, dim: i32) -> Result<Puzzle> {
    let mut pieces: Vec<Vec<Coord>> = Vec::new();
    let mut offsets = Vec::new();
    let mut current = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
        } else if let Some(rest) = line.strip_prefix('#') {
            offsets.push(parse_triple(rest, line_number)?);
        } else {
            current.push(parse_triple(line, line_number)?);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    Puzzle::new(dim, pieces, offsets)
}

fn parse_triple(text: &str, line: usize) -> Result<Coord> {
    let values = text
        .split_whitespace()
        .map(|word| {
            word.parse::<i32>().map_err(|_| Error::Parse {
                line,
                message: format!("invalid integer '{word}'"),
            })
        })
        .collect::<Result<Vec<i32>>>()?;

    match values[..] {
        [x, y, z] => Ok(Coord::new(x, y, z)),
        _ => Err(Error::Parse {
            line,
            message: format!("expected 3 coordinates, found {}", values.len()),
        }),
    }
}
