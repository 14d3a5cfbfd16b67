//! Integer lattice coordinates and the six axis-aligned slide directions.
//!
//! Pieces only ever translate by whole units along one axis at a time, so a
//! direction is fully described by an axis and a sign.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::{Error, Result};

/// A 3D integer coordinate or displacement.
///
/// Locked pieces stay inside `[0, dim)` on every axis; free pieces may drift
/// outside the lattice, including negative values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const ZERO: Self = Self::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the component along `axis`.
    #[inline]
    pub const fn get(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn component_min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }
}

impl Add for Coord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Coord {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Coord {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Coord {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One of the three lattice axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the six unit slide directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Direction {
    /// All directions, in the order the search expands them.
    ///
    /// Frontier ties are broken by discovery order, so changing this order
    /// changes which of several equal-priority solutions is reported.
    pub const ALL: [Direction; 6] = [
        Direction::NegX,
        Direction::PosX,
        Direction::NegY,
        Direction::PosY,
        Direction::NegZ,
        Direction::PosZ,
    ];

    /// Converts a raw displacement into a direction.
    ///
    /// Anything other than the six unit axis vectors is rejected, including
    /// the zero vector and multi-unit steps.
    pub fn from_vector(vector: Coord) -> Result<Self> {
        match (vector.x, vector.y, vector.z) {
            (-1, 0, 0) => Ok(Direction::NegX),
            (1, 0, 0) => Ok(Direction::PosX),
            (0, -1, 0) => Ok(Direction::NegY),
            (0, 1, 0) => Ok(Direction::PosY),
            (0, 0, -1) => Ok(Direction::NegZ),
            (0, 0, 1) => Ok(Direction::PosZ),
            _ => Err(Error::InvalidDirection(vector)),
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::NegX | Direction::PosX => Axis::X,
            Direction::NegY | Direction::PosY => Axis::Y,
            Direction::NegZ | Direction::PosZ => Axis::Z,
        }
    }

    /// `+1` for positive directions, `-1` for negative ones.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Direction::PosX | Direction::PosY | Direction::PosZ => 1,
            Direction::NegX | Direction::NegY | Direction::NegZ => -1,
        }
    }

    /// The unit displacement vector.
    #[inline]
    pub const fn vector(self) -> Coord {
        match self {
            Direction::NegX => Coord::new(-1, 0, 0),
            Direction::PosX => Coord::new(1, 0, 0),
            Direction::NegY => Coord::new(0, -1, 0),
            Direction::PosY => Coord::new(0, 1, 0),
            Direction::NegZ => Coord::new(0, 0, -1),
            Direction::PosZ => Coord::new(0, 0, 1),
        }
    }

    /// The lattice face a piece exits through when sliding this way.
    #[inline]
    pub const fn exit_face(self, dim: i32) -> i32 {
        if self.sign() > 0 {
            dim - 1
        } else {
            0
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::NegX => "-x",
            Direction::PosX => "+x",
            Direction::NegY => "-y",
            Direction::PosY => "+y",
            Direction::NegZ => "-z",
            Direction::PosZ => "+z",
        };
        f.write_str(label)
    }
}
