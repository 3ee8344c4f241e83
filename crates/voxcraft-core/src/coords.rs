//! Coordinate systems for the voxel world.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::constants::{CHUNK_BITS, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Position within a chunk column (0..16 horizontally, 0..128 vertically).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl LocalPos {
    /// Create a new local position
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!((x as usize) < CHUNK_WIDTH);
        debug_assert!((y as usize) < CHUNK_HEIGHT);
        debug_assert!((z as usize) < CHUNK_DEPTH);
        Self { x, y, z }
    }

    /// Convert to linear index for flat array storage
    #[inline]
    pub const fn to_index(self) -> usize {
        self.x as usize
            + (self.z as usize) * CHUNK_WIDTH
            + (self.y as usize) * CHUNK_WIDTH * CHUNK_DEPTH
    }

    /// Create from linear index
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        let x = (index % CHUNK_WIDTH) as u8;
        let z = ((index / CHUNK_WIDTH) % CHUNK_DEPTH) as u8;
        let y = (index / (CHUNK_WIDTH * CHUNK_DEPTH)) as u8;
        Self { x, y, z }
    }
}

/// Chunk column position in chunk coordinates.
///
/// Columns span the full world height, so only X and Z are tracked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    /// Create a new chunk position
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Block coordinates of the column's lowest corner
    #[inline]
    pub const fn origin(self) -> Coordinates3D {
        Coordinates3D::new(self.x << CHUNK_BITS, 0, self.z << CHUNK_BITS)
    }
}

/// Integer grid coordinate identifying a single block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates3D {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinates3D {
    pub const ZERO: Self = Self::new(0, 0, 0);
    pub const ONE: Self = Self::new(1, 1, 1);
    pub const UP: Self = Self::new(0, 1, 0);
    pub const DOWN: Self = Self::new(0, -1, 0);
    pub const NORTH: Self = Self::new(0, 0, -1);
    pub const SOUTH: Self = Self::new(0, 0, 1);
    pub const EAST: Self = Self::new(1, 0, 0);
    pub const WEST: Self = Self::new(-1, 0, 0);

    /// Create a new block coordinate
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Drop the fractional part of each component (rounds toward zero).
    #[inline]
    pub fn truncate(v: DVec3) -> Self {
        Self::new(v.x as i32, v.y as i32, v.z as i32)
    }

    /// The block cell that contains `point` (rounds toward negative infinity).
    #[inline]
    pub fn containing(point: DVec3) -> Self {
        Self::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Convert to floating point
    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Get the chunk column containing this block
    #[inline]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos::new(self.x >> CHUNK_BITS, self.z >> CHUNK_BITS)
    }

    /// Get the position within the chunk column, or `None` above or below
    /// the world.
    #[inline]
    pub const fn local_pos(self) -> Option<LocalPos> {
        if self.y < 0 || self.y >= CHUNK_HEIGHT as i32 {
            return None;
        }
        let mask = (CHUNK_WIDTH - 1) as i32;
        Some(LocalPos::new(
            (self.x & mask) as u8,
            self.y as u8,
            (self.z & mask) as u8,
        ))
    }

    /// Create from chunk and local position
    #[inline]
    pub const fn from_chunk_local(chunk: ChunkPos, local: LocalPos) -> Self {
        Self::new(
            (chunk.x << CHUNK_BITS) + local.x as i32,
            local.y as i32,
            (chunk.z << CHUNK_BITS) + local.z as i32,
        )
    }
}

impl fmt::Display for Coordinates3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{},{}>", self.x, self.y, self.z)
    }
}

impl From<Coordinates3D> for DVec3 {
    fn from(c: Coordinates3D) -> Self {
        c.to_dvec3()
    }
}

impl Add for Coordinates3D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Coordinates3D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Coordinates3D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Coordinates3D {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Coordinates3D {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Coordinates3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
