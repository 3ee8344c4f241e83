//! Core types, geometry, and traits for the voxcraft engine.
//!
//! This crate provides the foundational types used throughout the engine:
//! - Block identifiers
//! - Coordinate systems (block grid, chunk column, local)
//! - Geometry primitives (sizes, bounding boxes, axes)
//! - The traits through which simulation code reads the world
//! - Common error types

pub mod coords;
pub mod error;
pub mod math;
pub mod traits;
pub mod types;

pub use coords::{ChunkPos, Coordinates3D, LocalPos};
pub use error::{Error, Result};
pub use glam::DVec3;
pub use math::{Axis, BoundingBox, Size};
pub use traits::{BlockPhysicsProvider, BlockSource};
pub use types::BlockId;

/// Engine-wide constants
pub mod constants {
    /// Width of a chunk column in blocks (X axis)
    pub const CHUNK_WIDTH: usize = 16;
    /// Depth of a chunk column in blocks (Z axis)
    pub const CHUNK_DEPTH: usize = 16;
    /// Height of a chunk column and of the world in blocks (Y axis)
    pub const CHUNK_HEIGHT: usize = 128;
    /// Total blocks in a chunk column (16 * 128 * 16)
    pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_DEPTH;
    /// Bits needed to address a block horizontally within a chunk (4 bits for 0-15)
    pub const CHUNK_BITS: u32 = 4;
}
