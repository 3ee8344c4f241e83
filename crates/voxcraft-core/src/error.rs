//! Error types for the engine.

use thiserror::Error;

use crate::coords::ChunkPos;

/// Engine-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid data error
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Out of bounds access
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    /// The chunk column holding a block has not been loaded
    #[error("Chunk ({}, {}) is not loaded", .0.x, .0.z)]
    ChunkNotLoaded(ChunkPos),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
