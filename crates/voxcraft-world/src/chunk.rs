//! Chunk column storage.

use voxcraft_core::constants::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH};
use voxcraft_core::coords::{ChunkPos, LocalPos};
use voxcraft_core::types::BlockId;
use voxcraft_core::{Error, Result};

/// A 16x128x16 column of blocks.
pub struct Chunk {
    /// Position in chunk coordinates.
    pub pos: ChunkPos,
    /// Block IDs in [`LocalPos::to_index`] order.
    blocks: Box<[BlockId]>,
    /// Whether any block changed since generation or the last save.
    pub modified: bool,
}

impl Chunk {
    /// Create a new all-air chunk at the given position.
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            blocks: vec![BlockId::AIR; CHUNK_VOLUME].into_boxed_slice(),
            modified: false,
        }
    }

    /// Rebuild a chunk from the raw byte layout produced by [`Chunk::as_bytes`].
    pub fn from_bytes(pos: ChunkPos, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CHUNK_VOLUME {
            return Err(Error::InvalidData(format!(
                "chunk data is {} bytes, expected {CHUNK_VOLUME}",
                bytes.len()
            )));
        }
        let blocks: &[BlockId] = bytemuck::cast_slice(bytes);
        Ok(Self {
            pos,
            blocks: blocks.into(),
            modified: false,
        })
    }

    /// Raw block bytes, one per block, in index order.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    /// Block at a local position.
    #[inline]
    pub fn block_id(&self, local: LocalPos) -> BlockId {
        self.blocks[local.to_index()]
    }

    /// Replace the block at a local position.
    #[inline]
    pub fn set_block_id(&mut self, local: LocalPos, id: BlockId) {
        self.blocks[local.to_index()] = id;
        self.modified = true;
    }

    /// Fill an entire horizontal layer with one block type.
    pub fn fill_layer(&mut self, y: u8, id: BlockId) {
        let layer = CHUNK_WIDTH * CHUNK_DEPTH;
        let start = y as usize * layer;
        self.blocks[start..start + layer].fill(id);
    }

    /// Y of the highest non-air block in a column, if any.
    pub fn height_at(&self, x: u8, z: u8) -> Option<u8> {
        (0..CHUNK_HEIGHT as u8)
            .rev()
            .find(|&y| !self.block_id(LocalPos::new(x, y, z)).is_air())
    }

    /// Check if this chunk contains only air.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }
}
