//! Sparse in-memory world made of chunk columns.

use hashbrown::HashMap;
use parking_lot::RwLock;
use voxcraft_core::constants::CHUNK_HEIGHT;
use voxcraft_core::coords::{ChunkPos, Coordinates3D};
use voxcraft_core::traits::BlockSource;
use voxcraft_core::types::BlockId;
use voxcraft_core::{Error, Result};

use crate::chunk::Chunk;
use crate::generation::ChunkGenerator;

/// A named world holding the chunk columns loaded so far.
///
/// Reads never generate terrain: a block in a column that has not been
/// loaded is reported as [`Error::ChunkNotLoaded`]. Writes load the column
/// through the generator first. Access is thread-safe via `RwLock`.
pub struct World {
    name: String,
    generator: Box<dyn ChunkGenerator>,
    chunks: RwLock<HashMap<ChunkPos, Chunk>>,
}

impl World {
    /// Create an empty world backed by `generator`.
    pub fn new(name: impl Into<String>, generator: impl ChunkGenerator + 'static) -> Self {
        Self {
            name: name.into(),
            generator: Box::new(generator),
            chunks: RwLock::new(HashMap::new()),
        }
    }

    /// Get the world name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the generator places new arrivals.
    pub fn spawn_point(&self) -> Coordinates3D {
        self.generator.spawn_point()
    }

    /// Whether `coords` lies within the world's vertical bounds.
    #[inline]
    pub const fn is_valid_position(coords: Coordinates3D) -> bool {
        coords.y >= 0 && coords.y < CHUNK_HEIGHT as i32
    }

    /// Check if the column at `pos` is loaded.
    pub fn is_chunk_loaded(&self, pos: ChunkPos) -> bool {
        self.chunks.read().contains_key(&pos)
    }

    /// Get the number of loaded columns.
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    /// Check if no columns are loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }

    /// Get all loaded column positions.
    pub fn loaded_chunks(&self) -> Vec<ChunkPos> {
        self.chunks.read().keys().copied().collect()
    }

    /// Generate the column at `pos` if it is not loaded yet.
    ///
    /// Returns `true` if the column was generated by this call.
    pub fn load_chunk(&self, pos: ChunkPos) -> bool {
        if self.is_chunk_loaded(pos) {
            return false;
        }
        let chunk = self.generator.generate_chunk(pos);
        let mut chunks = self.chunks.write();
        if chunks.contains_key(&pos) {
            return false;
        }
        chunks.insert(pos, chunk);
        tracing::debug!("Loaded chunk ({}, {}) in world {}", pos.x, pos.z, self.name);
        true
    }

    /// Load every column within a square `radius` of `center`.
    ///
    /// Returns the number of columns generated.
    pub fn load_area(&self, center: ChunkPos, radius: i32) -> usize {
        let mut loaded = 0;
        for x in center.x - radius..=center.x + radius {
            for z in center.z - radius..=center.z + radius {
                if self.load_chunk(ChunkPos::new(x, z)) {
                    loaded += 1;
                }
            }
        }
        loaded
    }

    /// Drop a loaded column.
    pub fn unload_chunk(&self, pos: ChunkPos) -> Option<Chunk> {
        let removed = self.chunks.write().remove(&pos);
        if removed.is_some() {
            tracing::debug!("Unloaded chunk ({}, {}) in world {}", pos.x, pos.z, self.name);
        }
        removed
    }

    /// Execute a function with read access to a column.
    ///
    /// Returns `None` if the column isn't loaded.
    pub fn with_chunk<F, R>(&self, pos: ChunkPos, f: F) -> Option<R>
    where
        F: FnOnce(&Chunk) -> R,
    {
        self.chunks.read().get(&pos).map(f)
    }

    /// Block at `coords`.
    pub fn block_id(&self, coords: Coordinates3D) -> Result<BlockId> {
        let local = coords
            .local_pos()
            .ok_or_else(|| Error::OutOfBounds(format!("block {coords} is outside the world")))?;
        let pos = coords.chunk_pos();
        self.with_chunk(pos, |chunk| chunk.block_id(local))
            .ok_or(Error::ChunkNotLoaded(pos))
    }

    /// Replace the block at `coords`, loading its column if needed.
    pub fn set_block_id(&self, coords: Coordinates3D, id: BlockId) -> Result<()> {
        let local = coords
            .local_pos()
            .ok_or_else(|| Error::OutOfBounds(format!("block {coords} is outside the world")))?;
        let pos = coords.chunk_pos();
        self.load_chunk(pos);
        let mut chunks = self.chunks.write();
        let chunk = chunks.get_mut(&pos).ok_or(Error::ChunkNotLoaded(pos))?;
        chunk.set_block_id(local, id);
        Ok(())
    }

    /// Columns changed since they were loaded.
    pub fn modified_chunks(&self) -> Vec<ChunkPos> {
        self.chunks
            .read()
            .iter()
            .filter(|(_, chunk)| chunk.modified)
            .map(|(pos, _)| *pos)
            .collect()
    }
}

impl BlockSource for World {
    fn block_id(&self, coords: Coordinates3D) -> Result<BlockId> {
        Self::block_id(self, coords)
    }
}
