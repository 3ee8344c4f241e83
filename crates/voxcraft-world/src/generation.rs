//! Chunk generators.
//!
//! Terrain shape is not the point of this engine, so only the two trivial
//! generators are provided: layered flatland and empty air.

use voxcraft_core::constants::CHUNK_HEIGHT;
use voxcraft_core::coords::{ChunkPos, Coordinates3D};
use voxcraft_core::types::BlockId;
use voxcraft_core::{Error, Result};

use crate::chunk::Chunk;

/// Produces chunk columns on demand.
pub trait ChunkGenerator: Send + Sync {
    /// Generate the column at `pos`.
    fn generate_chunk(&self, pos: ChunkPos) -> Chunk;

    /// Where new players and entities appear.
    fn spawn_point(&self) -> Coordinates3D;
}

/// One run of identical layers in a flatland world, counted from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatlandLayer {
    /// Block filling the layers.
    pub block: BlockId,
    /// Number of layers.
    pub height: u8,
}

/// Generator producing identical stacked layers everywhere.
#[derive(Debug, Clone)]
pub struct FlatlandGenerator {
    layers: Vec<FlatlandLayer>,
}

impl FlatlandGenerator {
    /// Bedrock, two dirt, then grass: the surface sits at Y = 4.
    pub const DEFAULT_LAYERS: &'static str = "1;7,2x3,2";

    /// Create a generator from explicit layers.
    pub fn new(layers: Vec<FlatlandLayer>) -> Result<Self> {
        let total: usize = layers.iter().map(|l| l.height as usize).sum();
        if total > CHUNK_HEIGHT {
            return Err(Error::OutOfBounds(format!(
                "flatland layers are {total} blocks high, world height is {CHUNK_HEIGHT}"
            )));
        }
        Ok(Self { layers })
    }

    /// Parse a layer string such as `"1;7,2x3,2"`.
    ///
    /// The part before `;` is the format version (must be `1`); each
    /// comma-separated entry after it is either `ID` or `COUNTxID`.
    pub fn from_layer_string(layers: &str) -> Result<Self> {
        let (version, body) = layers
            .split_once(';')
            .ok_or_else(|| Error::InvalidData(format!("missing version in layers {layers:?}")))?;
        if version.trim() != "1" {
            return Err(Error::InvalidData(format!(
                "unsupported flatland version {version:?}"
            )));
        }

        let parsed = body
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_layer)
            .collect::<Result<Vec<_>>>()?;
        Self::new(parsed)
    }

    /// Get the configured layers, bottom first.
    pub fn layers(&self) -> &[FlatlandLayer] {
        &self.layers
    }

    /// Y of the first air layer.
    pub fn surface_height(&self) -> i32 {
        self.layers.iter().map(|l| i32::from(l.height)).sum()
    }
}

impl Default for FlatlandGenerator {
    fn default() -> Self {
        Self {
            layers: vec![
                FlatlandLayer {
                    block: BlockId::BEDROCK,
                    height: 1,
                },
                FlatlandLayer {
                    block: BlockId::DIRT,
                    height: 2,
                },
                FlatlandLayer {
                    block: BlockId::GRASS,
                    height: 1,
                },
            ],
        }
    }
}

impl ChunkGenerator for FlatlandGenerator {
    fn generate_chunk(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new(pos);
        let mut y = 0u8;
        for layer in &self.layers {
            for _ in 0..layer.height {
                chunk.fill_layer(y, layer.block);
                y += 1;
            }
        }
        chunk
    }

    fn spawn_point(&self) -> Coordinates3D {
        Coordinates3D::new(0, self.surface_height(), 0)
    }
}

/// Generator producing nothing but air.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate_chunk(&self, pos: ChunkPos) -> Chunk {
        Chunk::new(pos)
    }

    fn spawn_point(&self) -> Coordinates3D {
        Coordinates3D::ZERO
    }
}

fn parse_layer(entry: &str) -> Result<FlatlandLayer> {
    let invalid = || Error::InvalidData(format!("invalid flatland layer {entry:?}"));
    let (height, block) = match entry.split_once('x') {
        Some((count, id)) => (count.trim().parse::<u8>().map_err(|_| invalid())?, id.trim()),
        None => (1, entry),
    };
    let block = block.parse::<u8>().map_err(|_| invalid())?;
    Ok(FlatlandLayer {
        block: BlockId(block),
        height,
    })
}
