//! Chunked block world, chunk generators and the block registry.

pub mod chunk;
pub mod generation;
pub mod registry;
pub mod world;

pub use chunk::Chunk;
pub use generation::{ChunkGenerator, EmptyGenerator, FlatlandGenerator, FlatlandLayer};
pub use registry::{BlockDefinition, BlockRegistry, BlockRegistryBuilder};
pub use world::World;
