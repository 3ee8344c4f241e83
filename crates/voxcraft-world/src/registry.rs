//! Block type registry.
//!
//! Block types are registered from an explicit table at startup. The
//! registry answers the physics engine's shape queries and the placement
//! logic's "may this cell be replaced" queries.

use glam::DVec3;
use voxcraft_core::math::BoundingBox;
use voxcraft_core::traits::BlockPhysicsProvider;
use voxcraft_core::types::BlockId;
use voxcraft_core::{Error, Result};

/// Collision box of a full block.
const FULL_BLOCK: BoundingBox = BoundingBox {
    min: DVec3::ZERO,
    max: DVec3::ONE,
};

/// Static properties of one block type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDefinition {
    pub id: BlockId,
    /// Name shown to players.
    pub name: &'static str,
    /// Whether the block hides the faces behind it and blocks light.
    pub opaque: bool,
    /// Collision box relative to the block origin; `None` lets entities pass.
    pub collision: Option<BoundingBox>,
    /// Mining hardness; -1 means unbreakable.
    pub hardness: f64,
    /// Whether the block drops when unsupported (sand, gravel).
    pub falls: bool,
    /// Whether placing a block may replace this one.
    pub overwritable: bool,
}

impl BlockDefinition {
    /// An opaque, full-cube, colliding block.
    pub const fn solid(id: BlockId, name: &'static str, hardness: f64) -> Self {
        Self {
            id,
            name,
            opaque: true,
            collision: Some(FULL_BLOCK),
            hardness,
            falls: false,
            overwritable: false,
        }
    }

    /// A see-through block entities walk through.
    pub const fn passable(id: BlockId, name: &'static str, hardness: f64) -> Self {
        Self {
            id,
            name,
            opaque: false,
            collision: None,
            hardness,
            falls: false,
            overwritable: false,
        }
    }

    /// Mark as see-through.
    #[must_use]
    pub const fn translucent(mut self) -> Self {
        self.opaque = false;
        self
    }

    /// Mark as affected by gravity.
    #[must_use]
    pub const fn falling(mut self) -> Self {
        self.falls = true;
        self
    }

    /// Mark as replaceable by placement.
    #[must_use]
    pub const fn overwritable(mut self) -> Self {
        self.overwritable = true;
        self
    }
}

/// Every block type the engine knows about out of the box.
pub const STANDARD_BLOCKS: &[BlockDefinition] = &[
    BlockDefinition::passable(BlockId::AIR, "Air", 0.0).overwritable(),
    BlockDefinition::solid(BlockId::STONE, "Stone", 1.5),
    BlockDefinition::solid(BlockId::GRASS, "Grass", 0.6),
    BlockDefinition::solid(BlockId::DIRT, "Dirt", 0.5),
    BlockDefinition::solid(BlockId::COBBLESTONE, "Cobblestone", 2.0),
    BlockDefinition::solid(BlockId::PLANKS, "Wooden Planks", 2.0),
    BlockDefinition::solid(BlockId::BEDROCK, "Bedrock", -1.0),
    BlockDefinition::passable(BlockId::WATER, "Water", 100.0).overwritable(),
    BlockDefinition::passable(BlockId::STATIONARY_WATER, "Water", 100.0).overwritable(),
    BlockDefinition::passable(BlockId::LAVA, "Lava", 0.0).overwritable(),
    BlockDefinition::passable(BlockId::STATIONARY_LAVA, "Lava", 100.0).overwritable(),
    BlockDefinition::solid(BlockId::SAND, "Sand", 0.5).falling(),
    BlockDefinition::solid(BlockId::GRAVEL, "Gravel", 0.6).falling(),
    BlockDefinition::solid(BlockId::LOG, "Wood", 2.0),
    BlockDefinition::solid(BlockId::LEAVES, "Leaves", 0.2).translucent(),
    BlockDefinition::solid(BlockId::GLASS, "Glass", 0.3).translucent(),
    BlockDefinition::passable(BlockId::ROSE, "Rose", 0.0),
    BlockDefinition::passable(BlockId::LADDER, "Ladder", 0.4),
    BlockDefinition::passable(BlockId::SNOWFALL, "Snow", 0.6).overwritable(),
    BlockDefinition::solid(BlockId::ICE, "Ice", 0.5).translucent(),
    BlockDefinition::solid(BlockId::SNOW, "Snow Block", 0.2),
];

/// Lookup table of block definitions indexed by ID.
pub struct BlockRegistry {
    definitions: Vec<Option<BlockDefinition>>,
}

impl BlockRegistry {
    /// Registry holding [`STANDARD_BLOCKS`].
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for def in STANDARD_BLOCKS {
            registry.definitions[def.id.0 as usize] = Some(def.clone());
        }
        registry
    }

    /// Start an explicit registration list.
    pub fn builder() -> BlockRegistryBuilder {
        BlockRegistryBuilder::default()
    }

    fn empty() -> Self {
        Self {
            definitions: vec![None; usize::from(u8::MAX) + 1],
        }
    }

    /// Definition of block type `id`, if registered.
    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockDefinition> {
        self.definitions[id.0 as usize].as_ref()
    }

    /// Whether placement may replace a block of type `id`.
    pub fn is_overwritable(&self, id: BlockId) -> bool {
        self.get(id).is_some_and(|def| def.overwritable)
    }

    /// Whether a block of type `id` falls when nothing holds it up.
    pub fn falls(&self, id: BlockId) -> bool {
        self.get(id).is_some_and(|def| def.falls)
    }

    /// Number of registered block types.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if no block types are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate registered definitions in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.definitions.iter().flatten()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl BlockPhysicsProvider for BlockRegistry {
    fn bounding_box(&self, id: BlockId) -> Option<BoundingBox> {
        self.get(id).and_then(|def| def.collision)
    }
}

/// Collects block definitions and checks them for conflicts.
#[derive(Default)]
pub struct BlockRegistryBuilder {
    pending: Vec<BlockDefinition>,
}

impl BlockRegistryBuilder {
    /// Add one definition.
    #[must_use]
    pub fn register(mut self, definition: BlockDefinition) -> Self {
        self.pending.push(definition);
        self
    }

    /// Add every entry of [`STANDARD_BLOCKS`].
    #[must_use]
    pub fn with_standard_blocks(mut self) -> Self {
        self.pending.extend_from_slice(STANDARD_BLOCKS);
        self
    }

    /// Build the registry. Two definitions sharing an ID is an error.
    pub fn build(self) -> Result<BlockRegistry> {
        let mut registry = BlockRegistry::empty();
        for def in self.pending {
            let slot = &mut registry.definitions[def.id.0 as usize];
            if let Some(existing) = slot {
                return Err(Error::InvalidData(format!(
                    "block ID {:#04x} registered twice ({} and {})",
                    def.id.0, existing.name, def.name
                )));
            }
            *slot = Some(def);
        }
        tracing::debug!("Registered {} block types", registry.len());
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_no_duplicate_ids() {
        let built = BlockRegistry::builder().with_standard_blocks().build().unwrap();
        assert_eq!(built.len(), STANDARD_BLOCKS.len());
        assert_eq!(BlockRegistry::standard().len(), STANDARD_BLOCKS.len());
    }

    #[test]
    fn duplicate_registration_fails() {
        let result = BlockRegistry::builder()
            .register(BlockDefinition::solid(BlockId::STONE, "Stone", 1.5))
            .register(BlockDefinition::solid(BlockId::STONE, "Other Stone", 3.0))
            .build();
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn solid_blocks_have_full_collision_box() {
        let registry = BlockRegistry::standard();
        for id in [BlockId::STONE, BlockId::GRASS, BlockId::BEDROCK, BlockId::SAND] {
            assert_eq!(registry.bounding_box(id), Some(FULL_BLOCK));
            assert!(registry.is_solid(id));
        }
    }

    #[test]
    fn passable_blocks_have_no_collision_box() {
        let registry = BlockRegistry::standard();
        for id in [
            BlockId::AIR,
            BlockId::WATER,
            BlockId::STATIONARY_LAVA,
            BlockId::LADDER,
            BlockId::SNOWFALL,
        ] {
            assert!(registry.bounding_box(id).is_none(), "{id:?} should not collide");
        }
    }

    #[test]
    fn unknown_ids_do_not_collide() {
        let registry = BlockRegistry::standard();
        assert!(registry.get(BlockId(0xFF)).is_none());
        assert!(!registry.is_solid(BlockId(0xFF)));
        assert!(!registry.is_overwritable(BlockId(0xFF)));
    }

    #[test]
    fn overwritable_and_falling_flags() {
        let registry = BlockRegistry::standard();
        assert!(registry.is_overwritable(BlockId::AIR));
        assert!(registry.is_overwritable(BlockId::WATER));
        assert!(registry.is_overwritable(BlockId::SNOWFALL));
        assert!(!registry.is_overwritable(BlockId::STONE));
        assert!(registry.falls(BlockId::SAND));
        assert!(registry.falls(BlockId::GRAVEL));
        assert!(!registry.falls(BlockId::DIRT));
    }

    #[test]
    fn leaves_collide_but_are_not_opaque() {
        let registry = BlockRegistry::standard();
        let leaves = registry.get(BlockId::LEAVES).unwrap();
        assert!(!leaves.opaque);
        assert!(leaves.collision.is_some());
    }
}
