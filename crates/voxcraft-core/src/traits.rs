//! Narrow read interfaces through which simulation code sees the world.
//!
//! The physics engine only ever needs to know which block sits at a grid
//! coordinate and what shape that block has for collision purposes. Both
//! questions are answered by collaborators handed to it at construction.

use crate::coords::Coordinates3D;
use crate::error::Result;
use crate::math::BoundingBox;
use crate::types::BlockId;

/// Read access to the block grid.
pub trait BlockSource {
    /// Block at `coords`.
    ///
    /// Fails for coordinates outside the world or in chunks that are not
    /// loaded. Implementations must not panic for any input.
    fn block_id(&self, coords: Coordinates3D) -> Result<BlockId>;
}

/// Collision geometry of block types.
pub trait BlockPhysicsProvider {
    /// Collision box of a block of type `id`, relative to the block's own
    /// origin, or `None` if entities pass through it.
    fn bounding_box(&self, id: BlockId) -> Option<BoundingBox>;

    /// Whether blocks of type `id` stop moving entities
    fn is_solid(&self, id: BlockId) -> bool {
        self.bounding_box(id).is_some()
    }
}
