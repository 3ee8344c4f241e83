//! Sand and gravel dropping through the air.

use glam::DVec3;
use voxcraft_core::coords::Coordinates3D;
use voxcraft_core::math::Size;
use voxcraft_core::traits::BlockPhysicsProvider;
use voxcraft_core::types::BlockId;
use voxcraft_core::Result;
use voxcraft_physics::PhysicsEntity;
use voxcraft_world::{BlockRegistry, World};

use crate::item::{ItemDrop, ItemStack};

/// What became of a falling block after [`FallingBlock::settle`].
#[derive(Debug, Clone)]
pub enum Settlement {
    /// Not landed yet.
    Falling,
    /// Written back into the world at this cell.
    Placed(Coordinates3D),
    /// The landing cell could not be replaced; the block broke into an item.
    Dropped(ItemDrop),
}

/// A block that lost its support and is falling as an entity.
///
/// Once it lands the engine stops moving it; [`FallingBlock::settle`] turns
/// it back into a block or, failing that, an item.
#[derive(Debug, Clone)]
pub struct FallingBlock {
    block: BlockId,
    position: DVec3,
    velocity: DVec3,
    landed: Option<Coordinates3D>,
}

impl FallingBlock {
    pub const GRAVITY: f64 = 0.8;
    pub const DRAG: f64 = 0.40;
    pub const TERMINAL_VELOCITY: f64 = 39.2;
    /// Edge length of the entity box, slightly narrower than the cell.
    pub const EDGE: f64 = 0.98;
    /// Horizontal offset of the box from the cell corner.
    pub const INSET: f64 = 0.01;

    /// A falling `block` filling the cell at `coords`.
    pub fn new(block: BlockId, coords: Coordinates3D) -> Self {
        Self {
            block,
            position: coords.to_dvec3() + DVec3::new(Self::INSET, 0.0, Self::INSET),
            velocity: DVec3::ZERO,
            landed: None,
        }
    }

    /// Turn the block at `coords` into a falling entity if it is subject to
    /// gravity and the block below does not hold it up.
    ///
    /// The cell is cleared to air when the entity is created.
    pub fn detach(
        world: &World,
        registry: &BlockRegistry,
        coords: Coordinates3D,
    ) -> Result<Option<Self>> {
        let block = world.block_id(coords)?;
        if !registry.falls(block) {
            return Ok(None);
        }
        let below = coords + Coordinates3D::DOWN;
        if !World::is_valid_position(below) || registry.is_solid(world.block_id(below)?) {
            return Ok(None);
        }

        world.set_block_id(coords, BlockId::AIR)?;
        tracing::debug!("Block {:?} at {} started falling", block, coords);
        Ok(Some(Self::new(block, coords)))
    }

    /// The block type being carried.
    pub const fn block(&self) -> BlockId {
        self.block
    }

    /// Cell the block came to rest in, once it has landed.
    pub const fn landed(&self) -> Option<Coordinates3D> {
        self.landed
    }

    /// Place the block into its landing cell.
    ///
    /// A cell holding something placement may not replace is left as it is
    /// and the block drops as an item there instead.
    pub fn settle(&self, world: &World, registry: &BlockRegistry) -> Result<Settlement> {
        let Some(cell) = self.landed else {
            return Ok(Settlement::Falling);
        };
        let occupant = world.block_id(cell)?;
        if registry.is_overwritable(occupant) {
            world.set_block_id(cell, self.block)?;
            return Ok(Settlement::Placed(cell));
        }

        tracing::debug!(
            "Falling {:?} broke at {}: occupied by {:?}",
            self.block,
            cell,
            occupant
        );
        let stack = ItemStack::new(i16::from(self.block.0), 1);
        Ok(Settlement::Dropped(ItemDrop::at_block(stack, cell)))
    }
}

impl PhysicsEntity for FallingBlock {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn velocity(&self) -> DVec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: DVec3) {
        self.velocity = velocity;
    }

    fn size(&self) -> Size {
        Size::cube(Self::EDGE)
    }

    fn acceleration_due_to_gravity(&self) -> f64 {
        Self::GRAVITY
    }

    fn drag(&self) -> f64 {
        Self::DRAG
    }

    fn terminal_velocity(&self) -> f64 {
        Self::TERMINAL_VELOCITY
    }

    fn begin_update(&mut self) -> bool {
        self.landed.is_none()
    }

    fn end_update(&mut self, new_position: DVec3) {
        self.position = new_position;
    }

    fn terrain_collision(&mut self, point: DVec3, direction: DVec3) {
        if direction.y < 0.0 && self.landed.is_none() {
            self.landed = Some(Coordinates3D::containing(point) + Coordinates3D::UP);
        }
    }
}
