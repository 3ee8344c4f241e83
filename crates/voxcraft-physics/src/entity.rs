//! The capability contract of simulated entities.

use std::sync::Arc;

use glam::DVec3;
use parking_lot::Mutex;
use voxcraft_core::math::{BoundingBox, Size};

/// Anything the physics engine can move.
///
/// The engine reads the physical constants once per tick, proposes a new
/// velocity, and commits the resolved position through [`end_update`].
/// Position is never written any other way during a tick.
///
/// [`end_update`]: PhysicsEntity::end_update
pub trait PhysicsEntity {
    /// Minimum corner of the entity's box.
    fn position(&self) -> DVec3;

    /// Velocity in blocks per second.
    fn velocity(&self) -> DVec3;

    fn set_velocity(&mut self, velocity: DVec3);

    /// Extents of the entity's box.
    fn size(&self) -> Size;

    /// Downward acceleration in blocks per second squared.
    fn acceleration_due_to_gravity(&self) -> f64;

    /// Fraction of velocity lost per second.
    fn drag(&self) -> f64;

    /// Maximum falling speed.
    fn terminal_velocity(&self) -> f64;

    /// The box spanning `position .. position + size`.
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_position_size(self.position(), self.size())
    }

    /// Called before the entity is advanced. Returning `false` skips it
    /// for this tick.
    fn begin_update(&mut self) -> bool {
        true
    }

    /// Commit the position resolved for this tick.
    fn end_update(&mut self, new_position: DVec3);

    /// The entity ran into terrain.
    ///
    /// Called once per blocked axis, in X, Y, Z order. `point` is the grid
    /// coordinate of the block that was hit and `direction` the unit vector
    /// of travel along the blocked axis.
    fn terrain_collision(&mut self, point: DVec3, direction: DVec3) {
        let _ = (point, direction);
    }
}

/// Handle through which the engine and game logic share an entity.
pub type SharedEntity = Arc<Mutex<dyn PhysicsEntity + Send>>;

/// Whether two handles refer to the same entity.
pub(crate) fn same_entity(a: &SharedEntity, b: &SharedEntity) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
