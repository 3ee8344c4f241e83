//! Fixed-step integration of registered entities.

use std::sync::Arc;
use std::time::Duration;

use glam::DVec3;
use voxcraft_core::traits::{BlockPhysicsProvider, BlockSource};

use crate::collision::VoxelCollider;
use crate::entity::{same_entity, PhysicsEntity, SharedEntity};

/// Moves entities through a world under gravity and drag.
///
/// The engine holds shared handles to the world and the block shape
/// provider so several engines (or the game logic) can read the same world.
/// Entities are updated in the order they were added.
pub struct PhysicsEngine<W: ?Sized, P: ?Sized> {
    world: Arc<W>,
    block_physics: Arc<P>,
    entities: Vec<SharedEntity>,
}

impl<W, P> PhysicsEngine<W, P>
where
    W: BlockSource + ?Sized,
    P: BlockPhysicsProvider + ?Sized,
{
    /// Create an engine with no entities.
    pub fn new(world: Arc<W>, block_physics: Arc<P>) -> Self {
        Self {
            world,
            block_physics,
            entities: Vec::new(),
        }
    }

    /// The world entities collide with.
    pub const fn world(&self) -> &Arc<W> {
        &self.world
    }

    /// Block shape provider.
    pub const fn block_physics(&self) -> &Arc<P> {
        &self.block_physics
    }

    /// Register an entity for simulation.
    ///
    /// Returns `false` if this handle was already registered.
    pub fn add_entity(&mut self, entity: SharedEntity) -> bool {
        if self.contains(&entity) {
            tracing::debug!("Entity already registered with physics engine");
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Stop simulating an entity.
    ///
    /// Returns `false` if it was not registered.
    pub fn remove_entity(&mut self, entity: &SharedEntity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| !same_entity(e, entity));
        self.entities.len() != before
    }

    /// Check if an entity is registered.
    pub fn contains(&self, entity: &SharedEntity) -> bool {
        self.entities.iter().any(|e| same_entity(e, entity))
    }

    /// Get the number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if no entities are registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advance every registered entity by `time`.
    ///
    /// A zero duration leaves all entities untouched. Each entity is locked
    /// only while it is being advanced.
    pub fn update(&mut self, time: Duration) {
        let seconds = time.as_secs_f64();
        if seconds == 0.0 {
            return;
        }
        let _span =
            tracing::trace_span!("physics_update", entities = self.entities.len(), seconds)
                .entered();

        let collider = VoxelCollider::new(self.world.as_ref(), self.block_physics.as_ref());
        for entity in &self.entities {
            let mut entity = entity.lock();
            if !entity.begin_update() {
                continue;
            }
            advance(&collider, &mut *entity, seconds);
        }
    }
}

fn advance<W, P>(
    collider: &VoxelCollider<'_, W, P>,
    entity: &mut (dyn PhysicsEntity + Send),
    seconds: f64,
) where
    W: BlockSource + ?Sized,
    P: BlockPhysicsProvider + ?Sized,
{
    let mut velocity = entity.velocity();
    velocity.y -= entity.acceleration_due_to_gravity() * seconds;
    let terminal = entity.terminal_velocity().abs();
    if velocity.y < -terminal {
        velocity.y = -terminal;
    }
    velocity *= (1.0 - entity.drag() * seconds).max(0.0);

    if !velocity.is_finite() {
        tracing::warn!("Discarding non-finite entity velocity {}", velocity);
        velocity = DVec3::ZERO;
    }

    let position = entity.position();
    let resolution = collider.resolve(&entity.bounding_box(), velocity * seconds);
    for contact in &resolution.contacts {
        velocity = contact.axis.with(velocity, 0.0);
    }
    entity.set_velocity(velocity);

    for contact in &resolution.contacts {
        tracing::trace!(
            "Entity hit block {} moving {}",
            contact.block,
            contact.direction
        );
        entity.terrain_collision(contact.point(), contact.direction);
    }
    entity.end_update(position + resolution.motion);
}
