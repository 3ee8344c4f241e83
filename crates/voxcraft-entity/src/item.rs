//! Items lying in the world.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use voxcraft_core::coords::Coordinates3D;
use voxcraft_core::math::Size;
use voxcraft_physics::PhysicsEntity;

/// A quantity of one item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: i16,
    pub count: i8,
    #[serde(default)]
    pub metadata: i16,
}

impl ItemStack {
    pub const fn new(id: i16, count: i8) -> Self {
        Self {
            id,
            count,
            metadata: 0,
        }
    }

    /// Stacks with no items are never dropped.
    pub const fn is_empty(&self) -> bool {
        self.id < 0 || self.count <= 0
    }
}

/// A dropped item stack.
#[derive(Debug, Clone)]
pub struct ItemDrop {
    stack: ItemStack,
    position: DVec3,
    velocity: DVec3,
    on_ground: bool,
}

impl ItemDrop {
    pub const GRAVITY: f64 = 0.08;
    pub const DRAG: f64 = 0.98;
    pub const TERMINAL_VELOCITY: f64 = 39.2;
    pub const EDGE: f64 = 0.25;

    pub const fn new(stack: ItemStack, position: DVec3) -> Self {
        Self {
            stack,
            position,
            velocity: DVec3::ZERO,
            on_ground: false,
        }
    }

    /// Drop `stack` centred in the cell at `coords`, half a block up.
    pub fn at_block(stack: ItemStack, coords: Coordinates3D) -> Self {
        let offset = (1.0 - Self::EDGE) / 2.0;
        Self::new(stack, coords.to_dvec3() + DVec3::new(offset, 0.5, offset))
    }

    pub const fn stack(&self) -> ItemStack {
        self.stack
    }

    /// Whether the last physics tick ended on top of terrain.
    pub const fn on_ground(&self) -> bool {
        self.on_ground
    }
}

impl PhysicsEntity for ItemDrop {
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
        self.on_ground = false;
        true
    }

    fn end_update(&mut self, new_position: DVec3) {
        self.position = new_position;
    }

    fn terrain_collision(&mut self, _point: DVec3, direction: DVec3) {
        if direction.y < 0.0 {
            self.on_ground = true;
        }
    }
}
