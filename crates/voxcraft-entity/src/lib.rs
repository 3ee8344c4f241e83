//! Entity kinds for the voxcraft engine.
//!
//! Each kind is a plain struct implementing
//! [`PhysicsEntity`](voxcraft_physics::PhysicsEntity); there is no shared
//! base type. Mob variants are distinguished by [`MobKind`].

pub mod falling_block;
pub mod item;
pub mod mob;

pub use falling_block::{FallingBlock, Settlement};
pub use item::{ItemDrop, ItemStack};
pub use mob::{Mob, MobKind, PathResult};
