//! Entity physics for the voxcraft engine.
//!
//! Entities are axis-aligned boxes advanced by gravity, drag and their own
//! velocity, then swept through the block grid one axis at a time (X, then
//! Y, then Z) so they stop flush against the faces they run into.

pub mod collision;
pub mod engine;
pub mod entity;

pub use collision::{Resolution, TerrainContact, VoxelCollider, CONTACT_EPSILON};
pub use engine::PhysicsEngine;
pub use entity::{PhysicsEntity, SharedEntity};
