//! Swept AABB resolution against the block grid.
//!
//! Motion is resolved one axis at a time in [`Axis::ORDER`]. Each axis
//! sweeps the entity box (already moved along the earlier axes) through the
//! blocks it would cross and stops it flush against the nearest face.
//!
//! A block only blocks an axis if the entity overlaps it on both remaining
//! axes. Boxes that merely share a face on a side axis are ignored, except
//! when the entity is also trying to move into that face this tick. That
//! keeps an entity sliding past a wall it rests against, while a diagonal
//! move into an edge is stopped on both axes.

use glam::DVec3;
use voxcraft_core::coords::Coordinates3D;
use voxcraft_core::math::{Axis, BoundingBox};
use voxcraft_core::traits::{BlockPhysicsProvider, BlockSource};

/// Distance under which two faces are treated as touching.
pub const CONTACT_EPSILON: f64 = 1e-9;

/// One blocked axis of a resolved move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainContact {
    pub axis: Axis,
    /// Grid coordinates of the block that stopped the entity.
    pub block: Coordinates3D,
    /// Unit vector of the attempted travel along `axis`.
    pub direction: DVec3,
}

impl TerrainContact {
    /// The block coordinates as a point.
    pub fn point(&self) -> DVec3 {
        self.block.to_dvec3()
    }
}

/// Outcome of resolving a move against terrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Displacement the entity may actually make.
    pub motion: DVec3,
    /// Blocked axes in resolution order.
    pub contacts: Vec<TerrainContact>,
}

impl Resolution {
    /// Whether movement along `axis` was cut short.
    pub fn collided_on(&self, axis: Axis) -> bool {
        self.contacts.iter().any(|contact| contact.axis == axis)
    }
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    allowed: f64,
    block: Coordinates3D,
}

/// Resolves entity boxes against the solid blocks of a world.
pub struct VoxelCollider<'a, W: ?Sized, P: ?Sized> {
    world: &'a W,
    blocks: &'a P,
}

impl<'a, W, P> VoxelCollider<'a, W, P>
where
    W: BlockSource + ?Sized,
    P: BlockPhysicsProvider + ?Sized,
{
    pub const fn new(world: &'a W, blocks: &'a P) -> Self {
        Self { world, blocks }
    }

    /// World-space collision box of the block at `coords`.
    ///
    /// Unreadable positions (unloaded columns, outside the world height)
    /// have no box.
    pub fn block_box(&self, coords: Coordinates3D) -> Option<BoundingBox> {
        match self.world.block_id(coords) {
            Ok(id) => self
                .blocks
                .bounding_box(id)
                .map(|bounds| bounds.offset(coords.to_dvec3())),
            Err(err) => {
                tracing::trace!("Block {} is not solid to physics: {}", coords, err);
                None
            }
        }
    }

    /// Solid blocks whose boxes touch `region`, in Y, Z, X order.
    ///
    /// The search starts one cell below the region's minimum so blocks with
    /// boxes taller than a cell are not missed.
    pub fn boxes_in(&self, region: &BoundingBox) -> Vec<(Coordinates3D, BoundingBox)> {
        let lo = Coordinates3D::containing(region.min) - Coordinates3D::ONE;
        let hi = Coordinates3D::containing(region.max);
        let mut found = Vec::new();
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                for x in lo.x..=hi.x {
                    let coords = Coordinates3D::new(x, y, z);
                    if let Some(bounds) = self.block_box(coords) {
                        if region.intersects(&bounds) {
                            found.push((coords, bounds));
                        }
                    }
                }
            }
        }
        found
    }

    /// Clip `motion` of a box starting at `bounds` against terrain.
    pub fn resolve(&self, bounds: &BoundingBox, motion: DVec3) -> Resolution {
        let moving_axes = Axis::ORDER
            .iter()
            .filter(|axis| axis.of(motion) != 0.0)
            .count();
        // Face contact on a side axis only matters when that axis moves too
        let reach = if moving_axes > 1 {
            self.reach(bounds, motion)
        } else {
            DVec3::ZERO
        };

        let mut resolution = Resolution::default();
        for axis in Axis::ORDER {
            let delta = axis.of(motion);
            if delta == 0.0 {
                continue;
            }
            let current = bounds.offset(resolution.motion);
            let allowed = match self.sweep(&current, axis, delta, Some(reach)) {
                Some(hit) => {
                    resolution.contacts.push(TerrainContact {
                        axis,
                        block: hit.block,
                        direction: axis.unit(delta),
                    });
                    hit.allowed
                }
                None => delta,
            };
            resolution.motion = axis.with(resolution.motion, allowed);
        }
        resolution
    }

    /// How far the box could move along each axis on its own.
    fn reach(&self, bounds: &BoundingBox, motion: DVec3) -> DVec3 {
        let mut reach = DVec3::ZERO;
        for axis in Axis::ORDER {
            let delta = axis.of(motion);
            if delta != 0.0 {
                let allowed = self
                    .sweep(bounds, axis, delta, None)
                    .map_or(delta, |hit| hit.allowed);
                reach = axis.with(reach, allowed);
            }
        }
        reach
    }

    /// Nearest block stopping a move of `delta` along `axis`.
    fn sweep(
        &self,
        bounds: &BoundingBox,
        axis: Axis,
        delta: f64,
        reach: Option<DVec3>,
    ) -> Option<Hit> {
        let swept = bounds.expanded_by_motion(axis.vector(delta));
        let mut nearest: Option<Hit> = None;
        for (coords, block) in self.boxes_in(&swept) {
            let [a, b] = axis.others();
            if !side_contact(bounds, &block, a, reach) || !side_contact(bounds, &block, b, reach) {
                continue;
            }

            let allowed = if delta > 0.0 {
                let gap = block.min_on(axis) - bounds.max_on(axis);
                if gap < -CONTACT_EPSILON || gap > delta {
                    continue;
                }
                gap.clamp(0.0, delta)
            } else {
                let gap = block.max_on(axis) - bounds.min_on(axis);
                if gap > CONTACT_EPSILON || gap < delta {
                    continue;
                }
                gap.clamp(delta, 0.0)
            };

            if nearest.map_or(true, |hit| allowed.abs() < hit.allowed.abs()) {
                nearest = Some(Hit {
                    allowed,
                    block: coords,
                });
            }
        }
        nearest
    }
}

/// Whether `bounds` and `block` overlap on `side` closely enough to collide.
fn side_contact(
    bounds: &BoundingBox,
    block: &BoundingBox,
    side: Axis,
    reach: Option<DVec3>,
) -> bool {
    let (lo, hi) = (bounds.min_on(side), bounds.max_on(side));
    let (block_lo, block_hi) = (block.min_on(side), block.max_on(side));
    if lo < block_hi - CONTACT_EPSILON && hi > block_lo + CONTACT_EPSILON {
        return true;
    }
    let Some(reach) = reach else {
        return false;
    };
    let moving = side.of(reach);
    (moving > 0.0 && (block_lo - hi).abs() <= CONTACT_EPSILON)
        || (moving < 0.0 && (lo - block_hi).abs() <= CONTACT_EPSILON)
}
