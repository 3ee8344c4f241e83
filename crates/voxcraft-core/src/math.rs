//! Geometry primitives: sizes, axis-aligned bounding boxes, and axes.
//!
//! Vectors are plain [`DVec3`] values; everything here is double precision
//! so that flush contacts land on exact block faces.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::coords::Coordinates3D;

/// Named unit vectors.
pub mod direction {
    use glam::DVec3;

    pub const UP: DVec3 = DVec3::new(0.0, 1.0, 0.0);
    pub const DOWN: DVec3 = DVec3::new(0.0, -1.0, 0.0);
    pub const LEFT: DVec3 = DVec3::new(-1.0, 0.0, 0.0);
    pub const RIGHT: DVec3 = DVec3::new(1.0, 0.0, 0.0);
    pub const BACKWARDS: DVec3 = DVec3::new(0.0, 0.0, -1.0);
    pub const FORWARDS: DVec3 = DVec3::new(0.0, 0.0, 1.0);
}

/// One of the three coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The order in which movement is resolved against terrain.
    pub const ORDER: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index (0, 1, 2)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The two remaining axes
    #[inline]
    pub const fn others(self) -> [Self; 2] {
        match self {
            Self::X => [Self::Y, Self::Z],
            Self::Y => [Self::X, Self::Z],
            Self::Z => [Self::X, Self::Y],
        }
    }

    /// Read this axis' component of `v`
    #[inline]
    pub const fn of(self, v: DVec3) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }

    /// Copy of `v` with this axis' component replaced
    #[inline]
    pub const fn with(self, v: DVec3, value: f64) -> DVec3 {
        match self {
            Self::X => DVec3::new(value, v.y, v.z),
            Self::Y => DVec3::new(v.x, value, v.z),
            Self::Z => DVec3::new(v.x, v.y, value),
        }
    }

    /// Vector of length `value` along this axis
    #[inline]
    pub const fn vector(self, value: f64) -> DVec3 {
        self.with(DVec3::ZERO, value)
    }

    /// Unit vector pointing along this axis in the direction of `sign`.
    #[inline]
    pub fn unit(self, sign: f64) -> DVec3 {
        self.vector(1.0_f64.copysign(sign))
    }
}

/// Extents of an entity's axis-aligned footprint.
///
/// All components are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Size {
    /// Create a new size. Negative or NaN extents are clamped to zero.
    #[inline]
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            depth: depth.max(0.0),
        }
    }

    /// A cube with the given edge length
    #[inline]
    pub fn cube(edge: f64) -> Self {
        Self::new(edge, edge, edge)
    }

    /// Extents as a vector (width, height, depth)
    #[inline]
    pub const fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.width, self.height, self.depth)
    }

    /// Volume of the box
    #[inline]
    pub fn volume(self) -> f64 {
        self.width * self.height * self.depth
    }
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl BoundingBox {
    /// Create a new box from min and max corners
    #[inline]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        debug_assert!(min.cmple(max).all(), "min {min} exceeds max {max}");
        Self { min, max }
    }

    /// The box occupied by something of `size` whose minimum corner is at
    /// `position`
    #[inline]
    pub fn from_position_size(position: DVec3, size: Size) -> Self {
        Self {
            min: position,
            max: position + size.to_dvec3(),
        }
    }

    /// Box filling the unit cell of a block
    #[inline]
    pub fn unit_cube(coords: Coordinates3D) -> Self {
        let min = coords.to_dvec3();
        Self {
            min,
            max: min + DVec3::ONE,
        }
    }

    /// Get the size of the box
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Get the center of the box
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Lower bound on `axis`
    #[inline]
    pub const fn min_on(&self, axis: Axis) -> f64 {
        axis.of(self.min)
    }

    /// Upper bound on `axis`
    #[inline]
    pub const fn max_on(&self, axis: Axis) -> f64 {
        axis.of(self.max)
    }

    /// Check if a point is inside the box (bounds inclusive)
    #[inline]
    pub fn contains_point(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check if this box intersects another.
    ///
    /// Bounds are inclusive: boxes whose faces touch count as intersecting.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Translate both corners by `delta`
    #[inline]
    #[must_use]
    pub fn offset(&self, delta: DVec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// The volume swept by this box while moving by `motion`
    #[inline]
    #[must_use]
    pub fn expanded_by_motion(&self, motion: DVec3) -> Self {
        Self {
            min: self.min.min(self.min + motion),
            max: self.max.max(self.max + motion),
        }
    }
}
