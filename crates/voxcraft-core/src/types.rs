//! Core block types.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for a block type.
///
/// Block ID 0 is reserved for air (empty space). The numbering follows the
/// classic protocol so IDs can be exchanged with clients unchanged.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BlockId(pub u8);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0x00);
    pub const STONE: Self = Self(0x01);
    pub const GRASS: Self = Self(0x02);
    pub const DIRT: Self = Self(0x03);
    pub const COBBLESTONE: Self = Self(0x04);
    pub const PLANKS: Self = Self(0x05);
    pub const BEDROCK: Self = Self(0x07);
    /// Flowing water
    pub const WATER: Self = Self(0x08);
    pub const STATIONARY_WATER: Self = Self(0x09);
    /// Flowing lava
    pub const LAVA: Self = Self(0x0A);
    pub const STATIONARY_LAVA: Self = Self(0x0B);
    pub const SAND: Self = Self(0x0C);
    pub const GRAVEL: Self = Self(0x0D);
    pub const LOG: Self = Self(0x11);
    pub const LEAVES: Self = Self(0x12);
    pub const GLASS: Self = Self(0x14);
    pub const ROSE: Self = Self(0x26);
    pub const LADDER: Self = Self(0x41);
    /// Thin layer of fallen snow
    pub const SNOWFALL: Self = Self(0x4E);
    pub const ICE: Self = Self(0x4F);
    /// Full snow block
    pub const SNOW: Self = Self(0x50);

    /// Returns true if this block is air (empty)
    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for BlockId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}
