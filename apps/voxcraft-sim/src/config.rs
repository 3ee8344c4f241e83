//! Simulation settings file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use voxcraft_core::coords::Coordinates3D;
use voxcraft_core::types::BlockId;
use voxcraft_entity::{ItemStack, MobKind};
use voxcraft_world::FlatlandGenerator;

/// What to place in the world before the first tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpawnKind {
    Mob {
        kind: MobKind,
        /// Block positions to walk through, in order.
        #[serde(default)]
        path: Vec<Coordinates3D>,
        /// Walking speed in blocks per second; the mob default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<f64>,
    },
    /// A gravity-affected block placed at the position and released.
    FallingBlock { block: BlockId },
    Item { stack: ItemStack },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    #[serde(flatten)]
    pub entity: SpawnKind,
    pub position: DVec3,
    #[serde(default)]
    pub velocity: DVec3,
}

/// Settings read from the JSON config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_name: String,
    /// Flatland layer string, e.g. `"1;7,2x3,2"`.
    pub flatland_layers: String,
    /// Chunks loaded around the spawn chunk.
    pub load_radius: i32,
    /// Ticks per simulated second.
    pub tick_rate: u32,
    /// Ticks to run before exiting.
    pub ticks: u32,
    pub spawns: Vec<SpawnConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_name: "default".to_string(),
            flatland_layers: FlatlandGenerator::DEFAULT_LAYERS.to_string(),
            load_radius: 2,
            tick_rate: 20,
            ticks: 200,
            spawns: vec![
                SpawnConfig {
                    entity: SpawnKind::Mob {
                        kind: MobKind::Sheep,
                        path: Vec::new(),
                        speed: None,
                    },
                    position: DVec3::new(0.5, 10.0, 0.5),
                    velocity: DVec3::ZERO,
                },
                SpawnConfig {
                    entity: SpawnKind::Mob {
                        kind: MobKind::Zombie,
                        path: vec![
                            Coordinates3D::new(6, 4, 2),
                            Coordinates3D::new(6, 4, 8),
                        ],
                        speed: Some(2.5),
                    },
                    position: DVec3::new(2.2, 4.0, 2.2),
                    velocity: DVec3::ZERO,
                },
                SpawnConfig {
                    entity: SpawnKind::FallingBlock {
                        block: BlockId::SAND,
                    },
                    position: DVec3::new(4.0, 12.0, 4.0),
                    velocity: DVec3::ZERO,
                },
                SpawnConfig {
                    entity: SpawnKind::Item {
                        stack: ItemStack::new(i16::from(BlockId::COBBLESTONE.0), 1),
                    },
                    position: DVec3::new(-3.375, 6.0, 1.375),
                    velocity: DVec3::new(0.5, 0.0, 0.0),
                },
            ],
        }
    }
}

impl SimConfig {
    /// Read the config at `path`, or write the defaults there if the file
    /// does not exist yet.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing config {}", path.display()))
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tick_rate > 0, "tick_rate must be positive");
        ensure!(self.load_radius >= 0, "load_radius must not be negative");
        FlatlandGenerator::from_layer_string(&self.flatland_layers)
            .with_context(|| format!("flatland_layers {:?}", self.flatland_layers))?;
        Ok(())
    }

    /// Simulated time covered by one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}
