//! Fixed-step world simulation driven by a [`SimConfig`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use parking_lot::Mutex;
use tracing::{debug, info};
use voxcraft_core::coords::Coordinates3D;
use voxcraft_entity::{FallingBlock, ItemDrop, Mob, PathResult, Settlement};
use voxcraft_physics::{PhysicsEngine, PhysicsEntity, SharedEntity};
use voxcraft_world::{BlockRegistry, FlatlandGenerator, World};

use crate::config::{SimConfig, SpawnConfig, SpawnKind};

/// A flatland world with its entities and physics engine.
pub struct Simulation {
    world: Arc<World>,
    registry: Arc<BlockRegistry>,
    physics: PhysicsEngine<World, BlockRegistry>,
    mobs: Vec<Arc<Mutex<Mob>>>,
    falling: Vec<Arc<Mutex<FallingBlock>>>,
    items: Vec<Arc<Mutex<ItemDrop>>>,
    tick: Duration,
    ticks_run: u64,
}

impl Simulation {
    /// Build the world, load the area around spawn and place the configured
    /// entities.
    pub fn new(config: &SimConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let generator = FlatlandGenerator::from_layer_string(&config.flatland_layers)?;
        let world = Arc::new(World::new(config.world_name.clone(), generator));
        let loaded = world.load_area(world.spawn_point().chunk_pos(), config.load_radius);
        info!(
            "World '{}' ready: {} chunks around spawn {}",
            world.name(),
            loaded,
            world.spawn_point()
        );

        let registry = Arc::new(BlockRegistry::standard());
        let physics = PhysicsEngine::new(world.clone(), registry.clone());
        let mut sim = Self {
            world,
            registry,
            physics,
            mobs: Vec::new(),
            falling: Vec::new(),
            items: Vec::new(),
            tick: config.tick_duration(),
            ticks_run: 0,
        };
        for spawn in &config.spawns {
            sim.spawn(spawn)
                .with_context(|| format!("spawning {:?}", spawn.entity))?;
        }
        Ok(sim)
    }

    pub const fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    /// Number of entities the physics engine is moving.
    pub fn active_entities(&self) -> usize {
        self.physics.len()
    }

    fn spawn(&mut self, spawn: &SpawnConfig) -> anyhow::Result<()> {
        match &spawn.entity {
            SpawnKind::Mob { kind, path, speed } => {
                let mut mob = Mob::new(*kind, spawn.position);
                mob.set_velocity(spawn.velocity);
                if let Some(speed) = speed {
                    mob.set_speed(*speed);
                }
                if !path.is_empty() {
                    mob.set_path(PathResult::new(path.clone()));
                }
                let mob = Arc::new(Mutex::new(mob));
                self.physics.add_entity(mob.clone());
                self.mobs.push(mob);
            }
            SpawnKind::FallingBlock { block } => {
                let coords = Coordinates3D::containing(spawn.position);
                self.world.set_block_id(coords, *block)?;
                match FallingBlock::detach(&self.world, &self.registry, coords)? {
                    Some(mut falling) => {
                        falling.set_velocity(spawn.velocity);
                        let falling = Arc::new(Mutex::new(falling));
                        self.physics.add_entity(falling.clone());
                        self.falling.push(falling);
                    }
                    None => debug!("Block {:?} at {} stays in place", block, coords),
                }
            }
            SpawnKind::Item { stack } => {
                if stack.is_empty() {
                    debug!("Skipping empty item stack at {}", spawn.position);
                    return Ok(());
                }
                let mut item = ItemDrop::new(*stack, spawn.position);
                item.set_velocity(spawn.velocity);
                self.add_item(item);
            }
        }
        Ok(())
    }

    /// Run one tick: steer mobs, move everything, then settle landed blocks.
    pub fn step(&mut self) -> anyhow::Result<()> {
        for mob in &self.mobs {
            let mut mob = mob.lock();
            if mob.advance_path(self.tick) {
                info!("{:?} finished its path at {}", mob.kind(), mob.position());
            }
        }

        self.physics.update(self.tick);
        self.ticks_run += 1;

        let mut index = 0;
        while index < self.falling.len() {
            let settlement = self.falling[index].lock().settle(&self.world, &self.registry)?;
            match settlement {
                Settlement::Falling => {
                    index += 1;
                    continue;
                }
                Settlement::Placed(cell) => info!("Falling block settled at {}", cell),
                Settlement::Dropped(item) => {
                    info!(
                        "Falling block broke into {:?} at {}",
                        item.stack(),
                        item.position()
                    );
                    self.add_item(item);
                }
            }
            let handle: SharedEntity = self.falling.swap_remove(index);
            self.physics.remove_entity(&handle);
        }
        Ok(())
    }

    fn add_item(&mut self, item: ItemDrop) {
        let item = Arc::new(Mutex::new(item));
        self.physics.add_entity(item.clone());
        self.items.push(item);
    }

    pub fn run(&mut self, ticks: u32) -> anyhow::Result<()> {
        let _span = tracing::info_span!("simulation", ticks).entered();
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(())
    }

    /// Log where every entity ended up.
    pub fn report(&self) {
        info!(
            "Simulated {} ticks ({:.2}s), {} entities still moving",
            self.ticks_run(),
            self.tick.as_secs_f64() * self.ticks_run as f64,
            self.active_entities()
        );
        info!(
            "{} of {} loaded chunks modified",
            self.world.modified_chunks().len(),
            self.world.len()
        );
        for mob in &self.mobs {
            let mob = mob.lock();
            info!(
                "{:?} at {} on_ground={} collisions={}",
                mob.kind(),
                mob.position(),
                mob.on_ground(),
                mob.collisions()
            );
        }
        for falling in &self.falling {
            let falling = falling.lock();
            info!("Falling {:?} at {}", falling.block(), falling.position());
        }
        for item in &self.items {
            let item = item.lock();
            info!(
                "Item {:?} at {} on_ground={}",
                item.stack(),
                item.position(),
                item.on_ground()
            );
        }
    }
}
