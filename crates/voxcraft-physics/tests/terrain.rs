//! Entities moving over a generated flatland world (surface at Y = 4).

use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use glam::DVec3;
use parking_lot::Mutex;
use voxcraft_core::coords::{ChunkPos, Coordinates3D};
use voxcraft_core::math::Size;
use voxcraft_core::types::BlockId;
use voxcraft_physics::{PhysicsEngine, PhysicsEntity, SharedEntity};
use voxcraft_world::{BlockRegistry, FlatlandGenerator, World};

struct TestEntity {
    position: DVec3,
    velocity: DVec3,
    size: Size,
    gravity: f64,
    drag: f64,
    terminal_velocity: f64,
    frozen: bool,
    collisions: Vec<(DVec3, DVec3)>,
}

impl TestEntity {
    fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: DVec3::new(x, y, z),
            velocity: DVec3::ZERO,
            size: Size::cube(1.0),
            gravity: 0.0,
            drag: 0.0,
            terminal_velocity: 10.0,
            frozen: false,
            collisions: Vec::new(),
        }
    }

    fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }
}

impl PhysicsEntity for TestEntity {
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
        self.size
    }

    fn acceleration_due_to_gravity(&self) -> f64 {
        self.gravity
    }

    fn drag(&self) -> f64 {
        self.drag
    }

    fn terminal_velocity(&self) -> f64 {
        self.terminal_velocity
    }

    fn begin_update(&mut self) -> bool {
        !self.frozen
    }

    fn end_update(&mut self, new_position: DVec3) {
        self.position = new_position;
    }

    fn terrain_collision(&mut self, point: DVec3, direction: DVec3) {
        self.collisions.push((point, direction));
    }
}

type Engine = PhysicsEngine<World, BlockRegistry>;

fn flatland() -> (Arc<World>, Engine) {
    let world = Arc::new(World::new("default", FlatlandGenerator::default()));
    world.load_area(ChunkPos::new(0, 0), 1);
    let physics = PhysicsEngine::new(world.clone(), Arc::new(BlockRegistry::standard()));
    (world, physics)
}

fn spawn(physics: &mut Engine, entity: TestEntity) -> Arc<Mutex<TestEntity>> {
    let entity = Arc::new(Mutex::new(entity));
    assert!(physics.add_entity(entity.clone()));
    entity
}

fn seconds(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn stone(world: &World, x: i32, y: i32, z: i32) {
    world
        .set_block_id(Coordinates3D::new(x, y, z), BlockId::STONE)
        .unwrap();
}

#[test]
fn gravity_accumulates_velocity() {
    let (_world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(0.0, 100.0, 0.0).with_gravity(1.0));

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 99.0);

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 97.0);
}

#[test]
fn drag_halves_velocity() {
    let (_world, mut physics) = flatland();
    let mut body = TestEntity::at(0.0, 100.0, 0.0).with_velocity(DVec3::NEG_Y * 2.0);
    body.drag = 0.5;
    let entity = spawn(&mut physics, body);

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 99.0);
}

#[test]
fn drag_never_reverses_velocity() {
    let (_world, mut physics) = flatland();
    let mut body = TestEntity::at(0.0, 50.0, 0.0).with_velocity(DVec3::new(3.0, 0.0, 0.0));
    body.drag = 2.0;
    let entity = spawn(&mut physics, body);

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.velocity, DVec3::ZERO);
    assert_eq!(entity.position, DVec3::new(0.0, 50.0, 0.0));
}

#[test]
fn terminal_velocity_caps_fall() {
    let (_world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(0.0, 100.0, 0.0).with_gravity(50.0));

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.velocity.y, -10.0);
    assert_eq!(entity.position.y, 90.0);
}

#[test]
fn upward_speed_is_not_capped() {
    let (_world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(0.0, 10.0, 0.0).with_velocity(DVec3::new(0.0, 50.0, 0.0)),
    );

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.velocity.y, 50.0);
    assert_eq!(entity.position.y, 60.0);
    assert!(entity.collisions.is_empty());
}

#[test]
fn rests_on_terrain() {
    let (_world, mut physics) = flatland();
    let mut body = TestEntity::at(-10.9, 4.0, -10.9).with_gravity(1.0);
    body.size = Size::new(0.6, 1.8, 0.6);
    let entity = spawn(&mut physics, body);

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 4.0);

    physics.update(seconds(5.0));
    assert_eq!(entity.lock().position.y, 4.0);
}

#[test]
fn extreme_gravity_does_not_tunnel() {
    let (_world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(0.0, 4.0, 0.0).with_gravity(10.0));

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position.y, 4.0);
    assert_eq!(entity.velocity.y, 0.0);
}

#[test]
fn lands_flush_on_floor() {
    let (_world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(2.0, 4.5, 2.0).with_gravity(3.0));

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position.y, 4.0);
    assert_eq!(
        entity.collisions,
        vec![(DVec3::new(2.0, 3.0, 2.0), DVec3::NEG_Y)]
    );
}

#[test]
fn collision_point_is_struck_block() {
    let (world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(0.0, 5.0, 0.0).with_gravity(1.0));
    stone(&world, 0, 4, 0);

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.collisions.len(), 1);
    assert_eq!(entity.collisions[0].0, DVec3::new(0.0, 4.0, 0.0));
    assert_eq!(entity.position.y, 5.0);
}

#[test]
fn horizontal_collision_zeroes_velocity() {
    let (world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(0.0, 5.0, 0.0).with_velocity(DVec3::X),
    );
    stone(&world, 1, 5, 0);

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position.x, 0.0);
    assert_eq!(entity.velocity.x, 0.0);
    assert_eq!(entity.collisions[0].1, DVec3::X);
}

#[test]
fn corner_collision_stops_both_axes() {
    let (world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(-1.0, 10.0, -1.0).with_velocity(DVec3::new(1.0, 0.0, 1.0)),
    );
    stone(&world, 0, 10, 0);

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position.x, -1.0);
    assert_eq!(entity.position.z, -1.0);
    assert_eq!(entity.velocity.x, 0.0);
    assert_eq!(entity.velocity.z, 0.0);
    let directions: Vec<_> = entity.collisions.iter().map(|(_, dir)| *dir).collect();
    assert_eq!(directions, vec![DVec3::X, DVec3::Z]);
}

#[test]
fn adjacent_fall_has_no_collision() {
    let (world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(0.0, 10.0, 0.0).with_gravity(1.0));
    for y in 0..12 {
        stone(&world, 1, y, 0);
    }

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position.y, 9.0);
    assert!(entity.collisions.is_empty());
}

#[test]
fn walks_along_floor_under_gravity() {
    let (_world, mut physics) = flatland();
    let mut body = TestEntity::at(0.2, 4.0, 0.2)
        .with_gravity(1.0)
        .with_velocity(DVec3::X);
    body.size = Size::new(0.6, 1.8, 0.6);
    let entity = spawn(&mut physics, body);

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_relative_eq!(entity.position.x, 1.2);
    assert_eq!(entity.position.y, 4.0);
    assert_eq!(entity.velocity, DVec3::X);
    assert_eq!(entity.collisions.len(), 1);
    assert_eq!(entity.collisions[0].1, DVec3::NEG_Y);
}

#[test]
fn slides_along_wall() {
    let (world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(0.0, 5.0, 0.0).with_velocity(DVec3::new(1.0, 0.0, 1.0)),
    );
    for x in 0..3 {
        stone(&world, x, 5, 1);
    }

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position, DVec3::new(1.0, 5.0, 0.0));
    assert_eq!(entity.velocity, DVec3::X);
}

#[test]
fn ceiling_stops_upward_motion() {
    let (world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(0.0, 5.0, 0.0).with_velocity(DVec3::Y * 3.0),
    );
    stone(&world, 0, 8, 0);

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position.y, 7.0);
    assert_eq!(entity.velocity.y, 0.0);
    assert_eq!(
        entity.collisions,
        vec![(DVec3::new(0.0, 8.0, 0.0), DVec3::Y)]
    );
}

#[test]
fn zero_extent_entity_lands() {
    let (_world, mut physics) = flatland();
    let mut body = TestEntity::at(0.5, 6.0, 0.5).with_gravity(1.0);
    body.size = Size::cube(0.0);
    let entity = spawn(&mut physics, body);

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 5.0);
    physics.update(seconds(2.0));
    let entity = entity.lock();
    assert_eq!(entity.position.y, 4.0);
    assert!(entity.position.is_finite());
}

#[test]
fn zero_tick_is_identity() {
    let (_world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(3.0, 20.0, 3.0)
            .with_gravity(5.0)
            .with_velocity(DVec3::new(1.0, 2.0, 3.0)),
    );

    physics.update(Duration::ZERO);
    let entity = entity.lock();
    assert_eq!(entity.position, DVec3::new(3.0, 20.0, 3.0));
    assert_eq!(entity.velocity, DVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn unloaded_terrain_is_free_fall() {
    let (_world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(100.5, 10.0, 100.5).with_gravity(1.0));

    for _ in 0..5 {
        physics.update(seconds(1.0));
    }
    let entity = entity.lock();
    assert_eq!(entity.position.y, -5.0);
    assert!(entity.collisions.is_empty());
}

#[test]
fn non_finite_velocity_is_discarded() {
    let (_world, mut physics) = flatland();
    let entity = spawn(
        &mut physics,
        TestEntity::at(0.0, 20.0, 0.0).with_velocity(DVec3::new(f64::NAN, 0.0, 0.0)),
    );
    let bystander = spawn(&mut physics, TestEntity::at(5.0, 20.0, 5.0).with_gravity(1.0));

    physics.update(seconds(1.0));
    let entity = entity.lock();
    assert_eq!(entity.position, DVec3::new(0.0, 20.0, 0.0));
    assert_eq!(entity.velocity, DVec3::ZERO);
    assert_eq!(bystander.lock().position.y, 19.0);
}

#[test]
fn begin_update_false_skips_entity() {
    let (_world, mut physics) = flatland();
    let mut body = TestEntity::at(0.0, 50.0, 0.0).with_gravity(1.0);
    body.frozen = true;
    let entity = spawn(&mut physics, body);

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 50.0);

    entity.lock().frozen = false;
    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 49.0);
}

#[test]
fn duplicate_registration_updates_once() {
    let (_world, mut physics) = flatland();
    let entity = spawn(&mut physics, TestEntity::at(0.0, 100.0, 0.0).with_gravity(1.0));
    assert!(!physics.add_entity(entity.clone()));
    assert_eq!(physics.len(), 1);

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 99.0);
}

#[test]
fn removed_entity_stops_moving() {
    let (_world, mut physics) = flatland();
    let entity = Arc::new(Mutex::new(TestEntity::at(0.0, 100.0, 0.0).with_gravity(1.0)));
    let handle: SharedEntity = entity.clone();
    physics.add_entity(handle.clone());

    physics.update(seconds(1.0));
    assert!(physics.remove_entity(&handle));
    assert!(physics.is_empty());

    physics.update(seconds(1.0));
    assert_eq!(entity.lock().position.y, 99.0);
}
