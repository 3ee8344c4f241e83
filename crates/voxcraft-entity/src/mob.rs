//! Living creatures that walk the terrain.

use std::f64::consts::TAU;
use std::time::Duration;

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use voxcraft_core::coords::Coordinates3D;
use voxcraft_core::math::{direction, Size};
use voxcraft_physics::PhysicsEntity;

/// The creature a [`Mob`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobKind {
    Pig,
    Sheep,
    Cow,
    Chicken,
    Zombie,
    Spider,
}

impl MobKind {
    pub const ALL: [Self; 6] = [
        Self::Pig,
        Self::Sheep,
        Self::Cow,
        Self::Chicken,
        Self::Zombie,
        Self::Spider,
    ];

    /// Collision box extents.
    pub fn size(self) -> Size {
        match self {
            Self::Pig => Size::cube(0.9),
            Self::Sheep | Self::Cow => Size::new(0.9, 1.3, 0.9),
            Self::Chicken => Size::new(0.4, 0.3, 0.4),
            Self::Zombie => Size::new(0.6, 1.8, 0.6),
            Self::Spider => Size::new(1.4, 0.9, 1.4),
        }
    }

    /// Mob type sent to clients when the mob spawns.
    pub const fn mob_type(self) -> i8 {
        match self {
            Self::Spider => 52,
            Self::Zombie => 54,
            Self::Pig => 90,
            Self::Sheep => 91,
            Self::Cow => 92,
            Self::Chicken => 93,
        }
    }

    pub const fn max_health(self) -> i16 {
        match self {
            Self::Chicken => 4,
            Self::Sheep => 8,
            Self::Pig | Self::Cow => 10,
            Self::Spider => 16,
            Self::Zombie => 20,
        }
    }

    /// Whether the mob leaves players alone.
    pub const fn friendly(self) -> bool {
        !matches!(self, Self::Zombie | Self::Spider)
    }
}

/// A route of block positions for a mob to walk through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub waypoints: Vec<Coordinates3D>,
    /// Next waypoint to reach.
    pub index: usize,
}

impl PathResult {
    pub const fn new(waypoints: Vec<Coordinates3D>) -> Self {
        Self {
            waypoints,
            index: 0,
        }
    }

    /// The waypoint currently walked towards.
    pub fn current(&self) -> Option<Coordinates3D> {
        self.waypoints.get(self.index).copied()
    }
}

/// A creature simulated by the physics engine.
#[derive(Debug, Clone)]
pub struct Mob {
    kind: MobKind,
    position: DVec3,
    velocity: DVec3,
    /// Heading in degrees, 0 facing +Z, 270 facing +X.
    yaw: f64,
    health: i16,
    /// Walking speed in blocks per second.
    speed: f64,
    path: Option<PathResult>,
    on_ground: bool,
    collisions: usize,
    updating: bool,
    /// Teleport requested while the engine was moving the mob.
    pending_teleport: Option<DVec3>,
    position_changed: bool,
}

impl Mob {
    pub const GRAVITY: f64 = 1.6;
    pub const DRAG: f64 = 0.40;
    pub const TERMINAL_VELOCITY: f64 = 78.4;
    pub const DEFAULT_SPEED: f64 = 4.0;

    /// Create a mob at full health standing at `position`.
    pub const fn new(kind: MobKind, position: DVec3) -> Self {
        Self {
            kind,
            position,
            velocity: DVec3::ZERO,
            yaw: 0.0,
            health: kind.max_health(),
            speed: Self::DEFAULT_SPEED,
            path: None,
            on_ground: false,
            collisions: 0,
            updating: false,
            pending_teleport: None,
            position_changed: false,
        }
    }

    pub const fn kind(&self) -> MobKind {
        self.kind
    }

    pub const fn yaw(&self) -> f64 {
        self.yaw
    }

    pub const fn health(&self) -> i16 {
        self.health
    }

    pub const fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.max(0.0);
    }

    pub const fn path(&self) -> Option<&PathResult> {
        self.path.as_ref()
    }

    /// Start walking `path`, replacing any route in progress.
    pub fn set_path(&mut self, path: PathResult) {
        self.path = Some(path);
    }

    /// Whether the last physics tick ended on top of terrain.
    pub const fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Number of terrain contacts since the mob was created.
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    /// Whether the physics engine is between `begin_update` and
    /// `end_update` for this mob.
    pub const fn is_updating(&self) -> bool {
        self.updating
    }

    /// Move the mob without physics.
    ///
    /// During a physics update the move is held back and replaces the
    /// engine's result in `end_update`.
    pub fn teleport(&mut self, position: DVec3) {
        if self.updating {
            self.pending_teleport = Some(position);
            return;
        }
        self.position = position;
        self.position_changed = true;
    }

    /// Whether the position changed since the last call.
    ///
    /// A teleport held back by an update is reported once that update ends.
    pub fn take_position_change(&mut self) -> bool {
        std::mem::take(&mut self.position_changed)
    }

    /// Turn to look at `target` on the horizontal plane.
    pub fn face(&mut self, target: DVec3) {
        let diff = target - self.position;
        self.yaw = (TAU - diff.x.atan2(diff.z)).to_degrees().rem_euclid(360.0);
    }

    /// Unit vector the mob is facing on the horizontal plane.
    pub fn heading(&self) -> DVec3 {
        DMat3::from_rotation_y((360.0 - self.yaw).to_radians()) * direction::FORWARDS
    }

    /// Walk towards the current waypoint for `time`.
    ///
    /// Sets the horizontal velocity towards the waypoint's centre at
    /// [`speed`](Self::speed). Once the waypoint is closer than `time` of
    /// travel the mob is placed on it and the next waypoint becomes current.
    ///
    /// Returns `true` when the final waypoint has been reached and the path
    /// cleared.
    pub fn advance_path(&mut self, time: Duration) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        let Some(waypoint) = path.current() else {
            self.path = None;
            return true;
        };

        let size = self.kind.size();
        let mut target =
            waypoint.to_dvec3() + DVec3::new(size.width / 2.0, 0.0, size.depth / 2.0);
        target.y = self.position.y;
        self.face(target);

        let walk = self.heading() * self.speed;
        self.velocity = DVec3::new(walk.x, self.velocity.y, walk.z);
        if self.position.distance(target) >= self.speed * time.as_secs_f64() {
            return false;
        }

        self.teleport(target);
        self.velocity = DVec3::ZERO;
        let Some(path) = &mut self.path else {
            return false;
        };
        path.index += 1;
        if path.index < path.waypoints.len() {
            return false;
        }
        tracing::debug!("{:?} reached end of path at {}", self.kind, target);
        self.path = None;
        true
    }
}

impl PhysicsEntity for Mob {
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
        self.kind.size()
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
        self.updating = true;
        self.on_ground = false;
        true
    }

    fn end_update(&mut self, new_position: DVec3) {
        self.updating = false;
        let new_position = self.pending_teleport.take().unwrap_or(new_position);
        if new_position != self.position {
            self.position = new_position;
            self.position_changed = true;
        }
    }

    fn terrain_collision(&mut self, _point: DVec3, direction: DVec3) {
        self.collisions += 1;
        if direction.y < 0.0 {
            self.on_ground = true;
        }
    }
}
