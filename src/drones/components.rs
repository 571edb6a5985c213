//! Drone-related components.

use bevy::prelude::*;
use rand::Rng;
use serde::Deserialize;

use super::error::DroneDataError;

/// Marker component for all sentry drones.
#[derive(Component)]
pub struct Drone;

/// Behavior state machine for a sentry drone.
///
/// Exactly one state is current at a time; the behavior dispatch owns it,
/// with damage application as the only externally-triggered writer (through
/// `Hit`). `Alert` carries its own spin accumulator, so every entry into
/// the state structurally starts the sweep from zero.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum DroneState {
    /// One-time startup state; hands off to Patrol on the first tick.
    Idle,
    /// Walking the patrol route.
    Patrol,
    /// Stopped in place, sweeping for the target.
    Alert {
        /// Degrees turned so far during this sweep.
        spun_degrees: f32,
    },
    /// Moving toward the target's current position.
    Chase,
    /// Target visible and in range; firing.
    Attack,
    /// Just took damage; resolves to Alert or Die before the next dispatch.
    Hit,
    /// Terminal. The drone drops loot and leaves the simulation.
    Die,
}

impl Default for DroneState {
    fn default() -> Self {
        Self::Idle
    }
}

impl DroneState {
    /// States in which incoming damage is ignored: a drone cannot be
    /// re-hit mid-hit or damaged once it is already dying.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hit | Self::Die)
    }
}

/// Per-drone tuning loaded from RON data files.
#[derive(Component, Clone, Debug)]
pub struct DroneStats {
    pub max_health: f32,
    pub move_speed: f32,
    /// Alert sweep speed in degrees per second.
    pub rotation_speed: f32,
    /// Hearing penetrates obstacles; pure distance check.
    pub hearing_radius: f32,
    pub sight_distance: f32,
    /// Full horizontal field-of-view angle in degrees.
    pub vision_cone_degrees: f32,
    pub eye_height: f32,
    pub target_eye_height: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Minimum seconds between shots.
    pub attack_cooldown: f32,
}

impl Default for DroneStats {
    fn default() -> Self {
        Self {
            max_health: 1.0,
            move_speed: 2.5,
            rotation_speed: 120.0,
            hearing_radius: 4.5,
            sight_distance: 8.0,
            vision_cone_degrees: 60.0,
            eye_height: 1.8,
            target_eye_height: 1.8,
            attack_range: 4.0,
            attack_damage: 0.3,
            attack_cooldown: 2.0,
        }
    }
}

/// Attack cooldown gate.
///
/// `ready` is cleared when the drone fires and re-armed by
/// `tick_shoot_cooldowns` once the timer elapses. The timer never blocks
/// the tick it was started from, and once started it always completes.
#[derive(Component)]
pub struct ShootCooldown {
    pub ready: bool,
    timer: Timer,
}

impl ShootCooldown {
    pub fn new(seconds: f32) -> Self {
        Self {
            ready: true,
            timer: Timer::from_seconds(seconds, TimerMode::Once),
        }
    }

    /// Start the cooldown after a shot.
    pub fn fire(&mut self) {
        self.ready = false;
        self.timer.reset();
    }

    /// Advance the cooldown; re-arms `ready` when the duration has elapsed.
    pub fn tick(&mut self, delta: std::time::Duration) {
        if self.ready {
            return;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            self.ready = true;
        }
    }
}

/// Cyclic, ordered list of patrol waypoints.
///
/// The current index persists across Patrol re-entries and always points
/// at a valid waypoint; advancing wraps around to the start.
#[derive(Component, Clone, Debug)]
pub struct PatrolRoute {
    waypoints: Vec<Vec3>,
    current: usize,
}

impl PatrolRoute {
    /// Build a route. Fails fast on an empty waypoint list.
    pub fn new(waypoints: Vec<Vec3>) -> Result<Self, DroneDataError> {
        if waypoints.is_empty() {
            return Err(DroneDataError::EmptyPatrolRoute);
        }
        Ok(Self {
            waypoints,
            current: 0,
        })
    }

    pub fn current_waypoint(&self) -> Vec3 {
        self.waypoints[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Step to the next waypoint, wrapping past the end, and return it.
    pub fn advance(&mut self) -> Vec3 {
        self.current = (self.current + 1) % self.waypoints.len();
        self.current_waypoint()
    }
}

/// Items a drone can leave behind when destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LootKind {
    Scrap,
    PowerCell,
    RepairKit,
}

/// Loot choices for a destroyed drone; one entry is picked uniformly
/// at random on death.
#[derive(Component, Clone, Debug)]
pub struct DropTable {
    items: Vec<LootKind>,
}

impl DropTable {
    /// Build a drop table. Fails fast on an empty item list.
    pub fn new(items: Vec<LootKind>) -> Result<Self, DroneDataError> {
        if items.is_empty() {
            return Err(DroneDataError::EmptyDropTable);
        }
        Ok(Self { items })
    }

    /// Pick one drop uniformly at random.
    pub fn pick(&self, rng: &mut impl Rng) -> LootKind {
        self.items[rng.gen_range(0..self.items.len())]
    }
}

/// A dropped item sitting in the world, waiting to be collected.
#[derive(Component, Debug)]
pub struct LootDrop(pub LootKind);
