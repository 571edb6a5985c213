//! Drone Sentry - a first-person slice built around patrolling sentry drones.
//!
//! The interesting part is the drone behavior controller: a per-tick state
//! machine that coordinates patrol, hearing and vision-cone perception,
//! chase, ranged attacks with a cooldown, and a terminal damage/death/loot
//! lifecycle.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states and global events
//! - **Player**: First-person movement and camera
//! - **Combat**: Player melee swing and damage flow
//! - **Drones**: The sentry drone behavior controller
//! - **World**: The arena and its collision layers
//! - **UI**: HUD, drone health indicators, game over screen

pub mod combat;
pub mod core;
pub mod drones;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct DroneSentryPlugin;

impl Plugin for DroneSentryPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Drone systems
            .add_plugins(drones::DronesPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
