//! Drone plugin - registers all drone systems.

use bevy::prelude::*;

use super::behavior;
use super::combat;
use super::data::{load_drone_definitions, DroneRegistry};
use super::nav;
use super::vitality::{self, LootPickupEvent, LootRng};
use crate::core::GameState;

/// Drone plugin - behavior state machine, perception-driven combat,
/// damage handling, and loot drops.
pub struct DronesPlugin;

impl Plugin for DronesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DroneRegistry>()
            .init_resource::<LootRng>()
            .add_event::<LootPickupEvent>()
            // Definitions must be available before the arena spawns drones
            .add_systems(Startup, load_drone_definitions)
            // Damage resolves state before the behavior dispatch reads it,
            // and navigation consumes the destinations issued this tick.
            .add_systems(
                Update,
                (
                    vitality::apply_drone_damage,
                    vitality::handle_drone_death,
                    combat::tick_shoot_cooldowns,
                    behavior::drone_behavior,
                    nav::drive_nav_agents,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (vitality::dress_loot_drops, vitality::collect_loot_drops)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
