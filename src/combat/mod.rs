//! Combat module - health, the player's melee swing, and damage flow.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
