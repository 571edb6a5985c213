//! Combat plugin - player melee and damage handling.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles player-side combat systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
