//! Player plugin - registers movement and camera systems.

use bevy::prelude::*;

use super::movement;

/// Player plugin - first-person movement and camera control.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
