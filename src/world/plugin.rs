//! World plugin - arena setup and teardown.

use bevy::prelude::*;

use super::arena::{cleanup_arena, setup_arena};
use crate::core::GameState;

/// World plugin - builds the arena on entering gameplay.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_arena)
            .add_systems(OnExit(GameState::InGame), cleanup_arena);
    }
}
