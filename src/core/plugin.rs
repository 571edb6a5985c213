//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver)
/// - Global events (DamageEvent, DeathEvent)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()

            // Loading state - data file loaders run at Startup, so the
            // first frame after them can enter gameplay directly
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            // Restart from the game over screen
            .add_systems(
                Update,
                handle_restart_input.run_if(in_state(GameState::GameOver)),
            );
    }
}

/// Immediately transition from Loading to InGame.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Enter restarts the run after death.
fn handle_restart_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::InGame);
    }
}
