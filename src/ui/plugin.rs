//! UI plugin - HUD, drone indicators, and the game over screen.

use bevy::prelude::*;

use super::hud;
use super::indicator;
use crate::core::GameState;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        indicator::setup_indicator_systems(app);

        app.add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over);
    }
}

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

/// Marker for the camera used while no gameplay camera exists.
#[derive(Component)]
struct OverlayCamera;

/// Set up the game over screen.
fn setup_game_over(mut commands: Commands) {
    commands.spawn((Camera2d, OverlayCamera));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.9)),
            GameOverUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU DIED"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press Enter to retry"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
        });
}

/// Clean up game over entities.
fn cleanup_game_over(
    mut commands: Commands,
    ui_query: Query<Entity, With<GameOverUi>>,
    camera_query: Query<Entity, With<OverlayCamera>>,
) {
    for entity in ui_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in camera_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
