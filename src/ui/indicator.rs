//! Screen-space health indicators floating over drones.
//!
//! Visibility uses the observer-side cone check from perception, which
//! deliberately ignores occluders; see `perception::visible_to_observer`.

use bevy::prelude::*;

use crate::combat::Health;
use crate::core::GameState;
use crate::drones::{perception, Drone, DroneState, DroneStats};
use crate::player::{Player, PlayerCamera};

/// World-space offset from the drone origin to the indicator anchor.
const ANCHOR_OFFSET: Vec3 = Vec3::new(0.0, 2.2, 0.0);

const BAR_WIDTH_PX: f32 = 60.0;
const BAR_HEIGHT_PX: f32 = 7.0;

/// Root node of one drone's indicator.
#[derive(Component)]
pub struct DroneIndicator {
    pub drone: Entity,
}

/// Fill node of one drone's indicator.
#[derive(Component)]
pub struct IndicatorFill {
    pub drone: Entity,
}

/// Setup indicator systems.
pub fn setup_indicator_systems(app: &mut App) {
    app.add_systems(
        Update,
        (spawn_indicators, update_indicators, update_indicator_fills)
            .chain()
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(OnExit(GameState::InGame), cleanup_indicators);
}

/// Give every new drone a screen-space health bar.
fn spawn_indicators(mut commands: Commands, drone_query: Query<Entity, Added<Drone>>) {
    for drone in drone_query.iter() {
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(BAR_WIDTH_PX),
                    height: Val::Px(BAR_HEIGHT_PX),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.05, 0.05, 0.05, 0.8)),
                Visibility::Hidden,
                DroneIndicator { drone },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.85, 0.25, 0.2)),
                    IndicatorFill { drone },
                ));
            });
    }
}

/// Anchor each indicator over its drone and toggle visibility.
///
/// The indicator is shown only while the player has the drone inside
/// their view cone and the drone is not in its Die state; it also hides
/// whenever the anchor projects behind the camera.
fn update_indicators(
    mut commands: Commands,
    mut indicator_query: Query<(Entity, &DroneIndicator, &mut Node, &mut Visibility)>,
    drone_query: Query<(&Transform, &DroneState, &DroneStats), With<Drone>>,
    player_query: Query<&Transform, (With<Player>, Without<Drone>)>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (entity, indicator, mut node, mut visibility) in indicator_query.iter_mut() {
        let Ok((drone_transform, state, stats)) = drone_query.get(indicator.drone) else {
            // Drone is gone; the indicator goes with it.
            commands.entity(entity).despawn_recursive();
            continue;
        };

        let in_view = perception::visible_to_observer(
            stats,
            player_transform.translation,
            player_transform.forward().as_vec3(),
            drone_transform.translation,
        );

        let anchor = drone_transform.translation + ANCHOR_OFFSET;
        let projected = camera.world_to_viewport(camera_transform, anchor).ok();

        match projected {
            Some(screen) if in_view && *state != DroneState::Die => {
                node.left = Val::Px(screen.x - BAR_WIDTH_PX / 2.0);
                node.top = Val::Px(screen.y - BAR_HEIGHT_PX / 2.0);
                *visibility = Visibility::Visible;
            }
            _ => {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

/// Scale each indicator fill to its drone's health fraction.
///
/// Health changes show up the same frame they are applied.
fn update_indicator_fills(
    mut fill_query: Query<(&IndicatorFill, &mut Node)>,
    drone_query: Query<&Health, With<Drone>>,
) {
    for (fill, mut node) in fill_query.iter_mut() {
        let Ok(health) = drone_query.get(fill.drone) else {
            continue;
        };
        node.width = Val::Percent(health.percentage().clamp(0.0, 1.0) * 100.0);
    }
}

/// Clean up indicators when leaving gameplay.
fn cleanup_indicators(mut commands: Commands, query: Query<Entity, With<DroneIndicator>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
