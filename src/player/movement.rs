//! First-person player movement and camera control.

use bevy::prelude::*;
use bevy::input::mouse::MouseMotion;
use bevy::render::camera::ClearColorConfig;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::{Health, MeleeState, MeleeWeapon};
use crate::core::GameState;
use crate::world::ACTOR_GROUP;

/// Marker component for the player's camera.
#[derive(Component)]
pub struct PlayerCamera {
    /// Current pitch angle in radians (looking up/down)
    pub pitch: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self { pitch: 0.0 }
    }
}

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>()
        .add_systems(OnEnter(GameState::InGame), grab_cursor)
        .add_systems(OnExit(GameState::InGame), release_cursor)
        .add_systems(
            Update,
            (mouse_look, player_movement).run_if(in_state(GameState::InGame)),
        );
}

/// Grab and hide cursor when entering gameplay.
fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Handle mouse movement for looking around.
///
/// Rotates the player entity horizontally (yaw) and the camera vertically
/// (pitch). The camera is a child of the player, so horizontal rotation
/// affects both.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<PlayerConfig>,
    mut player_query: Query<&mut Transform, With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), (With<Camera3d>, Without<Player>)>,
) {
    // Accumulate mouse movement
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut player_transform) = player_query.get_single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() else {
        return;
    };

    let sensitivity = config.mouse_sensitivity * 0.001;
    let y_invert = if config.invert_y { -1.0 } else { 1.0 };

    // Rotate player horizontally (yaw)
    player_transform.rotate_y(-delta.x * sensitivity);

    // Rotate camera vertically (pitch), clamped to prevent flipping
    camera.pitch -= delta.y * sensitivity * y_invert;
    camera.pitch = camera.pitch.clamp(-1.4, 1.4); // About 80 degrees

    camera_transform.rotation = Quat::from_rotation_x(camera.pitch);
}

/// Handle WASD movement.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, transform, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    // Ground check using a short downward raycast from the capsule bottom
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * 0.75;
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * time.delta_secs();
    }

    // Build input direction from WASD
    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }

    // Normalize to prevent faster diagonal movement
    if direction != Vec3::ZERO {
        direction = direction.normalize();
    }

    // Rotate direction to face where the player is looking (only horizontal)
    let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
    let movement = Quat::from_rotation_y(yaw) * direction;

    let speed = if keyboard.pressed(KeyCode::ShiftLeft) {
        config.move_speed * config.sprint_multiplier
    } else {
        config.move_speed
    };

    let horizontal = movement * speed * time.delta_secs();
    let vertical = Vec3::new(0.0, movement_state.vertical_velocity * time.delta_secs(), 0.0);

    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player entity with camera.
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    let player = commands
        .spawn((
            Player,
            MovementState::default(),
            Health::new(1.0),
            MeleeWeapon::default(),
            MeleeState::default(),
            Transform::from_translation(position),
            GlobalTransform::default(),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
            CollisionGroups::new(ACTOR_GROUP, Group::ALL),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    // Spawn camera as child of player, at eye level
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(Color::srgb(0.03, 0.03, 0.05)),
                ..default()
            },
            PlayerCamera::default(),
            Transform::from_xyz(0.0, 0.4, 0.0),
        ));
    });

    player
}
