//! The test arena - ground, occluder walls, lighting, and spawns.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::drones::{spawn_drones, DroneRegistry, DroneSpawn};
use crate::player::spawn_player;

/// Collision group for moving actors (player, drones).
pub const ACTOR_GROUP: Group = Group::GROUP_1;

/// Collision group for sight-blocking geometry. The drone's line-of-sight
/// raycast filters on this group, so only members of it can break sight.
pub const OCCLUDER_GROUP: Group = Group::GROUP_2;

/// Marker for everything belonging to the arena, for cleanup on exit.
#[derive(Component)]
pub struct ArenaEntity;

/// Build the arena and populate it.
pub fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    registry: Res<DroneRegistry>,
) {
    info!("Building arena");

    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.18, 0.18, 0.2),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.28, 0.26),
        perceptual_roughness: 0.8,
        ..default()
    });

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(40.0, 0.2, 40.0))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -0.1, 0.0),
        Collider::cuboid(20.0, 0.1, 20.0),
        CollisionGroups::new(ACTOR_GROUP, Group::ALL),
        ArenaEntity,
    ));

    // Perimeter walls plus a pair of interior sight blockers
    let walls = [
        // (position, size)
        (Vec3::new(0.0, 1.5, -20.0), Vec3::new(40.0, 3.0, 0.4)),
        (Vec3::new(0.0, 1.5, 20.0), Vec3::new(40.0, 3.0, 0.4)),
        (Vec3::new(-20.0, 1.5, 0.0), Vec3::new(0.4, 3.0, 40.0)),
        (Vec3::new(20.0, 1.5, 0.0), Vec3::new(0.4, 3.0, 40.0)),
        (Vec3::new(-4.0, 1.5, -6.0), Vec3::new(6.0, 3.0, 0.4)),
        (Vec3::new(6.0, 1.5, 4.0), Vec3::new(0.4, 3.0, 8.0)),
    ];
    for (position, size) in walls {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
            Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            CollisionGroups::new(OCCLUDER_GROUP, Group::ALL),
            ArenaEntity,
        ));
    }

    // Lighting
    commands.spawn((
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
        ArenaEntity,
    ));

    spawn_player(&mut commands, Vec3::new(0.0, 1.0, 12.0));

    let drone_spawns = [
        DroneSpawn {
            drone_type: "sentry".to_string(),
            position: Vec3::new(-8.0, 1.0, -8.0),
            route: vec![
                Vec3::new(-8.0, 0.0, -8.0),
                Vec3::new(8.0, 0.0, -8.0),
                Vec3::new(8.0, 0.0, -14.0),
                Vec3::new(-8.0, 0.0, -14.0),
            ],
        },
        DroneSpawn {
            drone_type: "sentry".to_string(),
            position: Vec3::new(12.0, 1.0, 8.0),
            route: vec![
                Vec3::new(12.0, 0.0, 8.0),
                Vec3::new(12.0, 0.0, -4.0),
            ],
        },
    ];
    spawn_drones(
        &mut commands,
        &mut meshes,
        &mut materials,
        &registry,
        &drone_spawns,
    );
}

/// Clean up arena entities when leaving the InGame state.
pub fn cleanup_arena(
    mut commands: Commands,
    arena_query: Query<Entity, With<ArenaEntity>>,
    player_query: Query<Entity, With<crate::player::Player>>,
) {
    for entity in arena_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in player_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
