//! Drone spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Drone, DroneState, PatrolRoute, ShootCooldown};
use super::data::DroneRegistry;
use super::nav::NavAgent;
use crate::combat::Health;
use crate::world::{ArenaEntity, ACTOR_GROUP};

/// Placement request for one drone: its type, starting position, and
/// patrol route.
#[derive(Clone, Debug)]
pub struct DroneSpawn {
    pub drone_type: String,
    pub position: Vec3,
    pub route: Vec<Vec3>,
}

/// Spawn drones from placement requests.
///
/// A request referencing an unknown type or carrying invalid data (empty
/// patrol route, empty drop table) is rejected here with an error log;
/// nothing half-initialized enters the simulation.
pub fn spawn_drones(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    registry: &DroneRegistry,
    spawns: &[DroneSpawn],
) {
    let body_mesh = meshes.add(Capsule3d::new(0.3, 1.0));
    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.25, 0.3),
        metallic: 0.8,
        perceptual_roughness: 0.3,
        ..default()
    });

    for spawn in spawns {
        let Some(definition) = registry.get(&spawn.drone_type) else {
            warn!("Unknown drone type in spawn list: {}", spawn.drone_type);
            continue;
        };

        let route = match PatrolRoute::new(spawn.route.clone()) {
            Ok(route) => route,
            Err(e) => {
                error!("Refusing to spawn '{}': {}", definition.name, e);
                continue;
            }
        };
        let drop_table = match definition.drop_table() {
            Ok(table) => table,
            Err(e) => {
                error!("Refusing to spawn '{}': {}", definition.name, e);
                continue;
            }
        };

        commands.spawn((
            Drone,
            DroneState::default(),
            definition.to_stats(),
            Health::new(definition.max_health),
            ShootCooldown::new(definition.attack_cooldown),
            NavAgent::new(definition.move_speed),
            route,
            drop_table,
            Mesh3d(body_mesh.clone()),
            MeshMaterial3d(body_material.clone()),
            Transform::from_translation(spawn.position),
            Collider::capsule_y(0.5, 0.3),
            CollisionGroups::new(ACTOR_GROUP, Group::ALL),
            RigidBody::KinematicPositionBased,
            ArenaEntity, // Cleaned up together with the arena
        ));

        info!("Spawned {} at {:?}", definition.name, spawn.position);
    }
}
