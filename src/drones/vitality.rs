//! Drone vitality - damage intake, death, and loot drops.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::components::{Drone, DroneState, DropTable, LootDrop, LootKind};
use super::nav::NavAgent;
use crate::combat::Health;
use crate::core::{DamageEvent, DeathEvent};
use crate::player::Player;

/// Distance at which the player scoops up a dropped item.
const PICKUP_RADIUS: f32 = 1.0;

/// Process-level RNG for loot selection, seeded once at startup.
///
/// Tests construct it with a fixed seed to make drop outcomes
/// deterministic.
#[derive(Resource)]
pub struct LootRng(pub StdRng);

impl Default for LootRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl LootRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Sent when the player collects a dropped item.
#[derive(Event)]
pub struct LootPickupEvent {
    pub loot: LootKind,
}

/// Apply incoming damage to drones.
///
/// This is the sole entry point that moves a drone into Hit or Die.
/// Damage is ignored while the drone is already in Hit or Die; otherwise
/// health drops immediately (the indicator reads it the same frame) and
/// the state resolves before the behavior dispatch runs: Die when health
/// is depleted, Alert otherwise.
pub fn apply_drone_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut drone_query: Query<(&mut Health, &mut DroneState, &mut NavAgent), With<Drone>>,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut state, mut nav)) = drone_query.get_mut(event.target) else {
            continue;
        };
        if state.is_terminal() {
            continue;
        }

        *state = DroneState::Hit;
        health.take_damage(event.amount);

        if health.is_dead() {
            // Unconditional and terminal; overrides the Alert follow-up.
            *state = DroneState::Die;
        } else {
            nav.halt();
            *state = DroneState::Alert { spun_degrees: 0.0 };
        }
    }
}

/// One-shot Die handling: drop one item from the drop table at the
/// drone's pose, then remove the drone from the simulation.
pub fn handle_drone_death(
    mut commands: Commands,
    mut loot_rng: ResMut<LootRng>,
    mut death_events: EventWriter<DeathEvent>,
    query: Query<(Entity, &Transform, &DroneState, &DropTable), With<Drone>>,
) {
    for (entity, transform, state, drops) in query.iter() {
        if *state != DroneState::Die {
            continue;
        }

        let loot = drops.pick(&mut loot_rng.0);
        commands.spawn((
            LootDrop(loot),
            Transform::from_translation(transform.translation)
                .with_rotation(transform.rotation),
            Visibility::default(),
            crate::world::ArenaEntity,
        ));

        death_events.send(DeathEvent { entity });
        commands.entity(entity).despawn_recursive();

        info!("Drone {entity:?} destroyed, dropped {loot:?}");
    }
}

/// Attach meshes to freshly spawned loot drops.
///
/// Separate from [`handle_drone_death`] so the death path itself carries
/// no asset dependencies and runs headless.
pub fn dress_loot_drops(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(Entity, &LootDrop), Added<LootDrop>>,
) {
    for (entity, drop) in query.iter() {
        let color = match drop.0 {
            LootKind::Scrap => Color::srgb(0.6, 0.5, 0.4),
            LootKind::PowerCell => Color::srgb(0.2, 0.8, 0.9),
            LootKind::RepairKit => Color::srgb(0.8, 0.3, 0.3),
        };
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(0.3, 0.3, 0.3))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                ..default()
            })),
        ));
    }
}

/// Collect loot drops the player walks over.
pub fn collect_loot_drops(
    mut commands: Commands,
    mut pickup_events: EventWriter<LootPickupEvent>,
    player_query: Query<&Transform, With<Player>>,
    drop_query: Query<(Entity, &Transform, &LootDrop)>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    for (entity, transform, drop) in drop_query.iter() {
        let distance = player_transform
            .translation
            .distance(transform.translation);
        if distance <= PICKUP_RADIUS {
            pickup_events.send(LootPickupEvent { loot: drop.0 });
            commands.entity(entity).despawn_recursive();
            info!("Picked up {:?}", drop.0);
        }
    }
}
