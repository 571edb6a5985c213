//! Combat systems - the player's melee swing and player damage handling.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::core::{DamageEvent, DeathEvent, GameState};
use crate::drones::Drone;
use crate::player::Player;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Action,
    Damage,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (CombatSet::Action, CombatSet::Damage)
            .chain()
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        Update,
        (player_melee, update_melee_cooldowns).in_set(CombatSet::Action),
    )
    .add_systems(
        Update,
        (apply_player_damage, check_player_death).in_set(CombatSet::Damage),
    );
}

/// Swing at drones on left click.
///
/// Hit detection is a sphere overlap in front of the player, so a swing
/// can clip several drones at once.
fn player_melee(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    mut player_query: Query<(Entity, &Transform, &MeleeWeapon, &mut MeleeState), With<Player>>,
    drone_query: Query<Entity, With<Drone>>,
    rapier_context: Query<&RapierContext>,
) {
    let Ok((player_entity, transform, weapon, mut melee)) = player_query.get_single_mut() else {
        return;
    };

    if !mouse.just_pressed(MouseButton::Left) || !melee.can_swing() {
        return;
    }
    melee.cooldown_remaining = weapon.cooldown;

    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let direction = transform.forward().as_vec3();
    let sphere_center = transform.translation + direction * (weapon.reach * 0.5) + Vec3::Y * 0.5;
    let shape = Collider::ball(weapon.reach * 0.6);

    context.intersections_with_shape(
        sphere_center,
        Quat::IDENTITY,
        &shape,
        QueryFilter::default().exclude_collider(player_entity),
        |hit_entity| {
            // Only damage drones
            if drone_query.get(hit_entity).is_ok() {
                commands.send_event(DamageEvent {
                    target: hit_entity,
                    source: player_entity,
                    amount: weapon.damage,
                });
            }
            true // Continue checking other entities
        },
    );
}

/// Tick down melee swing cooldowns.
fn update_melee_cooldowns(time: Res<Time>, mut query: Query<&mut MeleeState>) {
    for mut melee in query.iter_mut() {
        if melee.cooldown_remaining > 0.0 {
            melee.cooldown_remaining -= time.delta_secs();
        }
    }
}

/// Apply incoming damage to the player.
///
/// Drone damage resolves in the drone vitality system instead; this one
/// only touches the player's health.
fn apply_player_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut death_events: EventWriter<DeathEvent>,
    mut player_query: Query<(Entity, &mut Health), With<Player>>,
) {
    let Ok((player_entity, mut health)) = player_query.get_single_mut() else {
        return;
    };

    for event in damage_events.read() {
        if event.target != player_entity || health.is_dead() {
            continue;
        }

        health.take_damage(event.amount);

        if health.is_dead() {
            death_events.send(DeathEvent {
                entity: player_entity,
            });
        }
    }
}

/// Transition to the game over screen when the player dies.
fn check_player_death(
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        }
    }
}
