//! Drone weapons fire - range gating and the attack cooldown.

use bevy::prelude::*;

use super::components::{Drone, DroneStats, ShootCooldown};
use crate::core::DamageEvent;

/// Pure range-and-cooldown gate for a shot. Range is the full Euclidean
/// distance to the target; there is no separate height tolerance.
pub fn can_fire(cooldown_ready: bool, in_range: bool) -> bool {
    cooldown_ready && in_range
}

/// Fire at the target if the cooldown is ready and the target is in range.
///
/// Damage goes through the target's own damage entry point (the global
/// `DamageEvent` stream). Firing clears the cooldown gate; the timer is
/// re-armed by [`tick_shoot_cooldowns`] once the duration elapses, so the
/// tick that fired is never delayed. Returns whether a shot was taken.
pub fn attempt_attack(
    drone: Entity,
    target: Entity,
    target_in_range: bool,
    stats: &DroneStats,
    cooldown: &mut ShootCooldown,
    damage_events: &mut EventWriter<DamageEvent>,
) -> bool {
    if !can_fire(cooldown.ready, target_in_range) {
        return false;
    }

    damage_events.send(DamageEvent {
        target,
        source: drone,
        amount: stats.attack_damage,
    });
    cooldown.fire();
    true
}

/// Advance shoot cooldowns; each re-arms once its duration has elapsed.
pub fn tick_shoot_cooldowns(time: Res<Time>, mut query: Query<&mut ShootCooldown, With<Drone>>) {
    for mut cooldown in query.iter_mut() {
        cooldown.tick(time.delta());
    }
}
