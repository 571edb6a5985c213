//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. The drone's weapon and
//! the player's melee swing both send DamageEvents; the receiving side
//! applies the actual health reduction. This keeps systems independent
//! and testable.

use bevy::prelude::*;

/// Sent when an entity takes damage.
///
/// Drone damage resolves through the drone vitality system (which owns
/// the Hit/Die transitions); player damage resolves through the combat
/// system.
#[derive(Event)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
}

/// Sent when an entity dies (health reaches 0).
#[derive(Event)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
}
