//! Combat-related components.

use bevy::prelude::*;

/// Component for entities that can take damage.
///
/// Health only goes down over an entity's lifetime (outside of
/// re-initialization); `take_damage` clamps at zero.
#[derive(Component)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}

/// The player's melee weapon.
#[derive(Component)]
pub struct MeleeWeapon {
    pub damage: f32,
    /// Swing reach in units
    pub reach: f32,
    /// Swing cooldown in seconds
    pub cooldown: f32,
}

impl Default for MeleeWeapon {
    fn default() -> Self {
        Self {
            damage: 0.4,
            reach: 2.0,
            cooldown: 0.5,
        }
    }
}

/// Per-entity melee swing state.
#[derive(Component, Default)]
pub struct MeleeState {
    /// Seconds until the next swing is allowed
    pub cooldown_remaining: f32,
}

impl MeleeState {
    pub fn can_swing(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_damage_clamps_at_zero() {
        let mut health = Health::new(1.0);
        assert_eq!(health.take_damage(0.3), 0.3);
        assert!((health.current - 0.7).abs() < 1e-6);

        // Overkill only removes what is left.
        health.take_damage(0.6);
        let actual = health.take_damage(0.3);
        assert!((actual - 0.1).abs() < 1e-5);
        assert!(health.current >= 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn percentage_tracks_current_over_maximum() {
        let mut health = Health::new(1.0);
        health.take_damage(0.25);
        assert!((health.percentage() - 0.75).abs() < 1e-6);
    }
}
