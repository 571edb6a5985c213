//! The drone behavior state machine.
//!
//! Each frame the dispatch system senses the world once, runs the current
//! state's per-tick behavior, then computes the next state through the pure
//! transition function [`next_state`]. Keeping the transition table pure
//! makes every row of it testable without spinning up an `App`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::combat::attempt_attack;
use super::components::{Drone, DroneState, DroneStats, PatrolRoute, ShootCooldown};
use super::nav::NavAgent;
use super::perception;
use crate::core::DamageEvent;
use crate::player::Player;
use crate::world::OCCLUDER_GROUP;

/// A drone gives up an Alert sweep after one full turn.
pub const FULL_SWEEP_DEGREES: f32 = 360.0;

/// Everything the state machine senses during one tick.
///
/// Gathered fresh each frame; a condition missed this tick is simply
/// re-checked next tick.
#[derive(Debug, Clone, Copy)]
pub struct TickSignals {
    /// Target within hearing radius.
    pub hears: bool,
    /// Target within the vision cone with a clear line of sight.
    pub sees: bool,
    /// Target within weapon range.
    pub in_attack_range: bool,
    /// Degrees of Alert sweep covered this tick (rotation speed x delta).
    pub spin_step: f32,
}

/// The transition table: (current state, sensed signals) -> next state.
///
/// Pure and total; entry actions happen in the dispatch system when the
/// returned state differs from the current one. `Die` is terminal and
/// `Hit` resolves out through damage application, so neither is produced
/// here from a live state.
pub fn next_state(state: &DroneState, signals: &TickSignals) -> DroneState {
    match state {
        DroneState::Idle => DroneState::Patrol,

        DroneState::Patrol => {
            if signals.hears {
                DroneState::Alert { spun_degrees: 0.0 }
            } else {
                DroneState::Patrol
            }
        }

        DroneState::Alert { spun_degrees } => {
            let spun = spun_degrees + signals.spin_step;
            if signals.sees {
                // Skip Chase entirely when the target is already in range.
                if signals.in_attack_range {
                    DroneState::Attack
                } else {
                    DroneState::Chase
                }
            } else if spun >= FULL_SWEEP_DEGREES {
                DroneState::Patrol
            } else {
                DroneState::Alert { spun_degrees: spun }
            }
        }

        DroneState::Chase => {
            if !signals.hears {
                DroneState::Patrol
            } else if signals.sees && signals.in_attack_range {
                DroneState::Attack
            } else {
                DroneState::Chase
            }
        }

        DroneState::Attack => {
            if !signals.sees {
                DroneState::Alert { spun_degrees: 0.0 }
            } else if !signals.in_attack_range {
                DroneState::Chase
            } else {
                DroneState::Attack
            }
        }

        // Damage application normally resolves Hit to Alert or Die in the
        // same call; this keeps the table total if a Hit ever survives to
        // the next dispatch.
        DroneState::Hit => DroneState::Alert { spun_degrees: 0.0 },

        DroneState::Die => DroneState::Die,
    }
}

/// Per-frame dispatch: sense, run the current state's behavior, transition.
#[allow(clippy::type_complexity)]
pub fn drone_behavior(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<(Entity, &Transform), (With<Player>, Without<Drone>)>,
    mut drone_query: Query<
        (
            Entity,
            &mut Transform,
            &DroneStats,
            &mut DroneState,
            &mut NavAgent,
            &mut PatrolRoute,
            &mut ShootCooldown,
        ),
        (With<Drone>, Without<Player>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, player_transform)) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation;

    for (entity, mut transform, stats, mut state, mut nav, mut route, mut cooldown) in
        drone_query.iter_mut()
    {
        if *state == DroneState::Die {
            continue;
        }

        let occluded = |origin: Vec3, direction: Vec3, length: f32| -> bool {
            let Ok(context) = rapier_context.get_single() else {
                return false;
            };
            context
                .cast_ray(
                    origin,
                    direction,
                    length,
                    true,
                    QueryFilter::default()
                        .groups(CollisionGroups::new(Group::ALL, OCCLUDER_GROUP)),
                )
                .is_some()
        };

        let signals = TickSignals {
            hears: perception::hears_target(stats, transform.translation, player_pos),
            sees: perception::sees_target(
                stats,
                transform.translation,
                transform.forward().as_vec3(),
                player_pos,
                occluded,
            ),
            in_attack_range: transform.translation.distance(player_pos) <= stats.attack_range,
            spin_step: stats.rotation_speed * time.delta_secs(),
        };

        // Per-tick behavior of the current state, before the transition.
        match *state {
            DroneState::Patrol => {
                if nav.has_arrived() {
                    let next_waypoint = route.advance();
                    nav.set_destination(next_waypoint);
                }
            }
            DroneState::Alert { .. } => {
                transform.rotate_y(signals.spin_step.to_radians());
            }
            DroneState::Chase => {
                nav.set_destination(player_pos);
            }
            DroneState::Attack => {
                attempt_attack(
                    entity,
                    player_entity,
                    signals.in_attack_range,
                    stats,
                    &mut cooldown,
                    &mut damage_events,
                );
            }
            _ => {}
        }

        let next = next_state(&state, &signals);
        let entered_new_state =
            std::mem::discriminant(&*state) != std::mem::discriminant(&next);

        if entered_new_state {
            apply_entry_actions(&next, &mut nav, &route, transform.translation);
        }
        *state = next;
    }
}

/// One-time actions on entering a state.
fn apply_entry_actions(next: &DroneState, nav: &mut NavAgent, route: &PatrolRoute, _position: Vec3) {
    match next {
        // Resume the route from the persisted waypoint index.
        DroneState::Patrol => nav.set_destination(route.current_waypoint()),
        // Stop in place; the sweep itself happens in the per-tick body.
        DroneState::Alert { .. } => nav.halt(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> TickSignals {
        TickSignals {
            hears: false,
            sees: false,
            in_attack_range: false,
            spin_step: 10.0,
        }
    }

    #[test]
    fn idle_immediately_hands_off_to_patrol() {
        assert_eq!(next_state(&DroneState::Idle, &quiet()), DroneState::Patrol);
    }

    #[test]
    fn patrol_holds_until_the_target_is_heard() {
        assert_eq!(next_state(&DroneState::Patrol, &quiet()), DroneState::Patrol);

        let heard = TickSignals {
            hears: true,
            ..quiet()
        };
        assert_eq!(
            next_state(&DroneState::Patrol, &heard),
            DroneState::Alert { spun_degrees: 0.0 },
        );
    }

    #[test]
    fn heard_but_unseen_target_alerts_instead_of_chasing() {
        // Target behind an occluder and outside the cone: hearing fires,
        // sight does not.
        let heard_only = TickSignals {
            hears: true,
            sees: false,
            ..quiet()
        };
        assert_eq!(
            next_state(&DroneState::Patrol, &heard_only),
            DroneState::Alert { spun_degrees: 0.0 },
        );
    }

    #[test]
    fn alert_accumulates_spin_while_nothing_is_sensed() {
        let state = DroneState::Alert { spun_degrees: 40.0 };
        assert_eq!(
            next_state(&state, &quiet()),
            DroneState::Alert { spun_degrees: 50.0 },
        );
    }

    #[test]
    fn alert_returns_to_patrol_after_a_full_sweep() {
        let state = DroneState::Alert {
            spun_degrees: 355.0,
        };
        assert_eq!(next_state(&state, &quiet()), DroneState::Patrol);
    }

    #[test]
    fn alert_chases_a_visible_target_out_of_range() {
        let seen = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: false,
            spin_step: 10.0,
        };
        let state = DroneState::Alert { spun_degrees: 90.0 };
        assert_eq!(next_state(&state, &seen), DroneState::Chase);
    }

    #[test]
    fn alert_attacks_directly_when_target_already_in_range() {
        // Straight to Attack, skipping Chase.
        let seen_close = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: true,
            spin_step: 10.0,
        };
        let state = DroneState::Alert { spun_degrees: 90.0 };
        assert_eq!(next_state(&state, &seen_close), DroneState::Attack);
    }

    #[test]
    fn sighting_beats_the_completed_sweep() {
        let seen_late = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: false,
            spin_step: 10.0,
        };
        let state = DroneState::Alert {
            spun_degrees: 359.0,
        };
        assert_eq!(next_state(&state, &seen_late), DroneState::Chase);
    }

    #[test]
    fn chase_gives_up_when_target_is_no_longer_heard() {
        assert_eq!(next_state(&DroneState::Chase, &quiet()), DroneState::Patrol);
    }

    #[test]
    fn chase_continues_while_heard_but_unseen() {
        let heard = TickSignals {
            hears: true,
            ..quiet()
        };
        assert_eq!(next_state(&DroneState::Chase, &heard), DroneState::Chase);
    }

    #[test]
    fn chase_closes_to_attack_when_visible_and_in_range() {
        let close = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: true,
            spin_step: 10.0,
        };
        assert_eq!(next_state(&DroneState::Chase, &close), DroneState::Attack);
    }

    #[test]
    fn attack_falls_back_to_alert_when_sight_is_lost() {
        let lost = TickSignals {
            hears: true,
            sees: false,
            in_attack_range: true,
            spin_step: 10.0,
        };
        assert_eq!(
            next_state(&DroneState::Attack, &lost),
            DroneState::Alert { spun_degrees: 0.0 },
        );
    }

    #[test]
    fn attack_resumes_chase_when_target_slips_out_of_range() {
        let escaped = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: false,
            spin_step: 10.0,
        };
        assert_eq!(next_state(&DroneState::Attack, &escaped), DroneState::Chase);
    }

    #[test]
    fn attack_holds_while_conditions_hold() {
        let holding = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: true,
            spin_step: 10.0,
        };
        assert_eq!(next_state(&DroneState::Attack, &holding), DroneState::Attack);
    }

    #[test]
    fn hit_resolves_to_a_fresh_alert() {
        assert_eq!(
            next_state(&DroneState::Hit, &quiet()),
            DroneState::Alert { spun_degrees: 0.0 },
        );
    }

    #[test]
    fn die_is_terminal() {
        let everything = TickSignals {
            hears: true,
            sees: true,
            in_attack_range: true,
            spin_step: 10.0,
        };
        assert_eq!(next_state(&DroneState::Die, &everything), DroneState::Die);
    }

    #[test]
    fn spin_strictly_increases_until_an_exit_fires() {
        let mut state = DroneState::Alert { spun_degrees: 0.0 };
        let mut previous = 0.0;
        loop {
            state = next_state(&state, &quiet());
            match state {
                DroneState::Alert { spun_degrees } => {
                    assert!(spun_degrees > previous);
                    previous = spun_degrees;
                }
                DroneState::Patrol => break,
                other => panic!("unexpected state during sweep: {other:?}"),
            }
        }
        assert!(previous < FULL_SWEEP_DEGREES);
    }
}
