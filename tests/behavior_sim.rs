//! End-to-end behavior tests running the full drone system chain in a
//! headless App. No physics context is present, so every line of sight
//! is clear; occlusion-specific cases live in the perception unit tests.

use bevy::prelude::*;

use drone_sentry::combat::Health;
use drone_sentry::core::{DamageEvent, DeathEvent};
use drone_sentry::drones::{
    behavior, combat, nav, vitality, Drone, DroneState, DroneStats, DropTable, LootKind, NavAgent,
    PatrolRoute, ShootCooldown,
};
use drone_sentry::player::Player;

fn sim_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .insert_resource(vitality::LootRng::seeded(1))
        .add_systems(
            Update,
            (
                vitality::apply_drone_damage,
                vitality::handle_drone_death,
                combat::tick_shoot_cooldowns,
                behavior::drone_behavior,
                nav::drive_nav_agents,
            )
                .chain(),
        );
    app
}

fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Player, Transform::from_translation(position)))
        .id()
}

fn spawn_drone(app: &mut App, position: Vec3, route: Vec<Vec3>) -> Entity {
    let stats = DroneStats::default();
    app.world_mut()
        .spawn((
            Drone,
            DroneState::default(),
            Health::new(stats.max_health),
            ShootCooldown::new(stats.attack_cooldown),
            NavAgent::new(stats.move_speed),
            PatrolRoute::new(route).unwrap(),
            DropTable::new(vec![LootKind::Scrap]).unwrap(),
            Transform::from_translation(position),
            stats,
        ))
        .id()
}

#[test]
fn undisturbed_drone_walks_its_route() {
    let mut app = sim_app();
    // Player far outside hearing range.
    spawn_player(&mut app, Vec3::new(100.0, 0.0, 100.0));
    let drone = spawn_drone(
        &mut app,
        Vec3::ZERO,
        vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)],
    );

    // Idle -> Patrol, arrive at the spawn waypoint, step to the next one.
    for _ in 0..4 {
        app.update();
    }

    assert_eq!(*app.world().get::<DroneState>(drone).unwrap(), DroneState::Patrol);
    let route = app.world().get::<PatrolRoute>(drone).unwrap();
    assert_eq!(route.current_index(), 1);
    let agent = app.world().get::<NavAgent>(drone).unwrap();
    assert_eq!(agent.destination(), Some(Vec3::new(0.0, 0.0, 6.0)));
}

#[test]
fn noise_behind_the_drone_triggers_a_halted_sweep() {
    let mut app = sim_app();
    // Within hearing, but behind the drone (it faces -Z), so unseen.
    spawn_player(&mut app, Vec3::new(0.0, 0.0, 3.0));
    let drone = spawn_drone(&mut app, Vec3::ZERO, vec![Vec3::new(0.0, 0.0, -6.0)]);

    for _ in 0..3 {
        app.update();
    }

    assert!(matches!(
        app.world().get::<DroneState>(drone).unwrap(),
        DroneState::Alert { .. }
    ));
    assert!(app.world().get::<NavAgent>(drone).unwrap().has_arrived());
}

#[test]
fn exposed_target_in_range_is_fired_upon() {
    let mut app = sim_app();
    // Dead ahead, inside hearing, the vision cone, and attack range.
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -3.0));
    let drone = spawn_drone(&mut app, Vec3::ZERO, vec![Vec3::new(0.0, 0.0, 6.0)]);

    // Idle -> Patrol -> Alert -> Attack, then one tick firing.
    for _ in 0..4 {
        app.update();
    }

    assert_eq!(*app.world().get::<DroneState>(drone).unwrap(), DroneState::Attack);
    assert!(!app.world().get::<ShootCooldown>(drone).unwrap().ready);

    let shots: Vec<_> = app
        .world_mut()
        .resource_mut::<Events<DamageEvent>>()
        .drain()
        .filter(|event| event.target == player)
        .collect();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].source, drone);
    assert!((shots[0].amount - 0.3).abs() < 1e-5);
}

#[test]
fn cooldown_holds_fire_across_consecutive_attack_ticks() {
    let mut app = sim_app();
    let player = spawn_player(&mut app, Vec3::new(0.0, 0.0, -3.0));
    spawn_drone(&mut app, Vec3::ZERO, vec![Vec3::new(0.0, 0.0, 6.0)]);

    // Plenty of Attack ticks, far fewer than the 2 second cooldown allows.
    // Events are double-buffered, so tally them frame by frame.
    let mut shots = 0;
    for _ in 0..10 {
        app.update();
        shots += app
            .world_mut()
            .resource_mut::<Events<DamageEvent>>()
            .drain()
            .filter(|event| event.target == player)
            .count();
    }
    assert_eq!(shots, 1);
}

#[test]
fn wounded_drone_abandons_its_route_for_a_sweep() {
    let mut app = sim_app();
    spawn_player(&mut app, Vec3::new(100.0, 0.0, 100.0));
    let drone = spawn_drone(
        &mut app,
        Vec3::ZERO,
        vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)],
    );

    for _ in 0..4 {
        app.update();
    }
    assert_eq!(*app.world().get::<DroneState>(drone).unwrap(), DroneState::Patrol);

    app.world_mut().send_event(DamageEvent {
        target: drone,
        source: Entity::PLACEHOLDER,
        amount: 0.3,
    });
    app.update();

    assert!(matches!(
        app.world().get::<DroneState>(drone).unwrap(),
        DroneState::Alert { .. }
    ));
    let health = app.world().get::<Health>(drone).unwrap();
    assert!((health.current - 0.7).abs() < 1e-5);
}
