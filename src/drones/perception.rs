//! Drone senses - hearing, the vision cone, and line-of-sight.
//!
//! These are pure geometry functions over positions and directions; the
//! occlusion test is injected as a closure so the behavior system can back
//! it with a physics raycast while tests supply a fake.

use bevy::prelude::*;

use super::components::DroneStats;

/// True when the target is within hearing radius. Hearing penetrates
/// obstacles, so there is no occlusion check.
pub fn hears_target(stats: &DroneStats, drone_pos: Vec3, target_pos: Vec3) -> bool {
    drone_pos.distance(target_pos) <= stats.hearing_radius
}

/// Distance plus horizontal field-of-view test.
///
/// Both the forward direction and the direction to the target are flattened
/// onto the horizontal plane before comparing against the cone half-angle.
fn within_cone(
    cone_degrees: f32,
    sight_distance: f32,
    from: Vec3,
    forward: Vec3,
    to: Vec3,
) -> bool {
    if from.distance(to) >= sight_distance {
        return false;
    }

    let to_target = Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero();
    let forward_flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();

    forward_flat.dot(to_target) > (cone_degrees.to_radians() / 2.0).cos()
}

/// Eye-to-eye ray for the occlusion test: origin, unit direction, length.
pub fn eye_ray(stats: &DroneStats, drone_pos: Vec3, target_pos: Vec3) -> (Vec3, Vec3, f32) {
    let origin = drone_pos + Vec3::Y * stats.eye_height;
    let target_eyes = target_pos + Vec3::Y * stats.target_eye_height;
    let direction = target_eyes - origin;
    let length = direction.length();
    (origin, direction.normalize_or_zero(), length)
}

/// True when the drone sees the target: inside the sight distance, inside
/// the horizontal vision cone, and with a clear eye-to-eye line against
/// the occluder mask (`occluded` returns true if the ray hits anything).
pub fn sees_target(
    stats: &DroneStats,
    drone_pos: Vec3,
    drone_forward: Vec3,
    target_pos: Vec3,
    occluded: impl FnOnce(Vec3, Vec3, f32) -> bool,
) -> bool {
    if !within_cone(
        stats.vision_cone_degrees,
        stats.sight_distance,
        drone_pos,
        drone_forward,
        target_pos,
    ) {
        return false;
    }

    let (origin, direction, length) = eye_ray(stats, drone_pos, target_pos);
    if length <= f32::EPSILON {
        return true;
    }

    !occluded(origin, direction, length)
}

/// Whether an observer (the player) currently has the drone inside their
/// own view cone. Same distance/cone formula as [`sees_target`] evaluated
/// from the observer's side, but deliberately without the occlusion
/// raycast, so the health indicator stays visible through walls. This
/// asymmetry is intentional and only drives UI; it never feeds behavior
/// transitions.
pub fn visible_to_observer(
    stats: &DroneStats,
    observer_pos: Vec3,
    observer_forward: Vec3,
    drone_pos: Vec3,
) -> bool {
    within_cone(
        stats.vision_cone_degrees,
        stats.sight_distance,
        observer_pos,
        observer_forward,
        drone_pos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DroneStats {
        DroneStats::default()
    }

    const FORWARD: Vec3 = Vec3::NEG_Z;

    #[test]
    fn hearing_is_a_pure_distance_check() {
        let s = stats();
        assert!(hears_target(&s, Vec3::ZERO, Vec3::new(0.0, 0.0, -4.5)));
        assert!(!hears_target(&s, Vec3::ZERO, Vec3::new(0.0, 0.0, -4.6)));
    }

    #[test]
    fn hearing_penetrates_obstacles() {
        // A target behind an occluder and outside the cone is still heard.
        let s = stats();
        let behind_wall = Vec3::new(0.0, 0.0, 3.0);
        assert!(hears_target(&s, Vec3::ZERO, behind_wall));
        assert!(!sees_target(&s, Vec3::ZERO, FORWARD, behind_wall, |_, _, _| true));
    }

    #[test]
    fn sees_target_straight_ahead_with_clear_line() {
        let s = stats();
        let target = Vec3::new(0.0, 0.0, -5.0);
        assert!(sees_target(&s, Vec3::ZERO, FORWARD, target, |_, _, _| false));
    }

    #[test]
    fn occluder_blocks_sight_but_not_the_cone_test() {
        let s = stats();
        let target = Vec3::new(0.0, 0.0, -5.0);
        assert!(!sees_target(&s, Vec3::ZERO, FORWARD, target, |_, _, _| true));
    }

    #[test]
    fn target_outside_half_angle_is_not_seen() {
        let s = stats();
        // 45 degrees off axis; the 60 degree cone allows only 30 per side.
        let target = Vec3::new(-3.0, 0.0, -3.0);
        assert!(!sees_target(&s, Vec3::ZERO, FORWARD, target, |_, _, _| false));
    }

    #[test]
    fn target_just_inside_half_angle_is_seen() {
        let s = stats();
        // 20 degrees off axis, well inside the 30 degree half-angle.
        let angle = 20.0_f32.to_radians();
        let target = Vec3::new(-3.0 * angle.sin(), 0.0, -3.0 * angle.cos());
        assert!(sees_target(&s, Vec3::ZERO, FORWARD, target, |_, _, _| false));
    }

    #[test]
    fn sight_cuts_off_at_sight_distance() {
        let s = stats();
        assert!(!sees_target(
            &s,
            Vec3::ZERO,
            FORWARD,
            Vec3::new(0.0, 0.0, -8.0),
            |_, _, _| false,
        ));
        assert!(sees_target(
            &s,
            Vec3::ZERO,
            FORWARD,
            Vec3::new(0.0, 0.0, -7.9),
            |_, _, _| false,
        ));
    }

    #[test]
    fn cone_test_ignores_vertical_offset() {
        let s = stats();
        // Target above the drone but dead ahead horizontally.
        let target = Vec3::new(0.0, 1.5, -5.0);
        assert!(sees_target(&s, Vec3::ZERO, FORWARD, target, |_, _, _| false));
    }

    #[test]
    fn eye_ray_runs_between_eye_heights() {
        let s = stats();
        let (origin, direction, length) = eye_ray(&s, Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(origin, Vec3::new(0.0, 1.8, 0.0));
        assert!((length - 4.0).abs() < 1e-5);
        assert!((direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn observer_visibility_ignores_occluders() {
        // Same geometry that fails sees_target under occlusion still counts
        // as visible from the observer's side: the UI check skips the ray.
        let s = stats();
        let drone_pos = Vec3::new(0.0, 0.0, -5.0);
        assert!(visible_to_observer(&s, Vec3::ZERO, FORWARD, drone_pos));
        assert!(!sees_target(&s, drone_pos, Vec3::Z, Vec3::ZERO, |_, _, _| true));
    }

    #[test]
    fn observer_visibility_still_requires_the_cone() {
        let s = stats();
        let behind = Vec3::new(0.0, 0.0, 5.0);
        assert!(!visible_to_observer(&s, Vec3::ZERO, FORWARD, behind));
    }
}
