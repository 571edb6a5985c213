//! Minimal navigation agent - the movement collaborator for drones.
//!
//! Stands in for a navmesh agent at its interface boundary: it accepts a
//! destination, can be halted, and reports arrival. Travel is a straight
//! line toward the destination; there is no pathfinding here.

use bevy::prelude::*;

/// Horizontal distance at which a destination counts as reached.
pub const ARRIVE_RADIUS: f32 = 0.25;

/// Navigation state for one drone.
#[derive(Component, Debug)]
pub struct NavAgent {
    destination: Option<Vec3>,
    speed: f32,
    stopped: bool,
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            destination: None,
            speed,
            stopped: false,
        }
    }

    /// Request movement to a position. Also resumes a halted agent.
    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.stopped = false;
    }

    /// Stop in place and drop any outstanding destination.
    pub fn halt(&mut self) {
        self.destination = None;
        self.stopped = true;
    }

    /// True when no path remains and none is pending.
    pub fn has_arrived(&self) -> bool {
        self.destination.is_none()
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

/// Move nav agents toward their destination and face the travel direction.
pub fn drive_nav_agents(time: Res<Time>, mut query: Query<(&mut Transform, &mut NavAgent)>) {
    for (mut transform, mut agent) in query.iter_mut() {
        if agent.stopped {
            continue;
        }
        let Some(destination) = agent.destination else {
            continue;
        };

        let to_dest = Vec3::new(
            destination.x - transform.translation.x,
            0.0,
            destination.z - transform.translation.z,
        );
        let distance = to_dest.length();

        if distance <= ARRIVE_RADIUS {
            agent.destination = None;
            continue;
        }

        let direction = to_dest / distance;
        let step = (agent.speed * time.delta_secs()).min(distance);
        transform.translation += direction * step;

        let look_target = transform.translation + direction;
        transform.look_at(look_target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_agent_reports_arrived() {
        let agent = NavAgent::new(2.0);
        assert!(agent.has_arrived());
    }

    #[test]
    fn destination_request_clears_arrival() {
        let mut agent = NavAgent::new(2.0);
        agent.set_destination(Vec3::new(3.0, 0.0, 0.0));
        assert!(!agent.has_arrived());
        assert_eq!(agent.destination(), Some(Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn halt_drops_the_destination() {
        let mut agent = NavAgent::new(2.0);
        agent.set_destination(Vec3::new(3.0, 0.0, 0.0));
        agent.halt();
        assert!(agent.has_arrived());
        assert_eq!(agent.destination(), None);
    }

    #[test]
    fn set_destination_resumes_a_halted_agent() {
        let mut agent = NavAgent::new(2.0);
        agent.halt();
        agent.set_destination(Vec3::new(1.0, 0.0, 0.0));
        assert!(!agent.has_arrived());
        assert!(!agent.stopped);
    }
}
