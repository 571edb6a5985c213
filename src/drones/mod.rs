//! Drones module - the sentry drone behavior controller.
//!
//! A drone patrols a cyclic waypoint route, listens and looks for the
//! player, chases and shoots on sight, and drops loot when destroyed.
//! The state machine lives in `behavior`; `perception`, `combat`, `nav`,
//! and `vitality` supply the signals and effects it coordinates.

pub mod behavior;
pub mod combat;
mod components;
pub mod data;
mod error;
pub mod nav;
pub mod perception;
mod plugin;
mod spawning;
pub mod vitality;

pub use components::*;
pub use data::DroneRegistry;
pub use error::DroneDataError;
pub use nav::NavAgent;
pub use plugin::DronesPlugin;
pub use spawning::{spawn_drones, DroneSpawn};
