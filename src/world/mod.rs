//! World module - the arena, its collision layers, and lifecycle.

mod arena;
mod plugin;

pub use arena::{ArenaEntity, ACTOR_GROUP, OCCLUDER_GROUP};
pub use plugin::WorldPlugin;
