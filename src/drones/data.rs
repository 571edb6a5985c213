//! Drone data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::{DroneStats, DropTable, LootKind};
use super::error::DroneDataError;

/// Drone definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct DroneDefinition {
    pub name: String,
    pub max_health: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub hearing_radius: f32,
    pub sight_distance: f32,
    pub vision_cone_degrees: f32,
    pub eye_height: f32,
    pub target_eye_height: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    pub drops: Vec<LootKind>,
}

impl DroneDefinition {
    /// Convert to a DroneStats component.
    pub fn to_stats(&self) -> DroneStats {
        DroneStats {
            max_health: self.max_health,
            move_speed: self.move_speed,
            rotation_speed: self.rotation_speed,
            hearing_radius: self.hearing_radius,
            sight_distance: self.sight_distance,
            vision_cone_degrees: self.vision_cone_degrees,
            eye_height: self.eye_height,
            target_eye_height: self.target_eye_height,
            attack_range: self.attack_range,
            attack_damage: self.attack_damage,
            attack_cooldown: self.attack_cooldown,
        }
    }

    /// Build the validated drop table for this definition.
    pub fn drop_table(&self) -> Result<DropTable, DroneDataError> {
        DropTable::new(self.drops.clone())
    }
}

/// Resource holding all loaded drone definitions.
#[derive(Resource, Default)]
pub struct DroneRegistry {
    pub definitions: HashMap<String, DroneDefinition>,
}

impl DroneRegistry {
    /// Get a drone definition by type name.
    pub fn get(&self, drone_type: &str) -> Option<&DroneDefinition> {
        self.definitions.get(drone_type)
    }
}

/// Load all drone definitions from the assets/data/drones/ directory.
///
/// Definitions with an empty drop table are rejected here, at load time,
/// rather than surfacing as a failure at first death.
pub fn load_drone_definitions(mut registry: ResMut<DroneRegistry>) {
    let drones_dir = Path::new("assets/data/drones");

    if !drones_dir.exists() {
        warn!("Drone definitions directory not found: {:?}", drones_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(drones_dir) else {
        warn!("Failed to read drone definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let drone_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_definition(&path) {
                Ok(definition) => {
                    info!("Loaded drone definition: {} ({})", definition.name, drone_type);
                    registry.definitions.insert(drone_type, definition);
                }
                Err(e) => {
                    error!("Rejected drone definition {:?}: {}", path, e);
                }
            }
        }
    }

    info!("Loaded {} drone definitions", registry.definitions.len());
}

fn load_definition(path: &Path) -> Result<DroneDefinition, DroneDataError> {
    let contents = fs::read_to_string(path).map_err(|e| DroneDataError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    let definition: DroneDefinition =
        ron::from_str(&contents).map_err(|e| DroneDataError::ParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

    // Fail fast on construction-time precondition violations.
    definition.drop_table()?;

    Ok(definition)
}
