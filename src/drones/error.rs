//! Error types for drone data loading and construction.

use thiserror::Error;

/// Errors that can occur when loading or validating drone data.
#[derive(Debug, Error)]
pub enum DroneDataError {
    /// Definition file could not be read.
    #[error("Failed to read drone definition '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A drone needs at least one waypoint to patrol between.
    #[error("Patrol route must contain at least one waypoint")]
    EmptyPatrolRoute,

    /// A drone must always be able to drop something on death.
    #[error("Drop table must contain at least one item")]
    EmptyDropTable,
}
