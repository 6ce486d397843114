//! Simulation error types

use thiserror::Error;

/// Errors raised while setting up a run
///
/// Runs themselves are total: once a scenario is accepted, every step of
/// either script completes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration rejected before any event was logged
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Scenario file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::ConfigParse(err.to_string())
    }
}
