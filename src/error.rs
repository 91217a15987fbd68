// src/error.rs

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Simulation parameters were rejected before the run started.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    /// The default scenario cannot be deleted.
    #[error("scenario '{0}' is protected")]
    ProtectedScenario(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
