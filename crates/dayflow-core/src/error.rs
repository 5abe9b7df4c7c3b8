//! Engine error types.
//!
//! Pipeline steps report failures with these; the orchestrator catches
//! them at its boundary and converts them into a failed
//! `SchedulingResult`. Nothing here ever reaches the engine's caller as
//! an `Err`.

use thiserror::Error;

/// Error raised inside the placement pipeline.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The request's date key is not a local "YYYY-MM-DD" date.
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Preferences that leave no awake window to place into.
    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),
}

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
