//! Custom error types for carryover
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for carryover operations
#[derive(Error, Debug)]
pub enum CarryoverError {
    /// Settings passed to the store were not a JSON object
    #[error("Invalid settings: expected a JSON object")]
    InvalidSettings,

    /// Backup file is missing, unreadable, or not a JSON object
    #[error("Backup file unavailable: {0}")]
    BackupUnavailable(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl CarryoverError {
    /// Create a "backup unavailable" error for the given file path
    pub fn backup_unavailable(path: impl Into<String>) -> Self {
        Self::BackupUnavailable(path.into())
    }

    /// Check if this is an invalid-settings error
    pub fn is_invalid_settings(&self) -> bool {
        matches!(self, Self::InvalidSettings)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CarryoverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CarryoverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for carryover operations
pub type CarryoverResult<T> = Result<T, CarryoverError>;
