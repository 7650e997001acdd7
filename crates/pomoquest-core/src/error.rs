//! Core error types for pomoquest-core.
//!
//! Nothing in here is fatal to the timer or the progress engine: callers
//! log these and degrade to "feature silently unavailable".

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomoquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Push relay errors
    #[error("Push error: {0}")]
    Push(#[from] PushError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Push relay errors.
#[derive(Error, Debug)]
pub enum PushError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("Relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Relay answered with a non-2xx status
    #[error("Relay rejected notification (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Relay URL in the configuration is unusable
    #[error("Invalid relay URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Unknown profile name
    #[error("Unknown profile '{0}' (expected junior, middle or senior)")]
    UnknownProfile(String),

    /// Unknown phase name
    #[error("Unknown phase '{0}' (expected work or break)")]
    UnknownPhase(String),

    /// Unknown notification permission
    #[error("Unknown notification permission '{0}' (expected granted, denied or default)")]
    UnknownPermission(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_push_formats_status_and_message() {
        let err = CoreError::from(PushError::Rejected {
            status: 502,
            message: "upstream gone".into(),
        });
        assert_eq!(
            err.to_string(),
            "Push error: Relay rejected notification (HTTP 502): upstream gone"
        );
    }

    #[test]
    fn rusqlite_errors_become_query_failures() {
        let err: CoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::QueryFailed(_))
        ));
    }
}
