//! Core error types for rosterlist-core.
//!
//! This module defines the error hierarchy using thiserror. Most read-side
//! problems (corrupted persisted state, orphaned characters) are recovered
//! locally and never reach these types; what remains are failures the caller
//! has to see, such as a failed write or an invalid catalog file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rosterlist-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session lifecycle errors
    #[error("Checklist error: {0}")]
    Checklist(#[from] ChecklistError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
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

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Catalog source errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog content is structurally invalid
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A character or task has an empty name
    #[error("Empty {what} name")]
    EmptyName { what: &'static str },

    /// Two characters share a name
    #[error("Duplicate character name: {0}")]
    DuplicateCharacter(String),

    /// A character lists the same task twice
    #[error("Duplicate task '{task}' for character '{character}'")]
    DuplicateTask { character: String, task: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Checklist session errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChecklistError {
    /// A mutation arrived before the scheduled reset was evaluated
    #[error("Checklist is still loading; call initialize() first")]
    NotReady,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
