mod config;
pub mod database;
mod memory;

pub use config::{CatalogConfig, Config, ResetConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Application name used to namespace persisted keys.
pub const DEFAULT_APP_NAME: &str = "lost-ark-check-list";

/// String-keyed persistence used by the checklist session.
///
/// Mirrors a browser-style local storage: one string value per key,
/// no transactions.
pub trait KeyValueStore {
    /// Get a value, `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// The two keys an app instance persists under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub completion_state: String,
    pub last_checked: String,
}

impl StorageKeys {
    pub fn new(app_name: &str) -> Self {
        Self {
            completion_state: format!("{app_name}-taskCompletionState"),
            last_checked: format!("{app_name}-lastCheckedDate"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME)
    }
}

/// Returns `~/.config/rosterlist[-dev]/` based on ROSTERLIST_ENV.
///
/// Set ROSTERLIST_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ROSTERLIST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rosterlist-dev")
    } else {
        base_dir.join("rosterlist")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
