//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The app name used to namespace persisted keys
//! - Reset boundaries (hour of day, weekly anchor day) and the daily task list
//! - An optional catalog file overriding the bundled roster
//!
//! Configuration is stored at `~/.config/rosterlist/config.toml`.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::{data_dir, StorageKeys, DEFAULT_APP_NAME};
use crate::catalog::Catalog;
use crate::error::{CatalogError, ConfigError};
use crate::reset::{ResetPolicy, DEFAULT_DAILY_TASK, DEFAULT_RESET_HOUR, DEFAULT_WEEKLY_RESET_DAY};

/// Reset schedule configuration. All times are UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetConfig {
    #[serde(default = "default_reset_hour")]
    pub reset_hour: u32,
    #[serde(default = "default_weekly_reset_day")]
    pub weekly_reset_day: Weekday,
    /// Tasks the daily reset marks as not done.
    #[serde(default = "default_daily_tasks")]
    pub daily_tasks: Vec<String>,
}

/// Catalog source configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file. The bundled roster is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/rosterlist/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub reset: ResetConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.into()
}
fn default_reset_hour() -> u32 {
    DEFAULT_RESET_HOUR
}
fn default_weekly_reset_day() -> Weekday {
    DEFAULT_WEEKLY_RESET_DAY
}
fn default_daily_tasks() -> Vec<String> {
    vec![DEFAULT_DAILY_TASK.into()]
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            reset_hour: default_reset_hour(),
            weekly_reset_day: default_weekly_reset_day(),
            daily_tasks: default_daily_tasks(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            reset: ResetConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    serde_json::Value::Null if value.is_empty() => serde_json::Value::Null,
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/rosterlist"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the existing type.
    ///
    /// The change is validated but not written; call [`Config::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into a valid configuration.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.reset_policy()?;
        *self = updated;
        Ok(())
    }

    /// Validated reset policy.
    ///
    /// # Errors
    /// Returns an error if the reset hour is out of range.
    pub fn reset_policy(&self) -> Result<ResetPolicy, ConfigError> {
        ResetPolicy::new(
            self.reset.reset_hour,
            self.reset.weekly_reset_day,
            self.reset.daily_tasks.clone(),
        )
        .map_err(|e| ConfigError::InvalidValue {
            key: "reset.reset_hour".to_string(),
            message: e.to_string(),
        })
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(&self.app_name)
    }

    /// The configured catalog, or the bundled roster.
    ///
    /// # Errors
    /// Returns an error if a configured catalog file cannot be loaded.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog.path {
            Some(path) => Catalog::from_file(Path::new(path)),
            None => Ok(Catalog::bundled()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.app_name, "lost-ark-check-list");
        assert_eq!(cfg.reset.reset_hour, 10);
        assert_eq!(cfg.reset.weekly_reset_day, Weekday::Wed);
        assert_eq!(cfg.reset.daily_tasks, vec!["World Event".to_string()]);
        assert!(cfg.catalog.path.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[reset]\nreset_hour = 4\n").unwrap();
        assert_eq!(cfg.reset.reset_hour, 4);
        assert_eq!(cfg.reset.weekly_reset_day, Weekday::Wed);
        assert_eq!(cfg.app_name, "lost-ark-check-list");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("reset.reset_hour").as_deref(), Some("10"));
        assert_eq!(cfg.get("app_name").as_deref(), Some("lost-ark-check-list"));
        assert_eq!(cfg.get("reset.weekly_reset_day").as_deref(), Some("Wed"));
        assert!(cfg.get("reset.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set("reset.reset_hour", "4").unwrap();
        assert_eq!(cfg.reset.reset_hour, 4);
    }

    #[test]
    fn set_parses_weekday_names() {
        let mut cfg = Config::default();
        cfg.set("reset.weekly_reset_day", "thursday").unwrap();
        assert_eq!(cfg.reset.weekly_reset_day, Weekday::Thu);
        assert!(cfg.set("reset.weekly_reset_day", "someday").is_err());
    }

    #[test]
    fn set_accepts_json_arrays() {
        let mut cfg = Config::default();
        cfg.set("reset.daily_tasks", r#"["World Event", "Chaos Dungeon"]"#)
            .unwrap();
        assert_eq!(cfg.reset.daily_tasks.len(), 2);
    }

    #[test]
    fn set_optional_catalog_path() {
        let mut cfg = Config::default();
        cfg.set("catalog.path", "/tmp/roster.json").unwrap();
        assert_eq!(cfg.catalog.path.as_deref(), Some("/tmp/roster.json"));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("reset.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("", "value").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("reset.reset_hour", "ten").is_err());
        assert_eq!(cfg.reset.reset_hour, 10);
    }

    #[test]
    fn set_rejects_out_of_range_hour() {
        let mut cfg = Config::default();
        assert!(cfg.set("reset.reset_hour", "24").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("app_name", "alt-roster").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.app_name, "alt-roster");
        assert_eq!(
            loaded.storage_keys().last_checked,
            "alt-roster-lastCheckedDate"
        );
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reset = [[[").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn load_catalog_uses_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("roster.json");
        std::fs::write(&catalog_path, r#"[{"name": "Paladin", "tasks": ["World Event"]}]"#)
            .unwrap();

        let mut cfg = Config::default();
        assert_eq!(cfg.load_catalog().unwrap(), Catalog::bundled());

        cfg.catalog.path = Some(catalog_path.to_string_lossy().into_owned());
        let catalog = cfg.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.character("Paladin").is_some());
    }
}
