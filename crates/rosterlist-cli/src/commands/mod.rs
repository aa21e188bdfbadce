//! Subcommand implementations.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rosterlist_core::{Checklist, Config, Database};

pub mod catalog;
pub mod completions;
pub mod config;
pub mod reset;
pub mod show;
pub mod status;
pub mod toggle;

/// Global options shared by every subcommand.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let config = match &self.config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    pub fn save_config(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.config_path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        Ok(())
    }

    /// Open the session without evaluating the scheduled reset.
    pub fn open_checklist(&self) -> Result<Checklist<Database>, Box<dyn std::error::Error>> {
        let config = self.load_config()?;
        let catalog = config.load_catalog()?;
        let policy = config.reset_policy()?;
        let db = match &self.db_path {
            Some(path) => Database::open_at(path)?,
            None => Database::open()?,
        };
        Ok(Checklist::open(catalog, policy, db, config.storage_keys()))
    }

    /// Open the session and apply any due reset, printing its notice.
    pub fn ready_checklist(&self) -> Result<Checklist<Database>, Box<dyn std::error::Error>> {
        let mut checklist = self.open_checklist()?;
        checklist.initialize(self.now)?;
        print_notices(&mut checklist);
        Ok(checklist)
    }
}

/// Alerts go to stderr so JSON output stays clean.
pub fn print_notices(checklist: &mut Checklist<Database>) {
    for event in checklist.drain_events() {
        if let Some(notice) = event.notice() {
            eprintln!("{notice}");
        }
    }
}
