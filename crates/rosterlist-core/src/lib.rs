//! # rosterlist Core Library
//!
//! This library provides the core logic for a per-character recurring task
//! checklist. All operations are available through the `rosterlist` CLI
//! binary, which is a thin view layer over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: the roster of characters and their recurring tasks
//! - **State**: name-keyed completion flags, reconciled against the catalog
//! - **Reset**: pure daily/weekly reset decision anchored at a UTC hour
//! - **Checklist**: the session that loads state, applies the scheduled reset
//!   once, and writes through every change
//! - **Storage**: key-value persistence (SQLite) and TOML configuration
//!
//! ## Key Components
//!
//! - [`Checklist`]: Session state machine
//! - [`ResetPolicy`]: Reset boundaries and decision rule
//! - [`reconcile`]: Persisted state x catalog merge
//! - [`KeyValueStore`]: Persistence seam, implemented by [`Database`] and [`MemoryStore`]
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod checklist;
pub mod error;
pub mod events;
pub mod reset;
pub mod state;
pub mod storage;

pub use catalog::{Catalog, Character};
pub use checklist::{Checklist, Confirm, Phase, MANUAL_RESET_PROMPT};
pub use error::{CatalogError, ChecklistError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use reset::{ResetKind, ResetPolicy};
pub use state::{reconcile, CompletionState, Progress};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, StorageKeys};
