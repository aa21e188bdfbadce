//! Per-character, per-task completion flags and their reconciliation
//! against the current catalog.
//!
//! ## Reconciliation
//!
//! Persisted state may be missing, corrupted, or written against an older
//! catalog. [`reconcile`] always produces a state with exactly one entry per
//! catalog character and exactly one flag per catalog task:
//!
//! ```text
//! persisted flag present and boolean -> kept
//! anything else                      -> false
//! ```
//!
//! Characters and tasks the catalog no longer lists are dropped from the
//! in-memory state. None of this is an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Catalog, Character};

/// Task name -> done flag for one character.
pub type TaskFlags = BTreeMap<String, bool>;

/// Completion flags keyed by character name, then task name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionState {
    characters: BTreeMap<String, TaskFlags>,
}

/// Done/total counts for one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

impl CompletionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All-false state for every catalog character.
    pub fn cleared(catalog: &Catalog) -> Self {
        let characters = catalog
            .characters()
            .iter()
            .map(|c| (c.name.clone(), fresh_flags(c)))
            .collect();
        Self { characters }
    }

    pub fn tasks(&self, character: &str) -> Option<&TaskFlags> {
        self.characters.get(character)
    }

    pub fn is_done(&self, character: &str, task: &str) -> bool {
        self.characters
            .get(character)
            .and_then(|tasks| tasks.get(task))
            .copied()
            .unwrap_or(false)
    }

    /// Flip one flag and return its new value.
    ///
    /// Unknown characters or tasks are created as not-done before flipping,
    /// so toggling is always accepted.
    pub fn toggle(&mut self, character: &str, task: &str) -> bool {
        let flag = self
            .characters
            .entry(character.to_string())
            .or_default()
            .entry(task.to_string())
            .or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Reset every character to all-false.
    pub fn clear(&mut self, catalog: &Catalog) {
        *self = Self::cleared(catalog);
    }

    /// Set the named tasks back to not-done for every catalog character that
    /// lists them. Other tasks are left untouched.
    ///
    /// Returns how many flags went from done to not-done.
    pub fn reset_tasks(&mut self, catalog: &Catalog, task_names: &[String]) -> usize {
        let mut cleared = 0;
        for character in catalog.characters() {
            let flags = self.characters.entry(character.name.clone()).or_default();
            for task in task_names.iter().filter(|t| character.has_task(t)) {
                if flags.insert(task.clone(), false) == Some(true) {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Done/total for a catalog character.
    pub fn progress(&self, character: &Character) -> Progress {
        let done = character
            .tasks
            .iter()
            .filter(|task| self.is_done(&character.name, task))
            .count();
        Progress {
            done,
            total: character.tasks.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TaskFlags)> {
        self.characters.iter()
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn fresh_flags(character: &Character) -> TaskFlags {
    character.tasks.iter().map(|t| (t.clone(), false)).collect()
}

/// Merge persisted completion data with the current catalog.
///
/// `persisted` is the raw stored JSON, if any. Parse failures are logged and
/// treated as an empty prior state.
pub fn reconcile(catalog: &Catalog, persisted: Option<&str>) -> CompletionState {
    let saved = match persisted.map(|raw| serde_json::from_str::<Value>(raw)) {
        None => serde_json::Map::new(),
        Some(Ok(Value::Object(map))) => map,
        Some(Ok(other)) => {
            tracing::warn!(
                kind = json_kind(&other),
                "persisted completion state is not an object; starting fresh"
            );
            serde_json::Map::new()
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to parse persisted completion state; starting fresh");
            serde_json::Map::new()
        }
    };

    for name in saved.keys().filter(|name| catalog.character(name).is_none()) {
        tracing::debug!(character = %name, "ignoring state for character not in catalog");
    }

    let characters = catalog
        .characters()
        .iter()
        .map(|character| {
            let flags = match saved.get(&character.name) {
                Some(Value::Object(tasks)) => character
                    .tasks
                    .iter()
                    .map(|task| {
                        let done = tasks.get(task).and_then(Value::as_bool).unwrap_or(false);
                        (task.clone(), done)
                    })
                    .collect(),
                Some(other) => {
                    tracing::debug!(
                        character = %character.name,
                        kind = json_kind(other),
                        "unusable task map; resetting character"
                    );
                    fresh_flags(character)
                }
                None => fresh_flags(character),
            };
            (character.name.clone(), flags)
        })
        .collect();

    CompletionState { characters }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
