//! Character roster and the recurring tasks tracked for each character.
//!
//! The catalog is read-only configuration for the lifetime of a session.
//! It is either the bundled roster or a JSON file in the
//! `[{ "name": ..., "tasks": [...] }]` format.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};

/// Roster shipped with the binary, used when no catalog file is configured.
const BUNDLED_ROSTER: &[(&str, &[&str])] = &[
    (
        "Berserker",
        &["World Event", "Chaos Dungeon", "Guardian Raid", "Una's Tasks", "Abyss Dungeon"],
    ),
    (
        "Sorceress",
        &["World Event", "Chaos Dungeon", "Guardian Raid", "Una's Tasks", "Abyss Dungeon"],
    ),
    (
        "Bard",
        &["World Event", "Chaos Dungeon", "Guardian Raid", "Una's Tasks"],
    ),
    ("Gunlancer", &["World Event", "Chaos Dungeon", "Guardian Raid"]),
];

/// A roster entry: a character and its ordered recurring tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Character {
    pub fn new<I, T>(name: impl Into<String>, tasks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            tasks: tasks.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_task(&self, task: &str) -> bool {
        self.tasks.iter().any(|t| t == task)
    }
}

/// Validated, ordered set of characters.
///
/// Character names are unique, so they can key the completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    characters: Vec<Character>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate names.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when a character or task name is empty,
    /// two characters share a name, or a character lists a task twice.
    pub fn new(characters: Vec<Character>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for character in &characters {
            if character.name.trim().is_empty() {
                return Err(ValidationError::EmptyName { what: "character" });
            }
            if !seen.insert(character.name.as_str()) {
                return Err(ValidationError::DuplicateCharacter(character.name.clone()));
            }

            let mut tasks = HashSet::new();
            for task in &character.tasks {
                if task.trim().is_empty() {
                    return Err(ValidationError::EmptyName { what: "task" });
                }
                if !tasks.insert(task.as_str()) {
                    return Err(ValidationError::DuplicateTask {
                        character: character.name.clone(),
                        task: task.clone(),
                    });
                }
            }
        }
        Ok(Self { characters })
    }

    /// The built-in roster.
    pub fn bundled() -> Self {
        let characters = BUNDLED_ROSTER
            .iter()
            .map(|(name, tasks)| Character::new(*name, tasks.iter().copied()))
            .collect();
        Self { characters }
    }

    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Ok(Self::new(characters)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            characters = catalog.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Task names for a character, or `None` if the character is not listed.
    pub fn task_names(&self, name: &str) -> Option<&[String]> {
        self.character(name).map(|c| c.tasks.as_slice())
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}
