//! Registry snapshot document.
//!
//! The data pipeline writes the registry as a JSON object keyed by category,
//! each mapping item names to indices. `BTreeMap` keeps the document sorted
//! so diffs stay reviewable.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use build_id_types::Category;
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Category → name → index document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrySnapshot {
    pub categories: BTreeMap<Category, BTreeMap<String, u32>>,
}

impl RegistrySnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(json).map_err(|e| RegistryError::Json(e.to_string()))
    }

    /// Reads a snapshot file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        serde_json::to_string_pretty(self).map_err(|e| RegistryError::Json(e.to_string()))
    }

    /// Writes the snapshot to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)
            .map_err(|e| RegistryError::Io(format!("{}: {}", path.display(), e)))
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, category: Category, name: impl Into<String>, index: u32) {
        self.categories
            .entry(category)
            .or_default()
            .insert(name.into(), index);
    }

    /// Iterates `(name, index)` pairs of a category in name order.
    pub fn entries(&self, category: Category) -> impl Iterator<Item = (&str, u32)> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|names| names.iter().map(|(name, index)| (name.as_str(), *index)))
    }

    /// Verifies this snapshot only appends to `previous`.
    ///
    /// Every index of `previous` must still exist. A name present in both
    /// must keep its index; a renamed item keeps its index under a new name.
    pub fn check_append_only(&self, previous: &RegistrySnapshot) -> Result<(), RegistryError> {
        for (&category, names) in &previous.categories {
            let current = self.categories.get(&category);
            let current_indices: HashMap<u32, &str> = current
                .into_iter()
                .flat_map(|names| names.iter().map(|(name, index)| (*index, name.as_str())))
                .collect();

            for (name, &index) in names {
                if let Some(&now) = current.and_then(|names| names.get(name)) {
                    if now != index {
                        return Err(RegistryError::Reassigned {
                            category,
                            name: name.clone(),
                            previous: index,
                            current: now,
                        });
                    }
                }
                if !current_indices.contains_key(&index) {
                    return Err(RegistryError::Removed {
                        category,
                        index,
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
