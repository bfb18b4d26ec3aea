//! Name registry.
//!
//! Maps `(category, index)` to display names and back. The registry is
//! loaded once, never mutated, and shared behind an `Arc`.

pub mod error;
pub mod snapshot;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use build_id_types::{Category, NameIndex};
use tracing::info;

pub use error::RegistryError;
pub use snapshot::RegistrySnapshot;

#[derive(Debug, Clone, Default)]
struct CategoryNames {
    by_index: BTreeMap<NameIndex, String>,
    by_name: HashMap<String, NameIndex>,
}

/// Immutable bidirectional name registry.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    categories: HashMap<Category, CategoryNames>,
}

impl NameRegistry {
    /// Builds a registry from a snapshot.
    ///
    /// # Returns
    /// `Err(RegistryError::ZeroIndex)` if an entry uses the empty sentinel,
    /// `Err(RegistryError::DuplicateIndex)` if two names share an index.
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Result<Self, RegistryError> {
        let mut categories = HashMap::new();
        for (&category, names) in &snapshot.categories {
            let mut entry = CategoryNames::default();
            for (name, &raw) in names {
                let index = NameIndex::new(raw).ok_or_else(|| RegistryError::ZeroIndex {
                    category,
                    name: name.clone(),
                })?;
                if let Some(first) = entry.by_index.insert(index, name.clone()) {
                    return Err(RegistryError::DuplicateIndex {
                        category,
                        index: raw,
                        first,
                        second: name.clone(),
                    });
                }
                entry.by_name.insert(name.clone(), index);
            }
            categories.insert(category, entry);
        }
        Ok(Self { categories })
    }

    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::from_snapshot(&RegistrySnapshot::from_json(json)?)
    }

    /// Loads a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let registry = Self::from_snapshot(&RegistrySnapshot::from_file(path)?)?;
        info!(
            path = %path.display(),
            entries = registry.len(),
            "loaded name registry"
        );
        Ok(registry)
    }

    /// Display name of `index` in `category`.
    pub fn name(&self, category: Category, index: NameIndex) -> Option<&str> {
        self.categories
            .get(&category)
            .and_then(|names| names.by_index.get(&index))
            .map(String::as_str)
    }

    /// Index of `name` in `category`.
    pub fn index(&self, category: Category, name: &str) -> Option<NameIndex> {
        self.categories
            .get(&category)
            .and_then(|names| names.by_name.get(name))
            .copied()
    }

    /// Like [`index`](Self::index), failing with `MissingName`.
    pub fn require_index(&self, category: Category, name: &str) -> Result<NameIndex, RegistryError> {
        self.index(category, name)
            .ok_or_else(|| RegistryError::MissingName {
                category,
                name: name.to_string(),
            })
    }

    pub fn contains(&self, category: Category, index: NameIndex) -> bool {
        self.name(category, index).is_some()
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(|names| names.by_index.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts back into the snapshot document.
    pub fn to_snapshot(&self) -> RegistrySnapshot {
        let mut snapshot = RegistrySnapshot::new();
        for (&category, names) in &self.categories {
            for (index, name) in &names.by_index {
                snapshot.insert(category, name.clone(), index.get());
            }
        }
        snapshot
    }
}
