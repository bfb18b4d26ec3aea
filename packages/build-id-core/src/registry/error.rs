use build_id_types::Category;

/// Error type for registry loading and lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{category} '{name}' uses reserved index 0")]
    ZeroIndex { category: Category, name: String },

    #[error("{category} index {index} assigned to both '{first}' and '{second}'")]
    DuplicateIndex {
        category: Category,
        index: u32,
        first: String,
        second: String,
    },

    #[error("{category} '{name}' not found")]
    MissingName { category: Category, name: String },

    #[error("{category} '{name}' moved from index {previous} to {current}")]
    Reassigned {
        category: Category,
        name: String,
        previous: u32,
        current: u32,
    },

    #[error("{category} index {index} ('{name}') was removed")]
    Removed {
        category: Category,
        index: u32,
        name: String,
    },

    #[error("Failed to read registry snapshot: {0}")]
    Io(String),

    #[error("Invalid registry snapshot: {0}")]
    Json(String),
}
