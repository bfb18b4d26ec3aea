//! Registry categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category a name index belongs to.
///
/// Indices are only unique within a category: weapon `4` and armour `4` are
/// unrelated items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Weapons,
    Armours,
    Cells,
    Parts,
    Lanterns,
    Omnicells,
}

impl Category {
    /// All categories in snapshot order.
    pub const ALL: [Category; 6] = [
        Category::Weapons,
        Category::Armours,
        Category::Cells,
        Category::Parts,
        Category::Lanterns,
        Category::Omnicells,
    ];

    /// Name used in registry snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Weapons => "Weapons",
            Category::Armours => "Armours",
            Category::Cells => "Cells",
            Category::Parts => "Parts",
            Category::Lanterns => "Lanterns",
            Category::Omnicells => "Omnicells",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
