//! Record flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags carried by a decoded record.
    ///
    /// Flags are never part of the encoded string. They are derived each time
    /// an identifier is decoded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct BuildFlags: u32 {
        /// A migration step changed what the build means, not just its layout.
        const UPGRADED_BUILD = 0b0000_0001;
        /// The record failed validation after migration.
        const INVALID_BUILD = 0b0000_0010;
    }
}
