//! Shared types for the build identifier codec.
//!
//! This crate defines the loadout record, its flag set, and the registry
//! categories that name indices belong to.

pub mod category;
pub mod flags;
pub mod record;

pub use category::Category;
pub use flags::BuildFlags;
pub use record::{
    decode_level, encode_level, ArmourKind, ArmourSlot, BuildRecord, LanternSlot, NameIndex,
    WeaponSlot, CURRENT_BUILD_VERSION, MAX_LEVEL, SURGE_LEVEL_BIAS,
};
