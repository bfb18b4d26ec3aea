//! Loadout record model.
//!
//! A [`BuildRecord`] is the decoded, field-named form of a build identifier
//! in the current schema. Every name field holds a registry index; the
//! registry itself lives in `build-id-core`.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::flags::BuildFlags;

/// Schema version written by the current encoder.
pub const CURRENT_BUILD_VERSION: u32 = 8;

/// Added to an encoded level when the item is surged.
///
/// Historic identifiers never carry levels this high, so they decode as
/// not surged.
pub const SURGE_LEVEL_BIAS: u32 = 100;

/// Highest level that survives the surge packing.
pub const MAX_LEVEL: u32 = SURGE_LEVEL_BIAS - 1;

const MAX_ENCODED_LEVEL: u32 = SURGE_LEVEL_BIAS + MAX_LEVEL;

/// Stable registry index of a named item.
///
/// Index `0` is the "empty" sentinel on the wire and is represented as
/// `None` wherever a slot may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameIndex(NonZeroU32);

impl NameIndex {
    /// Creates an index, returning `None` for the empty sentinel.
    pub const fn new(index: u32) -> Option<Self> {
        match NonZeroU32::new(index) {
            Some(index) => Some(NameIndex(index)),
            None => None,
        }
    }

    /// Returns the raw index.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Wire value of an optional index (`0` when empty).
    pub fn to_raw(index: Option<NameIndex>) -> u32 {
        index.map_or(0, NameIndex::get)
    }
}

impl From<NameIndex> for u32 {
    fn from(index: NameIndex) -> Self {
        index.get()
    }
}

impl fmt::Display for NameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Packs a level and surge state into the encoded level integer.
///
/// Returns `None` for levels above [`MAX_LEVEL`], which would read back as
/// a different level.
pub fn encode_level(level: u32, surged: bool) -> Option<u32> {
    if level > MAX_LEVEL {
        return None;
    }
    Some(if surged { level + SURGE_LEVEL_BIAS } else { level })
}

/// Splits an encoded level integer into level and surge state.
///
/// Returns `None` for integers no encoder produces.
pub fn decode_level(raw: u32) -> Option<(u32, bool)> {
    match raw {
        0..=MAX_LEVEL => Some((raw, false)),
        SURGE_LEVEL_BIAS..=MAX_ENCODED_LEVEL => Some((raw - SURGE_LEVEL_BIAS, true)),
        _ => None,
    }
}

/// Equipped weapon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSlot {
    /// Weapon name index
    pub name: Option<NameIndex>,
    /// Upgrade level, at most [`MAX_LEVEL`]
    pub level: u32,
    /// Two cell sockets
    pub cells: [Option<NameIndex>; 2],
    /// Up to three weapon parts
    pub parts: [Option<NameIndex>; 3],
    /// Surge state
    pub surged: bool,
}

/// Equipped armour piece.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmourSlot {
    /// Armour name index
    pub name: Option<NameIndex>,
    /// Upgrade level, at most [`MAX_LEVEL`]
    pub level: u32,
    /// Single cell socket
    pub cell: Option<NameIndex>,
    /// Surge state
    pub surged: bool,
}

/// Equipped lantern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanternSlot {
    /// Lantern name index
    pub name: Option<NameIndex>,
    /// Single cell socket
    pub cell: Option<NameIndex>,
}

/// The four armour positions, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmourKind {
    Head,
    Torso,
    Arms,
    Legs,
}

impl ArmourKind {
    /// All armour positions in wire order.
    pub const ALL: [ArmourKind; 4] = [
        ArmourKind::Head,
        ArmourKind::Torso,
        ArmourKind::Arms,
        ArmourKind::Legs,
    ];

    /// Lowercase field prefix (`head`, `torso`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ArmourKind::Head => "head",
            ArmourKind::Torso => "torso",
            ArmourKind::Arms => "arms",
            ArmourKind::Legs => "legs",
        }
    }
}

/// A full loadout in the current schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    /// Schema version this record conforms to
    pub schema_version: u32,
    /// Derived flags, never encoded
    pub flags: BuildFlags,
    pub weapon: WeaponSlot,
    /// Legendary pairing for the weapon
    pub bond_weapon: Option<NameIndex>,
    pub head: ArmourSlot,
    pub torso: ArmourSlot,
    pub arms: ArmourSlot,
    pub legs: ArmourSlot,
    pub lantern: LanternSlot,
    /// Omnicell, introduced in schema v4
    pub omnicell: Option<NameIndex>,
}

impl BuildRecord {
    /// Creates an empty loadout at the current schema version.
    pub fn empty() -> Self {
        Self {
            schema_version: CURRENT_BUILD_VERSION,
            flags: BuildFlags::empty(),
            weapon: WeaponSlot::default(),
            bond_weapon: None,
            head: ArmourSlot::default(),
            torso: ArmourSlot::default(),
            arms: ArmourSlot::default(),
            legs: ArmourSlot::default(),
            lantern: LanternSlot::default(),
            omnicell: None,
        }
    }

    /// Returns the armour slot at `kind`.
    pub fn armour(&self, kind: ArmourKind) -> &ArmourSlot {
        match kind {
            ArmourKind::Head => &self.head,
            ArmourKind::Torso => &self.torso,
            ArmourKind::Arms => &self.arms,
            ArmourKind::Legs => &self.legs,
        }
    }

    /// Returns the armour slot at `kind` mutably.
    pub fn armour_mut(&mut self, kind: ArmourKind) -> &mut ArmourSlot {
        match kind {
            ArmourKind::Head => &mut self.head,
            ArmourKind::Torso => &mut self.torso,
            ArmourKind::Arms => &mut self.arms,
            ArmourKind::Legs => &mut self.legs,
        }
    }

    /// Iterates armour slots in wire order.
    pub fn armours(&self) -> impl Iterator<Item = (ArmourKind, &ArmourSlot)> {
        ArmourKind::ALL.into_iter().map(move |kind| (kind, self.armour(kind)))
    }

    /// True if a migration changed the meaning of this build.
    pub fn is_upgraded(&self) -> bool {
        self.flags.contains(BuildFlags::UPGRADED_BUILD)
    }

    /// True if post-migration validation failed.
    pub fn is_invalid(&self) -> bool {
        self.flags.contains(BuildFlags::INVALID_BUILD)
    }

    /// True if nothing is equipped.
    pub fn is_empty(&self) -> bool {
        let mut blank = Self::empty();
        blank.schema_version = self.schema_version;
        blank.flags = self.flags;
        *self == blank
    }
}

impl Default for BuildRecord {
    fn default() -> Self {
        Self::empty()
    }
}
