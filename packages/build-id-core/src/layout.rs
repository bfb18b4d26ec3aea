//! Per-version field layouts.
//!
//! Each schema version fixes the meaning of every integer position. Two
//! layouts with the same length are still distinct: the version tag in
//! element 0 selects the layout, the length only disambiguates variants
//! within one version.

use build_id_types::CURRENT_BUILD_VERSION;

use crate::codec::Backend;
use crate::error::{CodecError, Result};

/// Oldest schema version that can still be migrated.
pub const OLDEST_BUILD_VERSION: u32 = 2;

/// A named integer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Version,
    WeaponName,
    WeaponLevel,
    WeaponCell0,
    WeaponCell1,
    WeaponPart1,
    WeaponPart2,
    WeaponPart3,
    WeaponPart4,
    WeaponPart1Level,
    WeaponPart2Level,
    WeaponPart3Level,
    WeaponPart4Level,
    BondWeapon,
    HeadName,
    HeadLevel,
    HeadCell,
    TorsoName,
    TorsoLevel,
    TorsoCell,
    ArmsName,
    ArmsLevel,
    ArmsCell,
    LegsName,
    LegsLevel,
    LegsCell,
    LanternName,
    LanternCell,
    Omnicell,
}

impl Field {
    /// Snake-case field name, as used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::WeaponName => "weapon_name",
            Field::WeaponLevel => "weapon_level",
            Field::WeaponCell0 => "weapon_cell0",
            Field::WeaponCell1 => "weapon_cell1",
            Field::WeaponPart1 => "weapon_part1",
            Field::WeaponPart2 => "weapon_part2",
            Field::WeaponPart3 => "weapon_part3",
            Field::WeaponPart4 => "weapon_part4",
            Field::WeaponPart1Level => "weapon_part1_level",
            Field::WeaponPart2Level => "weapon_part2_level",
            Field::WeaponPart3Level => "weapon_part3_level",
            Field::WeaponPart4Level => "weapon_part4_level",
            Field::BondWeapon => "bond_weapon",
            Field::HeadName => "head_name",
            Field::HeadLevel => "head_level",
            Field::HeadCell => "head_cell",
            Field::TorsoName => "torso_name",
            Field::TorsoLevel => "torso_level",
            Field::TorsoCell => "torso_cell",
            Field::ArmsName => "arms_name",
            Field::ArmsLevel => "arms_level",
            Field::ArmsCell => "arms_cell",
            Field::LegsName => "legs_name",
            Field::LegsLevel => "legs_level",
            Field::LegsCell => "legs_cell",
            Field::LanternName => "lantern_name",
            Field::LanternCell => "lantern_cell",
            Field::Omnicell => "omnicell",
        }
    }
}

/// Field order of one schema version.
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    /// Schema version tag
    pub version: u32,
    /// Fields in wire order, starting with [`Field::Version`]
    pub fields: &'static [Field],
}

impl Layout {
    /// Number of integers in this layout.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Backend identifiers of this version are encoded with.
    pub fn backend(&self) -> Backend {
        Backend::for_version(self.version)
    }

    /// Position of `field`, if the layout has it.
    pub fn position(&self, field: Field) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    /// Reads `field` from `values`; absent fields read as `0`.
    pub fn get(&self, values: &[u64], field: Field) -> u64 {
        self.position(field)
            .and_then(|at| values.get(at).copied())
            .unwrap_or(0)
    }

    /// Writes `field` into `values`. Returns `false` if the layout lacks it.
    pub fn set(&self, values: &mut [u64], field: Field, value: u64) -> bool {
        match self.position(field).and_then(|at| values.get_mut(at)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Moves `values` from this layout into `target`.
    ///
    /// Fields the target lacks are dropped; fields this layout lacks are
    /// written as `0`. The version slot is set to the target's version.
    pub fn relayout(&self, values: &[u64], target: &Layout) -> Vec<u64> {
        target
            .fields
            .iter()
            .map(|&field| match field {
                Field::Version => u64::from(target.version),
                other => self.get(values, other),
            })
            .collect()
    }

    /// Fields of this layout that `target` does not carry.
    pub fn dropped_by(&self, target: &Layout) -> impl Iterator<Item = Field> + '_ {
        let target_fields = target.fields;
        self.fields
            .iter()
            .copied()
            .filter(move |f| !target_fields.contains(f))
    }
}

const V2_FIELDS: &[Field] = &[
    Field::Version,
    Field::WeaponName,
    Field::WeaponLevel,
    Field::WeaponCell0,
    Field::WeaponCell1,
    Field::HeadName,
    Field::HeadLevel,
    Field::HeadCell,
    Field::TorsoName,
    Field::TorsoLevel,
    Field::TorsoCell,
    Field::ArmsName,
    Field::ArmsLevel,
    Field::ArmsCell,
    Field::LegsName,
    Field::LegsLevel,
    Field::LegsCell,
    Field::LanternName,
    Field::LanternCell,
];

const V2_REPEATER_FIELDS: &[Field] = &[
    Field::Version,
    Field::WeaponName,
    Field::WeaponLevel,
    Field::WeaponCell0,
    Field::WeaponCell1,
    Field::WeaponPart1,
    Field::WeaponPart1Level,
    Field::WeaponPart2,
    Field::WeaponPart2Level,
    Field::WeaponPart3,
    Field::WeaponPart3Level,
    Field::WeaponPart4,
    Field::WeaponPart4Level,
    Field::HeadName,
    Field::HeadLevel,
    Field::HeadCell,
    Field::TorsoName,
    Field::TorsoLevel,
    Field::TorsoCell,
    Field::ArmsName,
    Field::ArmsLevel,
    Field::ArmsCell,
    Field::LegsName,
    Field::LegsLevel,
    Field::LegsCell,
    Field::LanternName,
    Field::LanternCell,
];

const V3_FIELDS: &[Field] = &[
    Field::Version,
    Field::WeaponName,
    Field::WeaponLevel,
    Field::WeaponCell0,
    Field::WeaponCell1,
    Field::WeaponPart1,
    Field::WeaponPart1Level,
    Field::WeaponPart2,
    Field::WeaponPart2Level,
    Field::WeaponPart3,
    Field::WeaponPart3Level,
    Field::HeadName,
    Field::HeadLevel,
    Field::HeadCell,
    Field::TorsoName,
    Field::TorsoLevel,
    Field::TorsoCell,
    Field::ArmsName,
    Field::ArmsLevel,
    Field::ArmsCell,
    Field::LegsName,
    Field::LegsLevel,
    Field::LegsCell,
    Field::LanternName,
    Field::LanternCell,
    Field::WeaponPart4,
];

const V4_FIELDS: &[Field] = &[
    Field::Version,
    Field::WeaponName,
    Field::WeaponLevel,
    Field::WeaponCell0,
    Field::WeaponCell1,
    Field::WeaponPart1,
    Field::WeaponPart2,
    Field::WeaponPart3,
    Field::WeaponPart4,
    Field::WeaponPart1Level,
    Field::WeaponPart2Level,
    Field::WeaponPart3Level,
    Field::HeadName,
    Field::HeadLevel,
    Field::HeadCell,
    Field::TorsoName,
    Field::TorsoLevel,
    Field::TorsoCell,
    Field::ArmsName,
    Field::ArmsLevel,
    Field::ArmsCell,
    Field::LegsName,
    Field::LegsLevel,
    Field::LegsCell,
    Field::LanternName,
    Field::LanternCell,
    Field::Omnicell,
];

/// Field order shared by v5 through v8.
pub const CURRENT_FIELDS: &[Field] = &[
    Field::Version,
    Field::WeaponName,
    Field::WeaponLevel,
    Field::WeaponCell0,
    Field::WeaponCell1,
    Field::WeaponPart1,
    Field::WeaponPart2,
    Field::WeaponPart3,
    Field::BondWeapon,
    Field::HeadName,
    Field::HeadLevel,
    Field::HeadCell,
    Field::TorsoName,
    Field::TorsoLevel,
    Field::TorsoCell,
    Field::ArmsName,
    Field::ArmsLevel,
    Field::ArmsCell,
    Field::LegsName,
    Field::LegsLevel,
    Field::LegsCell,
    Field::LanternName,
    Field::LanternCell,
    Field::Omnicell,
];

/// v2 without weapon parts (19 integers).
pub static V2: Layout = Layout {
    version: 2,
    fields: V2_FIELDS,
};

/// v2 with the four modular Repeater parts (27 integers).
pub static V2_REPEATER: Layout = Layout {
    version: 2,
    fields: V2_REPEATER_FIELDS,
};

/// v3 (26 integers). The fourth part lost its level and moved to the end.
pub static V3: Layout = Layout {
    version: 3,
    fields: V3_FIELDS,
};

/// v4 (27 integers), adds the omnicell.
pub static V4: Layout = Layout {
    version: 4,
    fields: V4_FIELDS,
};

/// v4-tagged identifiers that were written in the v5 field order.
pub static V4_AS_V5: Layout = Layout {
    version: 4,
    fields: CURRENT_FIELDS,
};

pub static V5: Layout = Layout {
    version: 5,
    fields: CURRENT_FIELDS,
};

pub static V6: Layout = Layout {
    version: 6,
    fields: CURRENT_FIELDS,
};

pub static V7: Layout = Layout {
    version: 7,
    fields: CURRENT_FIELDS,
};

/// Current layout (24 integers).
pub static V8: Layout = Layout {
    version: CURRENT_BUILD_VERSION,
    fields: CURRENT_FIELDS,
};

/// All layouts accepted for `version`.
pub fn layouts_for(version: u64) -> &'static [&'static Layout] {
    static LAYOUTS_V2: [&Layout; 2] = [&V2, &V2_REPEATER];
    static LAYOUTS_V3: [&Layout; 1] = [&V3];
    static LAYOUTS_V4: [&Layout; 2] = [&V4, &V4_AS_V5];
    static LAYOUTS_V5: [&Layout; 1] = [&V5];
    static LAYOUTS_V6: [&Layout; 1] = [&V6];
    static LAYOUTS_V7: [&Layout; 1] = [&V7];
    static LAYOUTS_V8: [&Layout; 1] = [&V8];

    match version {
        2 => &LAYOUTS_V2,
        3 => &LAYOUTS_V3,
        4 => &LAYOUTS_V4,
        5 => &LAYOUTS_V5,
        6 => &LAYOUTS_V6,
        7 => &LAYOUTS_V7,
        8 => &LAYOUTS_V8,
        _ => &[],
    }
}

/// True if `version` is within the migratable range.
pub fn is_known_version(version: u64) -> bool {
    (u64::from(OLDEST_BUILD_VERSION)..=u64::from(CURRENT_BUILD_VERSION)).contains(&version)
}

/// Selects the layout for a decoded sequence.
///
/// # Returns
/// `Err(CodecError::UnrecognizedVersion)` for versions outside the known
/// range, `Err(CodecError::InvalidLength)` if no layout of the version has
/// `len` fields.
pub fn layout_for(version: u64, len: usize) -> Result<&'static Layout> {
    if !is_known_version(version) {
        return Err(CodecError::UnrecognizedVersion(version));
    }
    layouts_for(version)
        .iter()
        .copied()
        .find(|layout| layout.len() == len)
        .ok_or(CodecError::InvalidLength { version, len })
}

/// Selects the layout for `values`, reading the version from element 0.
pub fn layout_of(values: &[u64]) -> Result<&'static Layout> {
    let version = values
        .first()
        .copied()
        .ok_or(CodecError::InvalidLength { version: 0, len: 0 })?;
    layout_for(version, values.len())
}

/// True if `len` matches a layout of `version`.
pub fn is_valid_length(version: u64, len: usize) -> bool {
    layout_for(version, len).is_ok()
}
