//! Named view of a record.
//!
//! Joins a [`BuildRecord`] with the [`NameRegistry`] for display and JSON
//! export, and turns named input back into indices.

use build_id_types::{ArmourKind, ArmourSlot, BuildRecord, Category, NameIndex};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::Field;
use crate::registry::NameRegistry;

/// A name field that does not resolve in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedField {
    pub field: &'static str,
    pub category: Category,
    pub index: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedWeapon {
    pub name: Option<String>,
    pub level: u32,
    pub surged: bool,
    pub cells: [Option<String>; 2],
    pub parts: [Option<String>; 3],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedArmour {
    pub name: Option<String>,
    pub level: u32,
    pub surged: bool,
    pub cell: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedLantern {
    pub name: Option<String>,
    pub cell: Option<String>,
}

/// A loadout with every index replaced by its registry name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedBuild {
    pub schema_version: u32,
    pub upgraded: bool,
    pub weapon: NamedWeapon,
    pub bond_weapon: Option<String>,
    pub head: NamedArmour,
    pub torso: NamedArmour,
    pub arms: NamedArmour,
    pub legs: NamedArmour,
    pub lantern: NamedLantern,
    pub omnicell: Option<String>,
    /// Indices with no registry entry; their names are `None` above
    #[serde(skip_serializing_if = "Vec::is_empty", skip_deserializing)]
    pub unresolved: Vec<UnresolvedField>,
}

impl NamedBuild {
    fn armour(&self, kind: ArmourKind) -> &NamedArmour {
        match kind {
            ArmourKind::Head => &self.head,
            ArmourKind::Torso => &self.torso,
            ArmourKind::Arms => &self.arms,
            ArmourKind::Legs => &self.legs,
        }
    }

    fn armour_mut(&mut self, kind: ArmourKind) -> &mut NamedArmour {
        match kind {
            ArmourKind::Head => &mut self.head,
            ArmourKind::Torso => &mut self.torso,
            ArmourKind::Arms => &mut self.arms,
            ArmourKind::Legs => &mut self.legs,
        }
    }
}

fn armour_fields(kind: ArmourKind) -> (Field, Field) {
    match kind {
        ArmourKind::Head => (Field::HeadName, Field::HeadCell),
        ArmourKind::Torso => (Field::TorsoName, Field::TorsoCell),
        ArmourKind::Arms => (Field::ArmsName, Field::ArmsCell),
        ArmourKind::Legs => (Field::LegsName, Field::LegsCell),
    }
}

/// Every name field of `record` with its category.
fn name_fields(record: &BuildRecord) -> Vec<(Field, Category, Option<NameIndex>)> {
    let weapon = &record.weapon;
    let mut fields = vec![
        (Field::WeaponName, Category::Weapons, weapon.name),
        (Field::WeaponCell0, Category::Cells, weapon.cells[0]),
        (Field::WeaponCell1, Category::Cells, weapon.cells[1]),
        (Field::WeaponPart1, Category::Parts, weapon.parts[0]),
        (Field::WeaponPart2, Category::Parts, weapon.parts[1]),
        (Field::WeaponPart3, Category::Parts, weapon.parts[2]),
        (Field::BondWeapon, Category::Weapons, record.bond_weapon),
    ];
    for (kind, slot) in record.armours() {
        let (name, cell) = armour_fields(kind);
        fields.push((name, Category::Armours, slot.name));
        fields.push((cell, Category::Cells, slot.cell));
    }
    fields.push((Field::LanternName, Category::Lanterns, record.lantern.name));
    fields.push((Field::LanternCell, Category::Cells, record.lantern.cell));
    fields.push((Field::Omnicell, Category::Omnicells, record.omnicell));
    fields
}

/// Lists the non-empty name fields of `record` the registry cannot resolve.
pub fn unresolved_fields(record: &BuildRecord, registry: &NameRegistry) -> Vec<UnresolvedField> {
    name_fields(record)
        .into_iter()
        .filter_map(|(field, category, index)| {
            let index = index?;
            (!registry.contains(category, index)).then(|| UnresolvedField {
                field: field.as_str(),
                category,
                index: index.get(),
            })
        })
        .collect()
}

/// Resolves every index of `record` to its name.
pub fn describe(record: &BuildRecord, registry: &NameRegistry) -> NamedBuild {
    let name = |category: Category, index: Option<NameIndex>| {
        index
            .and_then(|index| registry.name(category, index))
            .map(str::to_string)
    };
    let armour = |slot: &ArmourSlot| NamedArmour {
        name: name(Category::Armours, slot.name),
        level: slot.level,
        surged: slot.surged,
        cell: name(Category::Cells, slot.cell),
    };

    let weapon = &record.weapon;
    NamedBuild {
        schema_version: record.schema_version,
        upgraded: record.is_upgraded(),
        weapon: NamedWeapon {
            name: name(Category::Weapons, weapon.name),
            level: weapon.level,
            surged: weapon.surged,
            cells: weapon.cells.map(|cell| name(Category::Cells, cell)),
            parts: weapon.parts.map(|part| name(Category::Parts, part)),
        },
        bond_weapon: name(Category::Weapons, record.bond_weapon),
        head: armour(&record.head),
        torso: armour(&record.torso),
        arms: armour(&record.arms),
        legs: armour(&record.legs),
        lantern: NamedLantern {
            name: name(Category::Lanterns, record.lantern.name),
            cell: name(Category::Cells, record.lantern.cell),
        },
        omnicell: name(Category::Omnicells, record.omnicell),
        unresolved: unresolved_fields(record, registry),
    }
}

/// Builds a current-schema record from names.
///
/// # Returns
/// `Err(CodecError::Registry)` naming the first name the registry lacks.
pub fn record_from_names(named: &NamedBuild, registry: &NameRegistry) -> Result<BuildRecord> {
    let index = |category: Category, name: &Option<String>| -> Result<Option<NameIndex>> {
        name.as_deref()
            .map(|name| registry.require_index(category, name))
            .transpose()
            .map_err(Into::into)
    };

    let mut record = BuildRecord::empty();
    let weapon = &named.weapon;
    record.weapon.name = index(Category::Weapons, &weapon.name)?;
    record.weapon.level = weapon.level;
    record.weapon.surged = weapon.surged;
    for (slot, cell) in record.weapon.cells.iter_mut().zip(&weapon.cells) {
        *slot = index(Category::Cells, cell)?;
    }
    for (slot, part) in record.weapon.parts.iter_mut().zip(&weapon.parts) {
        *slot = index(Category::Parts, part)?;
    }
    record.bond_weapon = index(Category::Weapons, &named.bond_weapon)?;

    for kind in ArmourKind::ALL {
        let source = named.armour(kind);
        let slot = record.armour_mut(kind);
        slot.name = index(Category::Armours, &source.name)?;
        slot.level = source.level;
        slot.surged = source.surged;
        slot.cell = index(Category::Cells, &source.cell)?;
    }

    record.lantern.name = index(Category::Lanterns, &named.lantern.name)?;
    record.lantern.cell = index(Category::Cells, &named.lantern.cell)?;
    record.omnicell = index(Category::Omnicells, &named.omnicell)?;
    Ok(record)
}
