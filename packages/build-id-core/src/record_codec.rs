//! Mapping between [`BuildRecord`] and the current integer layout.

use build_id_types::{
    decode_level, encode_level, ArmourKind, BuildRecord, NameIndex, CURRENT_BUILD_VERSION,
};

use crate::codec::Backend;
use crate::error::{CodecError, Result};
use crate::layout::{self, Field, Layout};

const ARMOUR_FIELDS: [(ArmourKind, Field, Field, Field); 4] = [
    (
        ArmourKind::Head,
        Field::HeadName,
        Field::HeadLevel,
        Field::HeadCell,
    ),
    (
        ArmourKind::Torso,
        Field::TorsoName,
        Field::TorsoLevel,
        Field::TorsoCell,
    ),
    (
        ArmourKind::Arms,
        Field::ArmsName,
        Field::ArmsLevel,
        Field::ArmsCell,
    ),
    (
        ArmourKind::Legs,
        Field::LegsName,
        Field::LegsLevel,
        Field::LegsCell,
    ),
];

/// Lays out `record` in the current field order.
///
/// The version slot is always [`CURRENT_BUILD_VERSION`]; flags are not
/// encoded.
///
/// # Returns
/// `Err(CodecError::ValueOutOfRange)` if a level is above
/// [`MAX_LEVEL`](build_id_types::MAX_LEVEL).
pub fn record_to_values(record: &BuildRecord) -> Result<Vec<u64>> {
    let layout = &layout::V8;
    let mut values = vec![0u64; layout.len()];
    let mut put = |field: Field, value: u32| {
        layout.set(&mut values, field, u64::from(value));
    };
    let level = |field: Field, level: u32, surged: bool| {
        encode_level(level, surged).ok_or(CodecError::ValueOutOfRange {
            field: field.as_str(),
            value: u64::from(level),
        })
    };

    put(Field::Version, CURRENT_BUILD_VERSION);

    let weapon = &record.weapon;
    put(Field::WeaponName, NameIndex::to_raw(weapon.name));
    put(
        Field::WeaponLevel,
        level(Field::WeaponLevel, weapon.level, weapon.surged)?,
    );
    put(Field::WeaponCell0, NameIndex::to_raw(weapon.cells[0]));
    put(Field::WeaponCell1, NameIndex::to_raw(weapon.cells[1]));
    put(Field::WeaponPart1, NameIndex::to_raw(weapon.parts[0]));
    put(Field::WeaponPart2, NameIndex::to_raw(weapon.parts[1]));
    put(Field::WeaponPart3, NameIndex::to_raw(weapon.parts[2]));
    put(Field::BondWeapon, NameIndex::to_raw(record.bond_weapon));

    for (kind, name, level_field, cell) in ARMOUR_FIELDS {
        let slot = record.armour(kind);
        put(name, NameIndex::to_raw(slot.name));
        put(level_field, level(level_field, slot.level, slot.surged)?);
        put(cell, NameIndex::to_raw(slot.cell));
    }

    put(Field::LanternName, NameIndex::to_raw(record.lantern.name));
    put(Field::LanternCell, NameIndex::to_raw(record.lantern.cell));
    put(Field::Omnicell, NameIndex::to_raw(record.omnicell));

    Ok(values)
}

/// Builds a record from a current-schema integer sequence.
///
/// # Returns
/// `Err(CodecError::Decode)` if `values` is tagged with an older version,
/// `Err(CodecError::InvalidLength)` on a length mismatch, and
/// `Err(CodecError::ValueOutOfRange)` if an integer does not fit its field
/// or a level integer is not one the encoder produces.
pub fn record_from_values(values: &[u64]) -> Result<BuildRecord> {
    let layout = layout::layout_of(values)?;
    if layout.version != CURRENT_BUILD_VERSION {
        return Err(CodecError::decode(
            Backend::V8,
            format!(
                "expected schema version {}, found {}",
                CURRENT_BUILD_VERSION, layout.version
            ),
        ));
    }

    let reader = FieldReader { layout, values };
    let mut record = BuildRecord::empty();

    let (level, surged) = reader.level(Field::WeaponLevel)?;
    record.weapon.name = reader.index(Field::WeaponName)?;
    record.weapon.level = level;
    record.weapon.surged = surged;
    record.weapon.cells = [
        reader.index(Field::WeaponCell0)?,
        reader.index(Field::WeaponCell1)?,
    ];
    record.weapon.parts = [
        reader.index(Field::WeaponPart1)?,
        reader.index(Field::WeaponPart2)?,
        reader.index(Field::WeaponPart3)?,
    ];
    record.bond_weapon = reader.index(Field::BondWeapon)?;

    for (kind, name, level, cell) in ARMOUR_FIELDS {
        let (level, surged) = reader.level(level)?;
        let slot = record.armour_mut(kind);
        slot.name = reader.index(name)?;
        slot.level = level;
        slot.surged = surged;
        slot.cell = reader.index(cell)?;
    }

    record.lantern.name = reader.index(Field::LanternName)?;
    record.lantern.cell = reader.index(Field::LanternCell)?;
    record.omnicell = reader.index(Field::Omnicell)?;

    Ok(record)
}

struct FieldReader<'a> {
    layout: &'static Layout,
    values: &'a [u64],
}

impl FieldReader<'_> {
    fn raw(&self, field: Field) -> Result<u32> {
        let value = self.layout.get(self.values, field);
        u32::try_from(value).map_err(|_| CodecError::ValueOutOfRange {
            field: field.as_str(),
            value,
        })
    }

    fn index(&self, field: Field) -> Result<Option<NameIndex>> {
        Ok(NameIndex::new(self.raw(field)?))
    }

    fn level(&self, field: Field) -> Result<(u32, bool)> {
        let raw = self.raw(field)?;
        decode_level(raw).ok_or(CodecError::ValueOutOfRange {
            field: field.as_str(),
            value: u64::from(raw),
        })
    }
}
