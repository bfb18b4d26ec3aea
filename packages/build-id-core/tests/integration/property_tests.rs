//! Property tests over backends, records and upgrades.

use build_id_core::{Backend, BuildRecord, CodecError, Codecs, NameIndex, CURRENT_BUILD_VERSION};
use build_id_types::{ArmourSlot, LanternSlot, WeaponSlot, MAX_LEVEL};
use proptest::prelude::*;

use super::helpers::codec;

fn index_from(pool: &'static [u32]) -> impl Strategy<Value = Option<NameIndex>> {
    prop::option::of(prop::sample::select(pool)).prop_map(|raw| raw.and_then(NameIndex::new))
}

const WEAPONS: &[u32] = &[14, 67, 72];
const CELLS: &[u32] = &[18, 75, 96, 117, 123, 129];
const PARTS: &[u32] = &[3, 4, 5, 7, 9];
const ARMOURS: &[u32] = &[2, 4, 51, 55];
const LANTERNS: &[u32] = &[1];
const OMNICELLS: &[u32] = &[1, 2, 3];

fn weapon(levels: impl Strategy<Value = u32>) -> impl Strategy<Value = WeaponSlot> {
    (
        index_from(WEAPONS),
        levels,
        any::<bool>(),
        [index_from(CELLS), index_from(CELLS)],
        [index_from(PARTS), index_from(PARTS), index_from(PARTS)],
    )
        .prop_map(|(name, level, surged, cells, parts)| WeaponSlot {
            name,
            level,
            cells,
            parts,
            surged,
        })
}

fn armour(levels: impl Strategy<Value = u32>) -> impl Strategy<Value = ArmourSlot> {
    (index_from(ARMOURS), levels, any::<bool>(), index_from(CELLS)).prop_map(
        |(name, level, surged, cell)| ArmourSlot {
            name,
            level,
            cell,
            surged,
        },
    )
}

fn record_with_levels(
    levels: impl Strategy<Value = u32> + Clone,
) -> impl Strategy<Value = BuildRecord> {
    (
        weapon(levels.clone()),
        index_from(WEAPONS),
        [
            armour(levels.clone()),
            armour(levels.clone()),
            armour(levels.clone()),
            armour(levels),
        ],
        (index_from(LANTERNS), index_from(CELLS)),
        index_from(OMNICELLS),
    )
        .prop_map(|(weapon, bond_weapon, [head, torso, arms, legs], (lantern, cell), omnicell)| {
            BuildRecord {
                weapon,
                bond_weapon,
                head,
                torso,
                arms,
                legs,
                lantern: LanternSlot {
                    name: lantern,
                    cell,
                },
                omnicell,
                ..BuildRecord::empty()
            }
        })
}

fn record() -> impl Strategy<Value = BuildRecord> {
    record_with_levels(0u32..=MAX_LEVEL)
}

fn levels(record: &BuildRecord) -> [u32; 5] {
    [
        record.weapon.level,
        record.head.level,
        record.torso.level,
        record.arms.level,
        record.legs.level,
    ]
}

fn current_shaped(version: u64) -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..200, 23).prop_map(move |mut rest| {
        rest.insert(0, version);
        rest
    })
}

proptest! {
    #[test]
    fn backend_roundtrip(values in prop::collection::vec(any::<u64>(), 1..32)) {
        let codecs = Codecs::standard().unwrap();
        for backend in Backend::PROGRESSIVE_ORDER {
            let id = codecs.encode(&values, backend).unwrap();
            prop_assert_eq!(codecs.decode(&id, backend).unwrap(), values.clone());
        }
    }

    #[test]
    fn record_roundtrip(record in record()) {
        let codec = codec();
        let id = codec.serialize(&record).unwrap();
        prop_assert_eq!(codec.deserialize(&id).unwrap(), record);
    }

    #[test]
    fn serialize_accepts_only_packable_levels(record in record_with_levels(any::<u32>())) {
        let codec = codec();
        match codec.serialize(&record) {
            Ok(id) => {
                prop_assert!(levels(&record).iter().all(|&level| level <= MAX_LEVEL));
                prop_assert_eq!(codec.deserialize(&id).unwrap(), record);
            }
            Err(err) => {
                prop_assert!(levels(&record).iter().any(|&level| level > MAX_LEVEL));
                let out_of_range = matches!(err, CodecError::ValueOutOfRange { .. });
                prop_assert!(out_of_range);
            }
        }
    }

    #[test]
    fn progressive_decode_finds_encoding_backend(
        (version, values) in (5u64..=8).prop_flat_map(|v| (Just(v), current_shaped(v)))
    ) {
        let codecs = Codecs::standard().unwrap();
        let backend = Backend::for_version(version as u32);
        let decoded = codecs.decode_any(&codecs.encode(&values, backend).unwrap()).unwrap();
        prop_assert_eq!(decoded.backend, backend);
        prop_assert_eq!(decoded.values, values);
    }

    #[test]
    fn upgrade_is_idempotent(values in current_shaped(5)) {
        let codec = codec();
        let id = codec.codecs().encode(&values, Backend::Legacy).unwrap();
        let once = codec.upgrade_outcome(&id).unwrap();
        prop_assert_eq!(once.migrated.version, u64::from(CURRENT_BUILD_VERSION));
        prop_assert_eq!(&once.migrated.values[1..], &values[1..]);
        prop_assert_eq!(codec.upgrade(&once.id).unwrap(), once.id);
    }
}
