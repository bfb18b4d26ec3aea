//! Record round trips through the facade.

use build_id_core::resolve::NamedBuild;
use build_id_core::{Backend, BuildId, BuildRecord, NameIndex};

use super::helpers::{codec, V3_FIXTURE};

fn full_record() -> BuildRecord {
    let mut record = BuildRecord::empty();
    record.weapon.name = NameIndex::new(67);
    record.weapon.level = 15;
    record.weapon.surged = true;
    record.weapon.cells = [NameIndex::new(96), NameIndex::new(75)];
    record.weapon.parts = [NameIndex::new(4), NameIndex::new(5), None];
    record.bond_weapon = NameIndex::new(72);
    record.head.name = NameIndex::new(55);
    record.head.level = 15;
    record.head.cell = NameIndex::new(129);
    record.torso.name = NameIndex::new(4);
    record.torso.level = 10;
    record.torso.surged = true;
    record.arms.name = NameIndex::new(51);
    record.legs.name = NameIndex::new(2);
    record.legs.cell = NameIndex::new(117);
    record.lantern.name = NameIndex::new(1);
    record.lantern.cell = NameIndex::new(123);
    record.omnicell = NameIndex::new(3);
    record
}

#[test]
fn test_record_roundtrip() {
    let codec = codec();
    for record in [BuildRecord::empty(), full_record()] {
        let id = codec.serialize(&record).unwrap();
        assert_eq!(codec.deserialize(&id).unwrap(), record);
    }
}

#[test]
fn test_string_roundtrip_for_current_backend() {
    let codec = codec();
    let id = codec.serialize(&full_record()).unwrap();
    assert_eq!(codec.decode_any(&id).unwrap().backend, Backend::V8);
    assert_eq!(codec.serialize(&codec.deserialize(&id).unwrap()).unwrap(), id);
}

#[test]
fn test_upgrade_idempotent() {
    let codec = codec();
    let once = codec.upgrade(V3_FIXTURE).unwrap();
    let twice = codec.upgrade(&once).unwrap();
    assert_eq!(once, twice);

    let current = codec.serialize(&full_record()).unwrap();
    assert_eq!(codec.upgrade(&current).unwrap(), current);
}

#[test]
fn test_upgrade_preserves_record() {
    let codec = codec();
    let before = codec.deserialize(V3_FIXTURE).unwrap();
    let after = codec.deserialize(&codec.upgrade(V3_FIXTURE).unwrap()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_named_json_roundtrip() {
    let codec = codec();
    let id = codec.serialize(&full_record()).unwrap();
    let named = codec.describe(&id).unwrap();
    let json = serde_json::to_string_pretty(&named).unwrap();
    assert!(json.contains("Skarn's Defiance"));

    let parsed: NamedBuild = serde_json::from_str(&json).unwrap();
    assert_eq!(codec.serialize_named(&parsed).unwrap(), id);
}

#[test]
fn test_url_roundtrip() {
    let codec = codec();
    let id = BuildId::new(codec.serialize(&full_record()).unwrap()).unwrap();
    let url = format!("https://builds.example.org{}", id.to_url_path());
    let parsed = BuildId::from_url_path(&url).unwrap();
    assert_eq!(codec.deserialize(parsed.as_str()).unwrap(), full_record());
}

#[test]
fn test_empty_loadout_fallback() {
    let codec = codec();
    for bad in ["", "!!!!", "ünïcode", "dbU0wFWC74i85CqFxCyTwTBTkTApHaC6VfeFbCgFjQhoCjmc1tpCmNcWCjkI"] {
        assert_eq!(codec.deserialize_or_empty(bad), BuildRecord::empty(), "{:?}", bad);
    }
}
