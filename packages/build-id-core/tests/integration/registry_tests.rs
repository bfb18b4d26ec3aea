//! Registry snapshot loading and append-only checks.

use build_id_core::{Category, NameIndex, NameRegistry, RegistryError, RegistrySnapshot};
use tempfile::tempdir;

use super::helpers::{fixture_path, registry};

#[test]
fn test_fixture_snapshot_loads() {
    let registry = registry();
    assert_eq!(registry.len(), 22);
    for category in Category::ALL {
        let snapshot = registry.to_snapshot();
        assert!(snapshot.entries(category).count() > 0, "{}", category);
    }
    let repeater = registry.index(Category::Weapons, "Repeater").unwrap();
    assert_eq!(repeater.get(), 14);
}

#[test]
fn test_fixture_snapshot_is_sorted() {
    let content = std::fs::read_to_string(fixture_path("names.json")).unwrap();
    let snapshot = RegistrySnapshot::from_json(&content).unwrap();
    assert_eq!(snapshot.to_json_pretty().unwrap().trim(), content.trim());
}

#[test]
fn test_appended_snapshot_accepted() {
    let previous = RegistrySnapshot::from_file(fixture_path("names.json")).unwrap();
    let mut next = previous.clone();
    next.insert(Category::Weapons, "Brutality of Boreus", 73);
    next.insert(Category::Omnicells, "Tempest", 4);
    next.check_append_only(&previous).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("names.json");
    next.save_to_file(&path).unwrap();
    let registry = NameRegistry::load(&path).unwrap();
    assert_eq!(
        registry.name(Category::Omnicells, NameIndex::new(4).unwrap()),
        Some("Tempest")
    );
}

#[test]
fn test_renumbered_snapshot_rejected() {
    let previous = RegistrySnapshot::from_file(fixture_path("names.json")).unwrap();
    let mut next = previous.clone();
    next.insert(Category::Cells, "+3 Conduit Cell", 130);
    assert!(matches!(
        next.check_append_only(&previous),
        Err(RegistryError::Reassigned { previous: 117, current: 130, .. })
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let err = NameRegistry::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RegistryError::Io(_)));
}
