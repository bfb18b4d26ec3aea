//! Shared fixtures.

use std::path::PathBuf;
use std::sync::Arc;

use build_id_core::{BuildCodec, CodecConfig, NameRegistry};

/// Schema v3 identifier shared before the omnicell release.
pub const V3_FIXTURE: &str = "dbU0wFWC74i85CqFxCyTwTBTkTApHaC6VfeFbCgFjQhoCjmc1tpCmNcWCjkIv";

/// Armour block shared by the generated fixtures.
pub const ARMOUR: [u64; 12] = [55, 15, 129, 4, 15, 18, 51, 15, 117, 2, 15, 117];

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn registry() -> Arc<NameRegistry> {
    Arc::new(NameRegistry::load(fixture_path("names.json")).unwrap())
}

pub fn codec() -> BuildCodec {
    BuildCodec::new(registry(), &CodecConfig::default()).unwrap()
}

/// Concatenates value blocks into one sequence.
pub fn values(parts: &[&[u64]]) -> Vec<u64> {
    parts.concat()
}
