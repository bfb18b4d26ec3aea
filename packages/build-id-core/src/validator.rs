//! Bond weapon post-validation seam.
//!
//! Game-rule legality (weapon type, element and rarity compatibility) lives
//! outside this crate. The codec hands every decoded record to a
//! [`BondValidator`] and keeps whatever it returns.

use build_id_types::BuildRecord;

/// Validates the bond weapon of a decoded record.
///
/// Implementations read `weapon` and `bond_weapon` and may clear
/// `bond_weapon`. They must be pure.
pub trait BondValidator: Send + Sync {
    fn validate(&self, record: BuildRecord) -> BuildRecord;
}

/// Accepts every bond weapon.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepBond;

impl BondValidator for KeepBond {
    fn validate(&self, record: BuildRecord) -> BuildRecord {
        record
    }
}

impl<F> BondValidator for F
where
    F: Fn(BuildRecord) -> BuildRecord + Send + Sync,
{
    fn validate(&self, record: BuildRecord) -> BuildRecord {
        self(record)
    }
}
