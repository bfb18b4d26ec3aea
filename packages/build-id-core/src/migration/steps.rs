//! Version-to-version transforms.
//!
//! Each transform receives a sequence already matched to one of the source
//! version's layouts and returns the sequence in the target layout. Layout
//! validation of the output happens in the driver.

use tracing::debug;

use super::{Converted, MigrationContext};
use crate::layout::{self, Field, Layout};

/// 2 → 3: the fourth part moves to the end and loses its level.
pub(crate) fn version_2_to_3(
    _ctx: &MigrationContext,
    source: &Layout,
    values: Vec<u64>,
) -> Converted {
    let part4_level = source.get(&values, Field::WeaponPart4Level);
    if part4_level != 0 {
        debug!(part4_level, "dropping fourth part level");
    }
    Converted::relayout(source, &values, &layout::V3)
}

/// 3 → 4: parts regrouped as names then levels, omnicell added.
pub(crate) fn version_3_to_4(
    _ctx: &MigrationContext,
    source: &Layout,
    values: Vec<u64>,
) -> Converted {
    Converted::relayout(source, &values, &layout::V4)
}

/// 4 → 5: bond weapon added, part levels and the fourth part removed.
///
/// Identifiers tagged 4 but already in the 24-field order pass through
/// untouched. The retired modular weapon is replaced by its successor with
/// level and cells cleared; its first three parts carry over.
pub(crate) fn version_4_to_5(
    ctx: &MigrationContext,
    source: &Layout,
    values: Vec<u64>,
) -> Converted {
    if source.fields == layout::V5.fields {
        debug!("v4 identifier already in v5 field order");
        return Converted::unchanged(values);
    }

    let mut converted = Converted::relayout(source, &values, &layout::V5);
    let target = &layout::V5;
    if target.get(&converted.values, Field::WeaponName) == u64::from(ctx.retired_weapon.get()) {
        debug!(
            retired = %ctx.retired_weapon,
            successor = %ctx.successor_weapon,
            "replacing retired weapon"
        );
        let out = &mut converted.values;
        target.set(out, Field::WeaponName, u64::from(ctx.successor_weapon.get()));
        target.set(out, Field::WeaponLevel, 0);
        target.set(out, Field::WeaponCell0, 0);
        target.set(out, Field::WeaponCell1, 0);
        converted.was_upgraded = true;
    }
    converted
}

/// 5 → 6: flags exist from here on, but are not part of the string.
pub(crate) fn version_5_to_6(
    _ctx: &MigrationContext,
    source: &Layout,
    values: Vec<u64>,
) -> Converted {
    Converted::relayout(source, &values, &layout::V6)
}

/// 6 → 7: version tag only; the driver switches backend.
pub(crate) fn version_6_to_7(
    _ctx: &MigrationContext,
    source: &Layout,
    values: Vec<u64>,
) -> Converted {
    Converted::relayout(source, &values, &layout::V7)
}

/// 7 → 8: version tag only; the driver switches backend.
pub(crate) fn version_7_to_8(
    _ctx: &MigrationContext,
    source: &Layout,
    values: Vec<u64>,
) -> Converted {
    Converted::relayout(source, &values, &layout::V8)
}
