//! Schema migration chain.
//!
//! Migrations are an ordered table of `(from, to, transform)` steps. The
//! driver applies them strictly in sequence until the sequence reaches
//! [`CURRENT_BUILD_VERSION`]; there is no skip-ahead and no downgrade.

mod steps;

use std::fmt;

use build_id_types::{Category, NameIndex, CURRENT_BUILD_VERSION};
use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::{Backend, Codecs};
use crate::error::{CodecError, Result};
use crate::layout::{self, Layout};
use crate::registry::NameRegistry;

/// Output of one transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// Sequence in the target layout
    pub values: Vec<u64>,
    /// True if the step changed the meaning of the build
    pub was_upgraded: bool,
}

impl Converted {
    fn relayout(source: &Layout, values: &[u64], target: &Layout) -> Self {
        Self {
            values: source.relayout(values, target),
            was_upgraded: false,
        }
    }

    fn unchanged(values: Vec<u64>) -> Self {
        Self {
            values,
            was_upgraded: false,
        }
    }
}

/// Signature of a migration transform.
pub type TransformFn = fn(&MigrationContext, &Layout, Vec<u64>) -> Converted;

/// One entry of the migration table.
#[derive(Clone, Copy)]
pub struct MigrationStep {
    pub from: u32,
    pub to: u32,
    pub transform: TransformFn,
}

impl fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Ordered migration table. Adding a schema version appends one entry.
pub static MIGRATIONS: [MigrationStep; 6] = [
    MigrationStep {
        from: 2,
        to: 3,
        transform: steps::version_2_to_3,
    },
    MigrationStep {
        from: 3,
        to: 4,
        transform: steps::version_3_to_4,
    },
    MigrationStep {
        from: 4,
        to: 5,
        transform: steps::version_4_to_5,
    },
    MigrationStep {
        from: 5,
        to: 6,
        transform: steps::version_5_to_6,
    },
    MigrationStep {
        from: 6,
        to: 7,
        transform: steps::version_6_to_7,
    },
    MigrationStep {
        from: 7,
        to: 8,
        transform: steps::version_7_to_8,
    },
];

/// Returns the step that starts at `version`.
pub fn step_for(version: u64) -> Option<&'static MigrationStep> {
    MIGRATIONS.iter().find(|step| u64::from(step.from) == version)
}

/// Registry-derived inputs of the business-rule patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationContext {
    /// Weapon retired in schema v5
    pub retired_weapon: NameIndex,
    /// Weapon that replaces it
    pub successor_weapon: NameIndex,
}

impl MigrationContext {
    pub fn new(retired_weapon: NameIndex, successor_weapon: NameIndex) -> Self {
        Self {
            retired_weapon,
            successor_weapon,
        }
    }

    /// Resolves the retired and successor weapons by name.
    ///
    /// # Returns
    /// `Err(CodecError::Registry)` if either name is missing.
    pub fn from_registry(
        registry: &NameRegistry,
        retired_weapon: &str,
        successor_weapon: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            registry.require_index(Category::Weapons, retired_weapon)?,
            registry.require_index(Category::Weapons, successor_weapon)?,
        ))
    }
}

/// A migrated integer sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Migrated {
    /// Sequence in the final layout
    pub values: Vec<u64>,
    /// Schema version of `values`
    pub version: u64,
    /// True if any step changed the meaning of the build
    pub was_upgraded: bool,
    /// `(from, to)` of every applied step
    pub steps: Vec<(u32, u32)>,
}

/// Result of a single string-level step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub id: String,
    pub was_upgraded: bool,
}

/// Result of upgrading an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeOutcome {
    /// Re-encoded identifier
    pub id: String,
    #[serde(flatten)]
    pub migrated: Migrated,
}

/// Drives identifiers through [`MIGRATIONS`].
#[derive(Debug, Clone)]
pub struct MigrationChain {
    codecs: Codecs,
    context: MigrationContext,
    reject_unknown_versions: bool,
}

impl MigrationChain {
    /// Creates a chain that rejects unknown schema versions.
    pub fn new(codecs: Codecs, context: MigrationContext) -> Self {
        Self {
            codecs,
            context,
            reject_unknown_versions: true,
        }
    }

    /// Sets whether unknown versions fail or pass through unchanged.
    pub fn with_reject_unknown_versions(mut self, reject: bool) -> Self {
        self.reject_unknown_versions = reject;
        self
    }

    pub fn codecs(&self) -> &Codecs {
        &self.codecs
    }

    pub fn context(&self) -> &MigrationContext {
        &self.context
    }

    /// Steps that would run for a sequence tagged `version`.
    pub fn plan(&self, version: u64) -> Vec<&'static MigrationStep> {
        let mut plan = Vec::new();
        let mut current = version;
        while let Some(step) = step_for(current) {
            plan.push(step);
            current = u64::from(step.to);
        }
        plan
    }

    /// Applies one step to a validated sequence.
    fn apply(&self, step: &MigrationStep, values: Vec<u64>) -> Result<Converted> {
        let source = layout::layout_of(&values)?;
        let mut converted = (step.transform)(&self.context, source, values);

        if converted.values.first() == Some(&u64::from(step.from)) {
            warn!(from = step.from, to = step.to, "step kept its source version, stamping target");
            converted.values[0] = u64::from(step.to);
        }

        layout::layout_for(u64::from(step.to), converted.values.len()).map_err(|e| {
            CodecError::decode(
                Backend::for_version(step.from),
                format!("migration {} -> {} failed: {}", step.from, step.to, e),
            )
        })?;
        debug!(
            from = step.from,
            to = step.to,
            was_upgraded = converted.was_upgraded,
            "applied migration step"
        );
        Ok(converted)
    }

    /// Migrates a decoded sequence to the current schema.
    ///
    /// # Returns
    /// `Err(CodecError::UnrecognizedVersion)` for versions outside the
    /// known range (unless pass-through is enabled), and
    /// `Err(CodecError::InvalidLength)` if the input matches no layout of
    /// its version.
    pub fn migrate(&self, values: Vec<u64>) -> Result<Migrated> {
        let version = values.first().copied().unwrap_or(0);
        if !layout::is_known_version(version) && !self.reject_unknown_versions {
            warn!(version, "unknown schema version passed through unchanged");
            return Ok(Migrated {
                values,
                version,
                was_upgraded: false,
                steps: Vec::new(),
            });
        }
        layout::layout_of(&values)?;

        let mut values = values;
        let mut was_upgraded = false;
        let mut applied = Vec::new();
        while let Some(step) = step_for(values[0]) {
            let converted = self.apply(step, values)?;
            was_upgraded |= converted.was_upgraded;
            applied.push((step.from, step.to));
            values = converted.values;
        }

        Ok(Migrated {
            version: values[0],
            values,
            was_upgraded,
            steps: applied,
        })
    }

    /// Upgrades `id` to the current schema and backend.
    pub fn upgrade(&self, id: &str) -> Result<UpgradeOutcome> {
        let decoded = self.codecs.decode_any(id)?;
        let migrated = self.migrate(decoded.values)?;

        let id = if migrated.steps.is_empty() && !layout::is_known_version(migrated.version) {
            id.to_string()
        } else {
            let backend = Backend::for_version(CURRENT_BUILD_VERSION);
            self.codecs.encode(&migrated.values, backend)?
        };
        Ok(UpgradeOutcome { id, migrated })
    }

    /// Applies the single step starting at `from` to `id`.
    ///
    /// The result is encoded with the backend of the step's target version.
    ///
    /// # Returns
    /// `Err(CodecError::Decode)` if `id` is not tagged `from`.
    pub fn convert_version(&self, from: u32, id: &str) -> Result<StepOutcome> {
        let step =
            step_for(u64::from(from)).ok_or(CodecError::UnrecognizedVersion(u64::from(from)))?;
        let decoded = self.codecs.decode_any(id)?;
        if decoded.version() != u64::from(from) {
            return Err(CodecError::decode(
                decoded.backend,
                format!("expected schema version {}, found {}", from, decoded.version()),
            ));
        }

        let converted = self.apply(step, decoded.values)?;
        Ok(StepOutcome {
            id: self
                .codecs
                .encode(&converted.values, Backend::for_version(step.to))?,
            was_upgraded: converted.was_upgraded,
        })
    }

    pub fn convert_version_2_to_3(&self, id: &str) -> Result<StepOutcome> {
        self.convert_version(2, id)
    }

    pub fn convert_version_3_to_4(&self, id: &str) -> Result<StepOutcome> {
        self.convert_version(3, id)
    }

    pub fn convert_version_4_to_5(&self, id: &str) -> Result<StepOutcome> {
        self.convert_version(4, id)
    }

    pub fn convert_version_5_to_6(&self, id: &str) -> Result<StepOutcome> {
        self.convert_version(5, id)
    }

    pub fn convert_version_6_to_7(&self, id: &str) -> Result<StepOutcome> {
        self.convert_version(6, id)
    }

    pub fn convert_version_7_to_8(&self, id: &str) -> Result<StepOutcome> {
        self.convert_version(7, id)
    }
}
