//! Build codec facade.
//!
//! Ties the backends, migration chain, registry and bond validator
//! together. A `BuildCodec` is immutable after construction and can be
//! shared across threads behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use build_id_types::{BuildFlags, BuildRecord, CURRENT_BUILD_VERSION};
use serde::Serialize;
use tracing::{debug, warn};

use crate::codec::{Backend, Codecs, Decoded};
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::layout;
use crate::migration::{MigrationChain, MigrationContext, UpgradeOutcome};
use crate::record_codec::{record_from_values, record_to_values};
use crate::registry::NameRegistry;
use crate::resolve::{self, NamedBuild};
use crate::validator::{BondValidator, KeepBond};

/// Decode diagnostics for an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Backend that accepted the string
    pub backend: Backend,
    /// Schema version tag
    pub version: u64,
    /// Number of decoded integers
    pub len: usize,
    pub values: Vec<u64>,
    /// True if `len` matches a layout of `version`
    pub valid_layout: bool,
    /// `(from, to)` of the migrations an upgrade would run
    pub planned_steps: Vec<(u32, u32)>,
}

/// Encodes and decodes loadouts.
pub struct BuildCodec {
    registry: Arc<NameRegistry>,
    chain: MigrationChain,
    validator: Box<dyn BondValidator>,
}

impl fmt::Debug for BuildCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildCodec")
            .field("registry_entries", &self.registry.len())
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

impl BuildCodec {
    /// Creates a codec over `registry`.
    ///
    /// # Arguments
    /// * `registry` - Shared name registry
    /// * `config` - Backend and migration settings
    ///
    /// # Returns
    /// `Err(CodecError::Registry)` if the retired or successor weapon is not
    /// in the registry.
    pub fn new(registry: Arc<NameRegistry>, config: &CodecConfig) -> Result<Self> {
        let codecs = Codecs::new(&config.legacy_salt, config.progressive_min_fields)?;
        let context = MigrationContext::from_registry(
            &registry,
            &config.retired_weapon,
            &config.successor_weapon,
        )?;
        let chain = MigrationChain::new(codecs, context)
            .with_reject_unknown_versions(config.reject_unknown_versions);
        Ok(Self {
            registry,
            chain,
            validator: Box::new(KeepBond),
        })
    }

    /// Loads the registry named by `config` and creates a codec.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        let registry = NameRegistry::load(&config.registry_path)?;
        Self::new(Arc::new(registry), config)
    }

    /// Replaces the bond validator.
    pub fn with_validator(mut self, validator: impl BondValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn codecs(&self) -> &Codecs {
        self.chain.codecs()
    }

    pub fn chain(&self) -> &MigrationChain {
        &self.chain
    }

    /// Progressive decode without migration.
    pub fn decode_any(&self, id: &str) -> Result<Decoded> {
        self.codecs().decode_any(id)
    }

    /// Encodes `record` with the current backend.
    ///
    /// # Returns
    /// `Err(CodecError::ValueOutOfRange)` if a level exceeds
    /// [`MAX_LEVEL`](build_id_types::MAX_LEVEL).
    pub fn serialize(&self, record: &BuildRecord) -> Result<String> {
        let backend = Backend::for_version(CURRENT_BUILD_VERSION);
        self.codecs().encode(&record_to_values(record)?, backend)
    }

    /// Decodes `id`, migrating it to the current schema.
    ///
    /// `UPGRADED_BUILD` is set if a migration changed the build's meaning,
    /// `INVALID_BUILD` if an index does not resolve in the registry. The
    /// bond validator runs last.
    pub fn deserialize(&self, id: &str) -> Result<BuildRecord> {
        let decoded = self.decode_any(id)?;
        let migrated = self.chain.migrate(decoded.values)?;
        if migrated.version != u64::from(CURRENT_BUILD_VERSION) {
            return Err(CodecError::UnrecognizedVersion(migrated.version));
        }

        let mut record = record_from_values(&migrated.values)?;
        if migrated.was_upgraded {
            record.flags |= BuildFlags::UPGRADED_BUILD;
        }
        let unresolved = resolve::unresolved_fields(&record, &self.registry);
        if !unresolved.is_empty() {
            warn!(fields = ?unresolved, "build references unknown indices");
            record.flags |= BuildFlags::INVALID_BUILD;
        }
        debug!(
            backend = %decoded.backend,
            steps = migrated.steps.len(),
            flags = ?record.flags,
            "deserialized build"
        );
        Ok(self.validator.validate(record))
    }

    /// Like [`deserialize`](Self::deserialize), degrading errors to an empty loadout.
    pub fn deserialize_or_empty(&self, id: &str) -> BuildRecord {
        self.deserialize(id).unwrap_or_else(|e| {
            warn!(error = %e, "could not decode build, using empty loadout");
            BuildRecord::empty()
        })
    }

    /// Decodes `id` into a named view.
    pub fn describe(&self, id: &str) -> Result<NamedBuild> {
        Ok(resolve::describe(&self.deserialize(id)?, &self.registry))
    }

    /// Encodes a named build.
    pub fn serialize_named(&self, named: &NamedBuild) -> Result<String> {
        self.serialize(&resolve::record_from_names(named, &self.registry)?)
    }

    /// Upgrades `id` to the current schema and backend, with details.
    ///
    /// The migrated values must form a valid record; identifiers with an
    /// unknown version pass through unchanged when the chain allows it.
    pub fn upgrade_outcome(&self, id: &str) -> Result<UpgradeOutcome> {
        let outcome = self.chain.upgrade(id)?;
        if outcome.migrated.version == u64::from(CURRENT_BUILD_VERSION) {
            record_from_values(&outcome.migrated.values)?;
        }
        Ok(outcome)
    }

    /// Upgrades `id` to the current schema and backend.
    pub fn upgrade(&self, id: &str) -> Result<String> {
        self.upgrade_outcome(id).map(|outcome| outcome.id)
    }

    /// True if `id` decodes and its length matches a layout of its version.
    pub fn is_valid(&self, id: &str) -> bool {
        match self.decode_any(id) {
            Ok(decoded) => layout::is_valid_length(decoded.version(), decoded.values.len()),
            Err(_) => false,
        }
    }

    /// Reports how `id` decodes and what an upgrade would do.
    pub fn inspect(&self, id: &str) -> Result<Diagnostics> {
        let decoded = self.decode_any(id)?;
        let version = decoded.version();
        let valid_layout = layout::is_valid_length(version, decoded.values.len());
        let planned_steps = if valid_layout {
            self.chain
                .plan(version)
                .into_iter()
                .map(|step| (step.from, step.to))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Diagnostics {
            backend: decoded.backend,
            version,
            len: decoded.values.len(),
            values: decoded.values,
            valid_layout,
            planned_steps,
        })
    }
}
