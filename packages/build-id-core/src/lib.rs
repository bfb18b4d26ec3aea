//! Build identifier codec and schema migration engine.
//!
//! A loadout travels as a short URL-safe string. Decoding determines which
//! of three backends produced the string, migrates the integer sequence from
//! its schema version to the current one, and maps it onto a
//! [`BuildRecord`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use build_id_core::{BuildCodec, CodecConfig, NameRegistry};
//!
//! # fn main() -> build_id_core::Result<()> {
//! let registry = Arc::new(NameRegistry::load("names.json")?);
//! let codec = BuildCodec::new(registry, &CodecConfig::default())?;
//! let record = codec.deserialize("dbU0wFWC74i85CqFxCyTwTBTkTApHaC6VfeFbCgFjQhoCjmc1tpCmNcWCjkIv")?;
//! let current = codec.serialize(&record)?;
//! # Ok(())
//! # }
//! ```

pub mod build_codec;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod migration;
pub mod record_codec;
pub mod registry;
pub mod resolve;
pub mod url;
pub mod validator;

pub use build_codec::{BuildCodec, Diagnostics};
pub use codec::{Backend, Codecs, Decoded, IntArrayCodec};
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use layout::{Field, Layout};
pub use migration::{MigrationChain, MigrationContext, UpgradeOutcome};
pub use record_codec::{record_from_values, record_to_values};
pub use registry::{NameRegistry, RegistryError, RegistrySnapshot};
pub use resolve::NamedBuild;
pub use url::BuildId;
pub use validator::{BondValidator, KeepBond};

pub use build_id_types::{BuildFlags, BuildRecord, Category, NameIndex, CURRENT_BUILD_VERSION};
