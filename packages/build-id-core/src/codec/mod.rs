//! Integer-sequence codecs.
//!
//! Three backends coexist permanently: identifiers encoded by a retired
//! backend must still decode.
//!
//! - [`Backend::Legacy`]: hashids with a fixed salt (schemas v2 to v6)
//! - [`Backend::V7`]: sqids with a 67-character alphabet (schema v7)
//! - [`Backend::V8`]: sqids with a 65-character alphabet (schema v8, current)

pub mod hashids;
pub mod progressive;
pub mod sqids;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use hashids::HashidsCodec;
pub use progressive::{Codecs, Decoded};
pub use sqids::SqidsCodec;

/// Alphabet of the v7 backend.
pub const V7_ALPHABET: &str = "kEbWmDyw~3Qq8aNH6l7u.TVvCjFUrX2si1!MzRS5OohK4ZJ9p-ABfcnGdLx_I0egYtP";

/// Alphabet of the v8 backend.
pub const V8_ALPHABET: &str = "2nVigEO7dqYR8BXyalmzo10TI~bQLNpr-PDSw3u9JZcW6j5kAGheMsCUv4_HtKfFx";

/// Salt of the legacy backend.
pub const LEGACY_SALT: &str = "spicy";

/// Codec backend identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// hashids, schemas v2 to v6
    Legacy,
    /// sqids, schema v7
    V7,
    /// sqids, schema v8
    V8,
}

impl Backend {
    /// Order in which progressive decode tries backends.
    pub const PROGRESSIVE_ORDER: [Backend; 3] = [Backend::Legacy, Backend::V7, Backend::V8];

    /// Backend used to encode identifiers of `version`.
    pub fn for_version(version: u32) -> Backend {
        match version {
            0..=6 => Backend::Legacy,
            7 => Backend::V7,
            _ => Backend::V8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Legacy => "legacy",
            Backend::V7 => "v7",
            Backend::V8 => "v8",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes sequences of non-negative integers to opaque strings and back.
///
/// Implementations are pure and hold no mutable state, so a single codec
/// may be shared across threads.
pub trait IntArrayCodec: Send + Sync {
    /// Backend this codec implements.
    fn backend(&self) -> Backend;

    /// Encodes `values`. An empty sequence encodes to the empty string.
    fn encode(&self, values: &[u64]) -> Result<String>;

    /// Decodes `id`.
    ///
    /// Fails on characters outside the alphabet and on strings that are not
    /// the canonical encoding of the values they decode to.
    fn decode(&self, id: &str) -> Result<Vec<u64>>;
}
