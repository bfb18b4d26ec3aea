//! Backend set and progressive decode.
//!
//! Identifiers carry no backend tag. [`Codecs::decode_any`] tries the
//! backends in a fixed order and accepts the first result with more than
//! `min_fields` elements; every layout that was ever encoded with the legacy
//! or v7 backend is longer than that. The v8 backend is the unconditional
//! fallback.
//!
//! This is a heuristic: two backends could in principle decode the same
//! string to sequences of acceptable length. The canonical re-encode check
//! each backend performs makes this unlikely, and the regression fixtures in
//! `tests/integration/fixture_tests.rs` pin every backend/version pairing.

use serde::Serialize;
use tracing::{debug, trace};

use crate::codec::{
    Backend, HashidsCodec, IntArrayCodec, SqidsCodec, LEGACY_SALT, V7_ALPHABET, V8_ALPHABET,
};
use crate::error::{CodecError, Result};

/// Minimum element count (exclusive) for accepting a legacy or v7 decode.
pub const DEFAULT_PROGRESSIVE_MIN_FIELDS: usize = 8;

/// Result of a progressive decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Backend that accepted the string
    pub backend: Backend,
    /// Raw integer sequence; element 0 is the schema version
    pub values: Vec<u64>,
}

impl Decoded {
    /// Schema version tag (element 0).
    pub fn version(&self) -> u64 {
        self.values.first().copied().unwrap_or(0)
    }
}

/// The three permanent backends.
#[derive(Debug, Clone)]
pub struct Codecs {
    legacy: HashidsCodec,
    v7: SqidsCodec,
    v8: SqidsCodec,
    min_fields: usize,
}

impl Codecs {
    /// Creates the backend set.
    ///
    /// # Arguments
    /// * `legacy_salt` - Salt of the legacy hashids backend
    /// * `min_fields` - Progressive decode threshold
    pub fn new(legacy_salt: &str, min_fields: usize) -> Result<Self> {
        Ok(Self {
            legacy: HashidsCodec::new(legacy_salt),
            v7: SqidsCodec::new(Backend::V7, V7_ALPHABET)?,
            v8: SqidsCodec::new(Backend::V8, V8_ALPHABET)?,
            min_fields,
        })
    }

    /// Creates the backend set used by every published identifier.
    pub fn standard() -> Result<Self> {
        Self::new(LEGACY_SALT, DEFAULT_PROGRESSIVE_MIN_FIELDS)
    }

    /// Returns the codec for `backend`.
    pub fn get(&self, backend: Backend) -> &dyn IntArrayCodec {
        match backend {
            Backend::Legacy => &self.legacy,
            Backend::V7 => &self.v7,
            Backend::V8 => &self.v8,
        }
    }

    pub fn encode(&self, values: &[u64], backend: Backend) -> Result<String> {
        self.get(backend).encode(values)
    }

    pub fn decode(&self, id: &str, backend: Backend) -> Result<Vec<u64>> {
        self.get(backend).decode(id)
    }

    /// Determines the backend that produced `id` and decodes it.
    ///
    /// # Returns
    /// `Err(CodecError::Decode)` if no backend accepts the string.
    pub fn decode_any(&self, id: &str) -> Result<Decoded> {
        for backend in [Backend::Legacy, Backend::V7] {
            match self.decode(id, backend) {
                Ok(values) if values.len() > self.min_fields => {
                    debug!(%backend, fields = values.len(), "progressive decode accepted");
                    return Ok(Decoded { backend, values });
                }
                Ok(values) => {
                    trace!(%backend, fields = values.len(), "too few fields, trying next backend");
                }
                Err(e) => {
                    trace!(%backend, error = %e, "backend rejected id");
                }
            }
        }

        let values = self.decode(id, Backend::V8)?;
        if values.is_empty() {
            return Err(CodecError::decode(Backend::V8, "empty identifier"));
        }
        debug!(fields = values.len(), "progressive decode fell back to v8");
        Ok(Decoded {
            backend: Backend::V8,
            values,
        })
    }
}
