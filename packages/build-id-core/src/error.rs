//! Codec error types.

use thiserror::Error;

use crate::codec::Backend;
use crate::registry::RegistryError;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised while encoding, decoding or migrating a build identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// String is not a valid encoding for the backend(s) tried
    #[error("Decode failed ({backend}): {detail}")]
    Decode { backend: Backend, detail: String },

    /// Backend could not produce an identifier for the sequence
    #[error("Encode failed ({backend}): {detail}")]
    Encode { backend: Backend, detail: String },

    /// Backend alphabet failed validation
    #[error("Invalid alphabet for {backend}: {detail}")]
    InvalidAlphabet { backend: Backend, detail: String },

    /// Decoded sequence length matches no layout of its version
    #[error("Invalid length {len} for schema version {version}")]
    InvalidLength { version: u64, len: usize },

    /// Version tag outside the known schema range
    #[error("Unrecognized schema version {0}")]
    UnrecognizedVersion(u64),

    /// Integer does not fit the record field it maps to
    #[error("Value {value} out of range for field '{field}'")]
    ValueOutOfRange { field: &'static str, value: u64 },

    /// URL or path does not carry a build identifier
    #[error("Invalid build URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Name registry error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl CodecError {
    /// Creates a decode error for `backend`.
    pub fn decode(backend: Backend, detail: impl Into<String>) -> Self {
        CodecError::Decode {
            backend,
            detail: detail.into(),
        }
    }

    /// True for failures of the string itself (bad alphabet, shape or length).
    ///
    /// Callers substitute an empty loadout for these instead of surfacing them.
    pub fn is_corrupt_id(&self) -> bool {
        matches!(
            self,
            CodecError::Decode { .. }
                | CodecError::InvalidLength { .. }
                | CodecError::UnrecognizedVersion(_)
                | CodecError::ValueOutOfRange { .. }
        )
    }
}
