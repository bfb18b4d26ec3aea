//! Sqids backends (v7 and v8).
//!
//! Both backends run the `sqids` algorithm over different alphabets with the
//! library's default blocklist. An encoding that contains a blocked word is
//! re-rolled with the next alphabet offset, so decoding accepts exactly the
//! strings the encoder would produce.

use std::collections::HashSet;

use sqids::Sqids;

use crate::codec::{Backend, IntArrayCodec};
use crate::error::{CodecError, Result};

const MIN_ALPHABET_LENGTH: usize = 3;

/// Sqids codec bound to one alphabet.
#[derive(Debug, Clone)]
pub struct SqidsCodec {
    backend: Backend,
    sqids: Sqids,
    alphabet: HashSet<u8>,
}

impl SqidsCodec {
    /// Creates a codec for `backend` over `alphabet`.
    ///
    /// # Returns
    /// `Err(CodecError::InvalidAlphabet)` if the alphabet is not ASCII, is
    /// shorter than three characters, or repeats a character.
    pub fn new(backend: Backend, alphabet: &str) -> Result<Self> {
        if !alphabet.is_ascii() {
            return Err(CodecError::InvalidAlphabet {
                backend,
                detail: "alphabet must be ASCII".to_string(),
            });
        }
        if alphabet.len() < MIN_ALPHABET_LENGTH {
            return Err(CodecError::InvalidAlphabet {
                backend,
                detail: format!("alphabet needs at least {} characters", MIN_ALPHABET_LENGTH),
            });
        }
        let unique: HashSet<u8> = alphabet.bytes().collect();
        if unique.len() != alphabet.len() {
            return Err(CodecError::InvalidAlphabet {
                backend,
                detail: "alphabet repeats a character".to_string(),
            });
        }

        let sqids = Sqids::builder()
            .alphabet(alphabet.chars().collect())
            .build()
            .map_err(|e| CodecError::InvalidAlphabet {
                backend,
                detail: e.to_string(),
            })?;

        Ok(Self {
            backend,
            sqids,
            alphabet: unique,
        })
    }
}

impl IntArrayCodec for SqidsCodec {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn encode(&self, values: &[u64]) -> Result<String> {
        self.sqids.encode(values).map_err(|e| CodecError::Encode {
            backend: self.backend,
            detail: e.to_string(),
        })
    }

    fn decode(&self, id: &str) -> Result<Vec<u64>> {
        if id.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(c) = id
            .chars()
            .find(|c| !c.is_ascii() || !self.alphabet.contains(&(*c as u8)))
        {
            return Err(CodecError::decode(
                self.backend,
                format!("character {:?} not in alphabet", c),
            ));
        }

        let values = self.sqids.decode(id);
        if values.is_empty() {
            return Err(CodecError::decode(self.backend, "malformed identifier"));
        }

        // Overflowing chunks are dropped by the decoder and blocked
        // encodings are re-rolled by the encoder; both fail this check.
        if self.sqids.encode(&values).ok().as_deref() != Some(id) {
            return Err(CodecError::decode(self.backend, "not a canonical encoding"));
        }
        Ok(values)
    }
}
