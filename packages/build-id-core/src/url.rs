//! Build identifier URL form (`/b/<id>`).

use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Path segment that precedes a build identifier.
pub const BUILD_PATH_SEGMENT: &str = "b";

/// Characters escaped when writing an identifier into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An undecoded build identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    /// Wraps a raw identifier.
    ///
    /// # Returns
    /// `Err(CodecError::InvalidUrl)` if `id` is empty or contains a path
    /// separator.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CodecError::InvalidUrl("empty build id".to_string()));
        }
        if id.contains('/') {
            return Err(CodecError::InvalidUrl(format!(
                "build id '{}' contains '/'",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Extracts the identifier from a `/b/<id>` path or a full URL.
    ///
    /// Query strings and fragments are ignored; the segment is
    /// percent-decoded.
    pub fn from_url_path(url: &str) -> Result<Self> {
        let path = match url.find("://") {
            Some(at) => {
                let rest = &url[at + 3..];
                rest.find('/').map_or("", |slash| &rest[slash..])
            }
            None => url,
        };
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let encoded = loop {
            match segments.next() {
                Some(BUILD_PATH_SEGMENT) => break segments.next(),
                Some(_) => continue,
                None => break None,
            }
        }
        .ok_or_else(|| CodecError::InvalidUrl(format!("no /b/<id> segment in '{}'", url)))?;

        let decoded = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|e| CodecError::InvalidUrl(format!("invalid escape in '{}': {}", url, e)))?;
        Self::new(decoded.into_owned())
    }

    /// Returns the `/b/<id>` path.
    pub fn to_url_path(&self) -> String {
        format!(
            "/{}/{}",
            BUILD_PATH_SEGMENT,
            utf8_percent_encode(&self.0, SEGMENT)
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for BuildId {
    type Err = CodecError;

    /// Accepts either a bare identifier or anything [`BuildId::from_url_path`] accepts.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains('/') {
            Self::from_url_path(s)
        } else {
            Self::new(s)
        }
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BuildId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
