//! SHA-256 digest of a published binary.
//!
//! The digest is always computed over the uncompressed bytes. Manifests
//! carry it as standard padded base64, the JSON encoding update clients use
//! for byte arrays; logs and `Display` use lowercase hex.

use super::error::{ArtefactError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a raw SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A raw SHA-256 digest.
///
/// # Examples
///
/// ```
/// use selfupdate_publisher::artefact::digest::Sha256Digest;
///
/// let digest = Sha256Digest::of(b"hello");
/// assert_eq!(
///     digest.to_base64(),
///     "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; DIGEST_LEN]);

impl Sha256Digest {
    /// Hash `bytes` in one pass.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Return the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Return the digest as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Return the digest as standard padded base64.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Decode a digest from standard padded base64.
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::InvalidDigestEncoding`] when `text` is not
    /// valid base64, or [`ArtefactError::InvalidDigestLength`] when it does
    /// not decode to exactly 32 bytes.
    pub fn from_base64(text: &str) -> Result<Self> {
        let raw = STANDARD
            .decode(text)
            .map_err(|e| ArtefactError::InvalidDigestEncoding {
                reason: e.to_string(),
            })?;
        Self::try_from(raw.as_slice())
    }
}

impl TryFrom<&[u8]> for Sha256Digest {
    type Error = ArtefactError;

    fn try_from(value: &[u8]) -> Result<Self> {
        <[u8; DIGEST_LEN]>::try_from(value)
            .map(Self)
            .map_err(|_| ArtefactError::InvalidDigestLength {
                expected: DIGEST_LEN,
                actual: value.len(),
            })
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Digest({self})")
    }
}

impl Serialize for Sha256Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Sha256Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base64(&text).map_err(serde::de::Error::custom)
    }
}
