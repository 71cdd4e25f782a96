//! Manifest schema for a platform's latest published binary.
//!
//! A manifest is the small JSON document an update client polls. It pairs
//! the release version with the SHA-256 digest of the uncompressed binary:
//!
//! ```json
//! {
//!     "Version": "1.2",
//!     "Sha256": "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="
//! }
//! ```
//!
//! Field order is fixed by the struct definition so rendered manifests are
//! byte-for-byte stable for the same input.

use super::digest::Sha256Digest;
use super::error::{ArtefactError, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fmt;

/// Indentation used when rendering manifests.
const MANIFEST_INDENT: &[u8] = b"    ";

/// An opaque, caller-supplied release version.
///
/// No parsing or ordering is applied; comparison is left to the update
/// client. The value is also used verbatim as a directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Wrap a version string.
    ///
    /// # Examples
    ///
    /// ```
    /// use selfupdate_publisher::artefact::manifest::ReleaseVersion;
    ///
    /// let version = ReleaseVersion::new("1.2");
    /// assert_eq!(version.as_str(), "1.2");
    /// ```
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The descriptor written to `<platform>.json`.
///
/// # Examples
///
/// ```
/// use selfupdate_publisher::artefact::digest::Sha256Digest;
/// use selfupdate_publisher::artefact::manifest::{Manifest, ReleaseVersion};
///
/// let manifest = Manifest::new(ReleaseVersion::new("1.2"), Sha256Digest::of(b"hello"));
/// let json = manifest.to_json().expect("manifest serialises");
/// assert!(json.starts_with("{\n    \"Version\": \"1.2\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Version")]
    version: ReleaseVersion,
    #[serde(rename = "Sha256")]
    sha256: Sha256Digest,
}

impl Manifest {
    /// Pair a version with the digest of the binary it describes.
    #[must_use]
    pub const fn new(version: ReleaseVersion, sha256: Sha256Digest) -> Self {
        Self { version, sha256 }
    }

    /// Return the release version.
    #[must_use]
    pub const fn version(&self) -> &ReleaseVersion {
        &self.version
    }

    /// Return the digest of the uncompressed binary.
    #[must_use]
    pub const fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }

    /// Render the manifest as indented JSON without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialisation fails.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(MANIFEST_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(<serde_json::Error as serde::ser::Error>::custom)
    }

    /// Parse a manifest previously rendered by [`Manifest::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ArtefactError::MalformedManifest`] when `json` is not a
    /// manifest object or its digest is not valid base64 of 32 bytes.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ArtefactError::MalformedManifest {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hello_manifest() -> Manifest {
        Manifest::new(ReleaseVersion::new("1.2"), Sha256Digest::of(b"hello"))
    }

    #[rstest]
    fn renders_indented_json_in_field_order(hello_manifest: Manifest) {
        let json = hello_manifest.to_json().expect("serialise");
        assert_eq!(
            json,
            concat!(
                "{\n",
                "    \"Version\": \"1.2\",\n",
                "    \"Sha256\": \"LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=\"\n",
                "}"
            )
        );
    }

    #[rstest]
    fn rendering_is_deterministic(hello_manifest: Manifest) {
        let first = hello_manifest.to_json().expect("serialise");
        let second = hello_manifest.clone().to_json().expect("serialise");
        assert_eq!(first, second);
    }

    #[rstest]
    fn parses_rendered_manifest(hello_manifest: Manifest) {
        let json = hello_manifest.to_json().expect("serialise");
        let parsed = Manifest::from_json(&json).expect("parse");
        assert_eq!(parsed, hello_manifest);
    }

    #[test]
    fn parses_compact_manifest() {
        let parsed = Manifest::from_json(
            r#"{"Version":"2.0","Sha256":"47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="}"#,
        )
        .expect("parse");
        assert_eq!(parsed.version().as_str(), "2.0");
        assert_eq!(parsed.sha256(), &Sha256Digest::of(b""));
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::missing_digest(r#"{"Version":"1.0"}"#)]
    #[case::lowercase_fields(r#"{"version":"1.0","sha256":"AAAA"}"#)]
    #[case::short_digest(r#"{"Version":"1.0","Sha256":"AAAA"}"#)]
    fn rejects_malformed_manifests(#[case] json: &str) {
        let err = Manifest::from_json(json).expect_err("malformed");
        assert!(
            matches!(err, ArtefactError::MalformedManifest { .. }),
            "expected MalformedManifest, got {err:?}"
        );
    }

    #[test]
    fn version_displays_verbatim() {
        assert_eq!(ReleaseVersion::new("v1.2.3-rc.1").to_string(), "v1.2.3-rc.1");
    }
}
