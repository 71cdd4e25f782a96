//! Single-platform publishing.
//!
//! [`publish`] reads the source binary exactly once, then derives both
//! outputs from that one buffer: the manifest digest and the compressed
//! artefact can never describe different contents, even if the source file
//! changes while the run is in progress.
//!
//! Files are written in place without a temporary-and-rename step; an
//! interrupted run can leave a partially written file behind.

use crate::artefact::archive::compress;
use crate::artefact::digest::Sha256Digest;
use crate::artefact::manifest::Manifest;
use crate::artefact::platform::Platform;
use crate::config::PublishConfig;
use crate::publish_error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fs;
use std::io;

/// Permission bits for directories created by the publisher.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// What a successful [`publish`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutput {
    /// The platform the outputs are keyed by.
    pub platform: Platform,
    /// The manifest written to [`PublishOutput::manifest_path`].
    pub manifest: Manifest,
    /// Path of the written `<platform>.json`.
    pub manifest_path: Utf8PathBuf,
    /// Path of the written `<version>/<platform>.gz`.
    pub artefact_path: Utf8PathBuf,
    /// Size of the source binary in bytes.
    pub source_len: usize,
    /// Size of the compressed artefact in bytes.
    pub compressed_len: usize,
}

/// Publish one binary for one platform.
///
/// Writes `<output>/<platform>.json` and `<output>/<version>/<platform>.gz`,
/// replacing any previous files at those paths. The version directory is
/// created if absent.
///
/// # Errors
///
/// Returns [`PublishError::ReadSource`] if `source` cannot be read,
/// [`PublishError::WriteManifest`], [`PublishError::CreateVersionDir`] or
/// [`PublishError::WriteArtefact`] if an output cannot be written, and
/// [`PublishError::Compress`] if compression fails. Outputs of other
/// platforms are never touched.
pub fn publish(
    source: &Utf8Path,
    platform: &Platform,
    config: &PublishConfig,
) -> Result<PublishOutput> {
    let bytes = fs::read(source).map_err(|e| PublishError::ReadSource {
        path: source.to_owned(),
        source: e,
    })?;
    debug!("{platform}: read {} bytes from {source}", bytes.len());

    let digest = Sha256Digest::of(&bytes);
    debug!("{platform}: sha256 {digest}");

    let manifest = Manifest::new(config.version().clone(), digest);
    let layout = config.layout();
    let manifest_path = layout.manifest_path(platform);
    fs::write(&manifest_path, manifest.to_json()?).map_err(|e| PublishError::WriteManifest {
        path: manifest_path.clone(),
        source: e,
    })?;

    let version_dir = layout.version_dir(config.version());
    create_dir_all(&version_dir).map_err(|e| PublishError::CreateVersionDir {
        path: version_dir.clone(),
        source: e,
    })?;

    let compressed = compress(&bytes).map_err(|e| PublishError::Compress {
        path: source.to_owned(),
        source: e,
    })?;
    let artefact_path = layout.artefact_path(config.version(), platform);
    fs::write(&artefact_path, &compressed).map_err(|e| PublishError::WriteArtefact {
        path: artefact_path.clone(),
        source: e,
    })?;

    info!(
        "{platform}: published {} ({} -> {} bytes)",
        config.version(),
        bytes.len(),
        compressed.len()
    );

    Ok(PublishOutput {
        platform: platform.clone(),
        manifest,
        manifest_path,
        artefact_path,
        source_len: bytes.len(),
        compressed_len: compressed.len(),
    })
}

/// Create `path` and any missing parents; existing directories are fine.
pub(crate) fn create_dir_all(path: &Utf8Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
