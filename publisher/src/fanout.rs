//! Fan-out controller: publish one file or a whole directory of builds.
//!
//! # Mapping rule
//!
//! When the source is a directory, each immediate entry is published under
//! a platform equal to its file name. A directory containing `darwin-amd64`
//! and `linux-arm64` therefore yields `darwin-amd64.json`,
//! `linux-arm64.json` and the matching `<version>/*.gz` artefacts. There is
//! no per-entry override; the explicit or default platform applies only to
//! single-file sources.
//!
//! # Concurrency
//!
//! Directory entries are published in parallel on a rayon pool and the
//! controller returns only after every entry has finished. Units share
//! nothing but the output directory, into which each writes disjoint paths,
//! so no locking is needed. A failing unit is recorded in the
//! [`FanOutReport`] and never stops the others. There is no timeout.
//!
//! An entry whose name is not valid UTF-8 is reported as a failed unit; its
//! siblings are still published. If the directory itself cannot be listed,
//! the source is published as a single file under the fallback platform
//! instead.

use crate::artefact::platform::Platform;
use crate::config::PublishConfig;
use crate::publish::{PublishOutput, create_dir_all, publish};
use crate::publish_error::{PublishError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;

/// What to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// A binary, or a directory of binaries named by platform.
    pub source: Utf8PathBuf,
    /// Platform used when `source` is published as a single file.
    pub platform: Platform,
}

impl PublishRequest {
    /// Build a request for `source` with a single-file fallback platform.
    #[must_use]
    pub fn new(source: impl Into<Utf8PathBuf>, platform: Platform) -> Self {
        Self {
            source: source.into(),
            platform,
        }
    }
}

/// One binary scheduled for publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSource {
    /// Platform key for the outputs.
    pub platform: Platform,
    /// Path of the binary.
    pub path: Utf8PathBuf,
}

/// The immediate entries of a source directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Entries to publish, sorted by platform.
    pub sources: Vec<PlatformSource>,
    /// Entries whose names are not valid UTF-8.
    pub rejected: Vec<PathBuf>,
}

/// How the controller interpreted the source path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// The source was a file, published under the request's platform.
    SingleFile,
    /// The source was a directory; each entry was published concurrently.
    Directory,
    /// The source looked like a directory but could not be listed, so it
    /// was published as a single file.
    DirectoryFallback,
}

/// The result of publishing one platform.
#[derive(Debug)]
pub struct PlatformOutcome {
    /// The platform the unit published.
    pub platform: Platform,
    /// What the publisher returned.
    pub result: Result<PublishOutput>,
}

/// Outcomes of every unit launched by [`run`].
#[derive(Debug)]
pub struct FanOutReport {
    mode: SourceMode,
    outcomes: Vec<PlatformOutcome>,
}

impl FanOutReport {
    /// How the source was interpreted.
    #[must_use]
    pub const fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Per-platform outcomes, ordered by platform name in directory mode.
    #[must_use]
    pub fn outcomes(&self) -> &[PlatformOutcome] {
        &self.outcomes
    }

    /// Whether every unit succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    /// Outputs of the units that succeeded.
    pub fn published(&self) -> impl Iterator<Item = &PublishOutput> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
    }

    /// Platforms whose units failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Platform, &PublishError)> {
        self.outcomes.iter().filter_map(|outcome| {
            outcome
                .result
                .as_ref()
                .err()
                .map(|e| (&outcome.platform, e))
        })
    }
}

/// Publish `request.source` as one file or as a directory of builds.
///
/// Creates the output directory first. Returns once every launched unit has
/// finished; per-platform failures are reported in the [`FanOutReport`].
///
/// # Errors
///
/// Returns [`PublishError::CreateOutputDir`] if the output directory cannot
/// be created, [`PublishError::SourceMissing`] if the source cannot be
/// inspected, or [`PublishError::WorkerPool`] if a bounded pool cannot be
/// started.
pub fn run(request: &PublishRequest, config: &PublishConfig) -> Result<FanOutReport> {
    run_with(request, config, list_entries)
}

/// [`run`] with an injectable directory lister.
fn run_with<L>(request: &PublishRequest, config: &PublishConfig, list: L) -> Result<FanOutReport>
where
    L: FnOnce(&Utf8Path) -> io::Result<DirectoryListing>,
{
    let root = config.layout().root();
    create_dir_all(root).map_err(|e| PublishError::CreateOutputDir {
        path: root.to_owned(),
        source: e,
    })?;

    let metadata = request
        .source
        .metadata()
        .map_err(|e| PublishError::SourceMissing {
            path: request.source.clone(),
            source: e,
        })?;

    if !metadata.is_dir() {
        return Ok(publish_single(request, config, SourceMode::SingleFile));
    }

    match list(&request.source) {
        Ok(listing) => {
            info!(
                "publishing {} platform(s) from {} as {}",
                listing.sources.len(),
                request.source,
                config.version()
            );
            let mut outcomes = publish_all(listing.sources, config)?;
            outcomes.extend(listing.rejected.into_iter().map(rejected_outcome));
            outcomes.sort_by(|a, b| a.platform.cmp(&b.platform));
            Ok(FanOutReport {
                mode: SourceMode::Directory,
                outcomes,
            })
        }
        Err(e) => {
            warn!(
                "cannot list {}: {e}; publishing it as a single file for {}",
                request.source, request.platform
            );
            Ok(publish_single(request, config, SourceMode::DirectoryFallback))
        }
    }
}

/// List the immediate entries of `dir`, each keyed by its file name.
///
/// Sources are sorted by name so reports are stable. Subdirectories are
/// included and fail when published, like any unreadable binary. Entries
/// whose names are not valid UTF-8 cannot name a platform and are returned
/// in [`DirectoryListing::rejected`] instead.
///
/// # Errors
///
/// Returns an [`io::Error`] if the directory or one of its entries cannot
/// be read.
pub fn list_entries(dir: &Utf8Path) -> io::Result<DirectoryListing> {
    let mut listing = DirectoryListing::default();
    for entry in dir.as_std_path().read_dir()? {
        let entry = entry?;
        match entry.file_name().into_string() {
            Ok(name) => listing.sources.push(PlatformSource {
                platform: Platform::from_entry_name(&name),
                path: dir.join(name),
            }),
            Err(_) => listing.rejected.push(entry.path()),
        }
    }
    listing.sources.sort_by(|a, b| a.platform.cmp(&b.platform));
    Ok(listing)
}

/// Record a non-UTF-8 entry as a failed unit keyed by its lossy name.
fn rejected_outcome(path: PathBuf) -> PlatformOutcome {
    let name = path
        .file_name()
        .map(OsStr::to_string_lossy)
        .unwrap_or_default();
    let platform = Platform::from_entry_name(&name);
    warn!("skipping {}: name is not valid UTF-8", path.display());
    PlatformOutcome {
        platform,
        result: Err(PublishError::NonUtf8EntryName { path }),
    }
}

/// Publish the request's source synchronously under its own platform.
fn publish_single(
    request: &PublishRequest,
    config: &PublishConfig,
    mode: SourceMode,
) -> FanOutReport {
    debug!("publishing {} as {}", request.source, request.platform);
    let result = publish(&request.source, &request.platform, config);
    FanOutReport {
        mode,
        outcomes: vec![PlatformOutcome {
            platform: request.platform.clone(),
            result,
        }],
    }
}

/// Publish every entry in parallel and wait for all of them.
fn publish_all(
    entries: Vec<PlatformSource>,
    config: &PublishConfig,
) -> Result<Vec<PlatformOutcome>> {
    let work = move || {
        entries
            .into_par_iter()
            .map(|entry| {
                let result = publish(&entry.path, &entry.platform, config);
                if let Err(e) = &result {
                    debug!("{}: {e}", entry.platform);
                }
                PlatformOutcome {
                    platform: entry.platform,
                    result,
                }
            })
            .collect::<Vec<_>>()
    };

    match config.jobs() {
        Some(jobs) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(jobs.get())
                .thread_name(|index| format!("publish-{index}"))
                .build()?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
