//! Run configuration threaded through the publishing pipeline.
//!
//! A [`PublishConfig`] replaces process-wide state: the CLI builds one value
//! from arguments and environment, then hands it to the fan-out controller,
//! which passes it by reference to each publisher.

use crate::artefact::layout::OutputLayout;
use crate::artefact::manifest::ReleaseVersion;
use camino::Utf8PathBuf;
use std::num::NonZeroUsize;

/// Settings shared by every publisher in one run.
///
/// # Examples
///
/// ```
/// use selfupdate_publisher::config::PublishConfig;
/// use std::num::NonZeroUsize;
///
/// let config = PublishConfig::new("1.2", "public").with_jobs(NonZeroUsize::new(4));
/// assert_eq!(config.version().as_str(), "1.2");
/// assert_eq!(config.layout().root(), "public");
/// assert_eq!(config.jobs().map(NonZeroUsize::get), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    version: ReleaseVersion,
    layout: OutputLayout,
    jobs: Option<NonZeroUsize>,
}

impl PublishConfig {
    /// Configure a run publishing `version` into `output_dir`.
    #[must_use]
    pub fn new(version: impl Into<String>, output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            version: ReleaseVersion::new(version),
            layout: OutputLayout::new(output_dir),
            jobs: None,
        }
    }

    /// Bound directory-mode parallelism to `jobs` worker threads.
    ///
    /// `None` uses the global pool, sized to the available CPUs.
    #[must_use]
    pub fn with_jobs(mut self, jobs: Option<NonZeroUsize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// The release version being published.
    #[must_use]
    pub const fn version(&self) -> &ReleaseVersion {
        &self.version
    }

    /// The output layout.
    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// The worker-pool bound, if any.
    #[must_use]
    pub const fn jobs(&self) -> Option<NonZeroUsize> {
        self.jobs
    }
}
