//! CLI argument definitions for `selfupdatectl`.
//!
//! Parsing and input defaulting live here so the binary stays focused on
//! orchestration. Both positional arguments are optional at the clap level:
//! when either is missing the binary prints usage and exits successfully.

use crate::artefact::platform::Platform;
use crate::config::PublishConfig;
use crate::fanout::PublishRequest;
use crate::publish_error::PublishError;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "public";

/// Publish self-update manifests and compressed binaries.
#[derive(Parser, Debug, Clone)]
#[command(name = "selfupdatectl")]
#[command(version, about)]
#[command(long_about = concat!(
    "Publish self-update manifests and compressed binaries.\n\n",
    "For each platform, writes <DIR>/<platform>.json recording the version and the ",
    "SHA-256 of the binary, and <DIR>/<VERSION>/<platform>.gz holding the gzip-compressed ",
    "binary.\n\n",
    "When SOURCE is a directory, every file inside it is published concurrently and its ",
    "file name is used as the platform (e.g. darwin-amd64, linux-arm64). --platform ",
    "applies only to a single SOURCE file.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Single platform:\n",
    "    $ selfupdatectl myapp 1.2\n\n",
    "  Cross platform, one binary per platform file name:\n",
    "    $ selfupdatectl /tmp/mybinaries/ 1.2\n\n",
    "  Explicit platform and output directory:\n",
    "    $ selfupdatectl --platform linux-arm64 -o dist target/release/myapp 1.2",
))]
pub struct Cli {
    /// Binary to publish, or a directory of binaries named by platform.
    #[arg(value_name = "SOURCE")]
    pub source: Option<Utf8PathBuf>,

    /// Release version recorded in manifests and used as the artefact directory.
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Output directory for manifests and artefacts.
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: Utf8PathBuf,

    /// Target platform in the form OS-ARCH [default: $GOOS-$GOARCH if both are
    /// set, otherwise the running OS and architecture]. Spelled with two
    /// dashes; a single-dash `-platform` is read as short flags.
    #[arg(long, value_name = "OS-ARCH")]
    pub platform: Option<String>,

    /// Number of platforms published in parallel [default: available CPUs].
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Build the request and configuration, or `None` when a positional
    /// argument is missing.
    ///
    /// The platform is resolved here: `--platform`, else `$GOOS-$GOARCH`,
    /// else the running system.
    #[must_use]
    pub fn inputs(&self) -> Option<(PublishRequest, PublishConfig)> {
        let source = self.source.clone()?;
        let version = self.version.clone()?;
        let request = PublishRequest::new(source, Platform::resolve(self.platform.as_deref()));
        let config = PublishConfig::new(version, self.output.clone()).with_jobs(self.jobs);
        Some((request, config))
    }

    /// Log level selected by `-q` and `-v`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl Default for Cli {
    /// Creates a `Cli` with no positional arguments and default flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use selfupdate_publisher::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert!(cli.inputs().is_none());
    /// assert_eq!(cli.output, "public");
    /// ```
    fn default() -> Self {
        Self {
            source: None,
            version: None,
            output: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            platform: None,
            jobs: None,
            verbosity: 0,
            quiet: false,
        }
    }
}

/// Errors reported by `selfupdatectl`.
#[derive(Debug, Error)]
pub enum CliError {
    /// The run could not start or could not inspect its source.
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Some platforms failed; the others were published.
    #[error("failed to publish {failed} of {total} platform(s)")]
    PartialFailure {
        /// Number of failed platforms.
        failed: usize,
        /// Number of platforms attempted.
        total: usize,
    },

    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
