//! Error types for publishing operations.
//!
//! Every filesystem failure carries the path it concerned, so a failed
//! directory-mode run can report which platform's output broke and where.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors arising while publishing a platform's manifest and artefact.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The source path does not exist or cannot be inspected.
    #[error("cannot access source {path}: {source}")]
    SourceMissing {
        /// The source path supplied by the caller.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The source binary could not be read.
    #[error("failed to read source binary {path}: {source}")]
    ReadSource {
        /// The binary that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A directory entry's name is not valid UTF-8, so it cannot name a
    /// platform.
    #[error("directory entry {} has a non-UTF-8 name", path.display())]
    NonUtf8EntryName {
        /// The offending entry.
        path: PathBuf,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        /// The output directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest could not be rendered.
    #[error("manifest serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The manifest file could not be written.
    #[error("failed to write manifest {path}: {source}")]
    WriteManifest {
        /// Destination of the manifest.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The per-version directory could not be created.
    #[error("failed to create version directory {path}: {source}")]
    CreateVersionDir {
        /// The version directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Compressing the binary failed.
    #[error("failed to compress {path}: {source}")]
    Compress {
        /// The binary being compressed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The compressed artefact could not be written.
    #[error("failed to write artefact {path}: {source}")]
    WriteArtefact {
        /// Destination of the artefact.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The dedicated worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias using [`PublishError`].
pub type Result<T> = std::result::Result<T, PublishError>;
