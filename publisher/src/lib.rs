//! Self-update artefact publisher.
//!
//! Turns a built binary, or a directory of per-platform binaries, into the
//! files a self-updating application polls: a JSON manifest per platform
//! recording the release version and the binary's SHA-256, and a
//! gzip-compressed copy of the binary under a version-keyed path. The
//! `selfupdatectl` binary is a thin CLI over this library.
//!
//! # Modules
//!
//! - [`artefact`] - Digests, manifests, compression, platforms and layout
//! - [`cli`] - Command-line argument definitions and CLI errors
//! - [`config`] - Run configuration threaded through the pipeline
//! - [`fanout`] - Single-file and directory fan-out controller
//! - [`publish`] - Single-platform publishing
//! - [`publish_error`] - Error types for publishing operations

pub mod artefact;
pub mod cli;
pub mod config;
pub mod fanout;
pub mod publish;
pub mod publish_error;
