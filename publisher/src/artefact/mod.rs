//! Artefact values: digests, manifests, compression, platforms and layout.
//!
//! These building blocks are pure (or, for [`archive`], in-memory only) so
//! they can be tested without touching the filesystem. The
//! [`crate::publish`] module combines them into the on-disk pipeline.
//!
//! # Sub-modules
//!
//! - [`archive`] - Gzip compression with guaranteed finalisation.
//! - [`digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`error`] - Semantic error types for invalid values.
//! - [`layout`] - Canonical output paths (`OutputLayout`).
//! - [`manifest`] - Manifest schema (`Manifest`, `ReleaseVersion`).
//! - [`platform`] - `OS-ARCH` identifiers and their defaults (`Platform`).

pub mod archive;
pub mod digest;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod platform;
