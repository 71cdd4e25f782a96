//! Platform identifiers keying manifests and artefacts.
//!
//! A platform is an `OS-ARCH` string such as `darwin-amd64`. It comes from
//! one of three places:
//!
//! - an explicit `--platform` value;
//! - the name of a file inside a source directory (the file name *is* the
//!   platform, see [`Platform::from_entry_name`]);
//! - the environment: `$GOOS-$GOARCH` when both are set, otherwise the
//!   running system's OS and architecture in update-client naming.
//!
//! Identifiers are used verbatim as path components; no sanitisation is
//! applied.

use std::env;
use std::fmt;

/// Environment variable naming the target operating system.
pub const OS_ENV_VAR: &str = "GOOS";

/// Environment variable naming the target architecture.
pub const ARCH_ENV_VAR: &str = "GOARCH";

/// An `OS-ARCH` platform identifier.
///
/// # Examples
///
/// ```
/// use selfupdate_publisher::artefact::platform::Platform;
///
/// let platform = Platform::from_entry_name("linux-arm64");
/// assert_eq!(platform.as_str(), "linux-arm64");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Platform(String);

impl Platform {
    /// Wrap an explicit platform identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Use a directory entry's file name as its platform.
    ///
    /// In directory mode this is the only mapping: a directory holding
    /// `darwin-amd64` and `linux-arm64` publishes exactly those two keys.
    #[must_use]
    pub fn from_entry_name(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Join an OS and architecture as `OS-ARCH`.
    #[must_use]
    pub fn from_parts(os: &str, arch: &str) -> Self {
        Self(format!("{os}-{arch}"))
    }

    /// The platform of the running system, in update-client naming.
    ///
    /// # Examples
    ///
    /// ```
    /// use selfupdate_publisher::artefact::platform::Platform;
    ///
    /// let native = Platform::native();
    /// assert!(native.as_str().contains('-'));
    /// ```
    #[must_use]
    pub fn native() -> Self {
        Self::from_parts(
            client_os_name(env::consts::OS),
            client_arch_name(env::consts::ARCH),
        )
    }

    /// The default platform: `$GOOS-$GOARCH` when both are set and
    /// non-empty, otherwise [`Platform::native`].
    #[must_use]
    pub fn from_env_or_native() -> Self {
        match (non_empty_var(OS_ENV_VAR), non_empty_var(ARCH_ENV_VAR)) {
            (Some(os), Some(arch)) => Self::from_parts(&os, &arch),
            _ => Self::native(),
        }
    }

    /// Resolve the platform for single-file publishing.
    ///
    /// An explicit value wins; otherwise falls back to
    /// [`Platform::from_env_or_native`].
    #[must_use]
    pub fn resolve(explicit: Option<&str>) -> Self {
        explicit.map_or_else(Self::from_env_or_native, Self::new)
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read an environment variable, treating empty and non-Unicode values as
/// unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

/// Map a Rust `target_os` name to the name update clients use.
fn client_os_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Map a Rust `target_arch` name to the name update clients use.
fn client_arch_name(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "wasm32" => "wasm",
        other => other,
    }
}
