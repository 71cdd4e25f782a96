//! Canonical on-disk layout of published outputs.
//!
//! ```text
//! <output>/
//! ├── <platform>.json          latest manifest per platform
//! └── <version>/
//!     └── <platform>.gz        compressed binary
//! ```

use super::manifest::ReleaseVersion;
use super::platform::Platform;
use camino::{Utf8Path, Utf8PathBuf};

/// Extension of manifest files.
pub const MANIFEST_EXTENSION: &str = "json";

/// Extension of compressed artefacts.
pub const ARTEFACT_EXTENSION: &str = "gz";

/// Path policy rooted at an output directory.
///
/// # Examples
///
/// ```
/// use selfupdate_publisher::artefact::layout::OutputLayout;
/// use selfupdate_publisher::artefact::manifest::ReleaseVersion;
/// use selfupdate_publisher::artefact::platform::Platform;
///
/// let layout = OutputLayout::new("public");
/// let platform = Platform::new("linux-amd64");
/// let version = ReleaseVersion::new("1.2");
/// assert_eq!(layout.manifest_path(&platform), "public/linux-amd64.json");
/// assert_eq!(
///     layout.artefact_path(&version, &platform),
///     "public/1.2/linux-amd64.gz"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: Utf8PathBuf,
}

impl OutputLayout {
    /// Create a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory itself.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// `<root>/<platform>.json`.
    #[must_use]
    pub fn manifest_path(&self, platform: &Platform) -> Utf8PathBuf {
        self.root.join(format!("{platform}.{MANIFEST_EXTENSION}"))
    }

    /// `<root>/<version>/`.
    #[must_use]
    pub fn version_dir(&self, version: &ReleaseVersion) -> Utf8PathBuf {
        self.root.join(version.as_str())
    }

    /// `<root>/<version>/<platform>.gz`.
    #[must_use]
    pub fn artefact_path(&self, version: &ReleaseVersion, platform: &Platform) -> Utf8PathBuf {
        self.version_dir(version)
            .join(format!("{platform}.{ARTEFACT_EXTENSION}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("darwin-amd64", "2.0", "out/darwin-amd64.json", "out/2.0/darwin-amd64.gz")]
    #[case::prerelease(
        "linux-arm64",
        "1.0.0-rc.1",
        "out/linux-arm64.json",
        "out/1.0.0-rc.1/linux-arm64.gz"
    )]
    fn builds_canonical_paths(
        #[case] platform: &str,
        #[case] version: &str,
        #[case] manifest: &str,
        #[case] artefact: &str,
    ) {
        let layout = OutputLayout::new("out");
        let platform = Platform::new(platform);
        let version = ReleaseVersion::new(version);
        assert_eq!(layout.manifest_path(&platform), manifest);
        assert_eq!(layout.artefact_path(&version, &platform), artefact);
    }

    #[test]
    fn version_dir_is_under_root() {
        let layout = OutputLayout::new("/srv/updates");
        assert_eq!(
            layout.version_dir(&ReleaseVersion::new("3.1")),
            "/srv/updates/3.1"
        );
    }

    #[test]
    fn platform_dots_are_preserved() {
        let layout = OutputLayout::new("out");
        let platform = Platform::new("windows-amd64.exe");
        assert_eq!(layout.manifest_path(&platform), "out/windows-amd64.exe.json");
    }
}
