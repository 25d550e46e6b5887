//! Artifact location derivation
//!
//! Everything the installer needs to know about where an artifact comes from
//! and where it lands, computed from version, platform, install root and
//! release source. Nothing here touches the network or the filesystem.

use crate::github::{UrlError, release_asset_url};
use arcshim_core::config::ReleaseSource;
use arcshim_core::layout::{self, ArchiveFormat};
use arcshim_core::platform::PlatformArch;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub version: String,
    pub platform: PlatformArch,
    pub download_url: Url,
    pub archive_format: ArchiveFormat,
    pub cache_dir: PathBuf,
    pub archive_path: PathBuf,
    pub executable_path: PathBuf,
}

impl ArtifactLocation {
    pub fn derive(
        version: &str,
        platform: &PlatformArch,
        install_root: &Path,
        source: &ReleaseSource,
    ) -> Result<Self, UrlError> {
        let asset = layout::asset_name(platform);
        let cache_dir = layout::cache_dir(install_root, platform);

        Ok(Self {
            version: version.to_string(),
            platform: platform.clone(),
            download_url: release_asset_url(source, version, &asset)?,
            archive_format: ArchiveFormat::for_platform(platform),
            archive_path: cache_dir.join(&asset),
            executable_path: layout::executable_path(install_root, platform),
            cache_dir,
        })
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version:    {}", self.version)?;
        writeln!(
            f,
            "platform:   {} ({} {})",
            self.platform,
            self.platform.os(),
            self.platform.arch()
        )?;
        writeln!(f, "url:        {}", self.download_url)?;
        writeln!(f, "format:     {}", self.archive_format)?;
        writeln!(f, "cache dir:  {}", self.cache_dir.display())?;
        writeln!(f, "archive:    {}", self.archive_path.display())?;
        write!(f, "executable: {}", self.executable_path.display())
    }
}
