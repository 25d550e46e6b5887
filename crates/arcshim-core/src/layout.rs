//! Cache layout and artifact naming
//!
//! Both the installer and the launcher compute the executable location from
//! these functions, so they can never disagree on where the binary lives:
//!
//! ```text
//! <install-root>/bin/<os_raw>-<arch_raw>/arcbranch[.exe]
//! ```

use crate::platform::PlatformArch;
use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the delegated executable (without extension)
pub const EXECUTABLE_NAME: &str = "arcbranch";

/// Directory under the install root that holds per-platform caches
pub const BIN_DIR: &str = "bin";

/// Archive format of a release artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Windows releases ship as `.zip`, everything else as `.tar.gz`
    pub fn for_platform(platform: &PlatformArch) -> Self {
        if platform.is_windows() {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGz
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::TarGz => ".tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Zip => f.write_str("zip"),
            ArchiveFormat::TarGz => f.write_str("tar.gz"),
        }
    }
}

/// File name of the executable for a platform (`arcbranch` or `arcbranch.exe`)
pub fn executable_file_name(platform: &PlatformArch) -> String {
    if platform.is_windows() {
        format!("{}.exe", EXECUTABLE_NAME)
    } else {
        EXECUTABLE_NAME.to_string()
    }
}

/// Per-platform cache directory, named after the raw identifiers
pub fn cache_dir(install_root: &Path, platform: &PlatformArch) -> PathBuf {
    install_root
        .join(BIN_DIR)
        .join(format!("{}-{}", platform.os_raw(), platform.arch_raw()))
}

/// Location of the cached executable
pub fn executable_path(install_root: &Path, platform: &PlatformArch) -> PathBuf {
    cache_dir(install_root, platform).join(executable_file_name(platform))
}

/// Remote artifact name, built from the canonical labels
///
/// # Examples
///
/// ```
/// use arcshim_core::layout::asset_name;
/// use arcshim_core::platform::resolve;
///
/// assert_eq!(asset_name(&resolve("darwin", "arm64")), "arcbranch_Darwin_arm64.tar.gz");
/// assert_eq!(asset_name(&resolve("win32", "x64")), "arcbranch_Windows_x86_64.zip");
/// ```
pub fn asset_name(platform: &PlatformArch) -> String {
    format!(
        "{}_{}_{}{}",
        EXECUTABLE_NAME,
        platform.os().label(),
        platform.arch().label(),
        ArchiveFormat::for_platform(platform).extension()
    )
}
