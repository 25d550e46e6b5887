//! One-shot provisioning of the cached executable
//!
//! ```text
//! provision()
//!     ↓
//! 1. Derive ArtifactLocation (pure)
//!     ↓
//! 2. Refuse if the network policy is "never"
//!     ↓
//! 3. Create <install-root>/bin/<os_raw>-<arch_raw>/
//!     ↓
//! 4. Download archive (temp file, persisted only on success)
//!     ↓
//! 5. Remove previous executable, extract in place, locate executable
//!     ↓
//! 6. chmod 0755 (Unix), remove archive
//! ```
//!
//! Re-running overwrites earlier artifacts. A failure mid-extraction can leave
//! a partially extracted cache directory behind; the next successful run
//! replaces it.

use crate::github::{self, DownloadError, ProgressFn, UrlError};
use crate::info::CachedBinary;
use crate::install::extract::{ExtractError, extract_archive, locate_executable};
use crate::install::location::ArtifactLocation;
use crate::install::permissions::normalize_permissions;
use arcshim_core::config::{NetworkPolicy, ReleaseSource, Settings};
use arcshim_core::platform::PlatformArch;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Provisioning configuration
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Semantic version to install (without leading `v`)
    pub version: String,

    /// Package install root; the cache lives under `<install_root>/bin/`
    pub install_root: PathBuf,

    /// Where release archives are published
    pub release: ReleaseSource,

    /// Target platform, usually [`PlatformArch::host`]
    pub platform: PlatformArch,

    pub network: NetworkPolicy,

    /// HTTP request timeout
    pub timeout: Duration,

    /// Optional progress callback (bytes_downloaded, total_bytes)
    pub progress: Option<ProgressFn>,
}

impl ProvisionOptions {
    pub fn from_settings(settings: &Settings, platform: PlatformArch) -> Self {
        Self {
            version: settings.version.clone(),
            install_root: settings.install_root.clone(),
            release: settings.release.clone(),
            platform,
            network: settings.network,
            timeout: settings.timeout,
            progress: None,
        }
    }

    /// Derives where the artifact comes from and where it lands
    pub fn location(&self) -> Result<ArtifactLocation, ProvisionError> {
        Ok(ArtifactLocation::derive(
            &self.version,
            &self.platform,
            &self.install_root,
            &self.release,
        )?)
    }
}

/// Downloads, extracts and permission-normalizes the executable
///
/// # Errors
///
/// Returns `ProvisionError` if:
/// - The network policy forbids downloads
/// - The cache directory cannot be created
/// - The download fails (bad HTTP status, transport failure); no partial
///   archive is left behind
/// - Extraction fails or the archive has no executable
/// - Permissions cannot be set
pub fn provision(options: &ProvisionOptions) -> Result<CachedBinary, ProvisionError> {
    let location = options.location()?;

    if options.network == NetworkPolicy::Never {
        return Err(ProvisionError::NetworkDisabled {
            url: location.download_url,
        });
    }

    fs::create_dir_all(&location.cache_dir).map_err(|e| ProvisionError::CacheDir {
        path: location.cache_dir.clone(),
        source: e,
    })?;

    log::info!("Downloading arcbranch binary from {}", location.download_url);
    let client = github::build_client(options.timeout).map_err(DownloadError::Client)?;
    github::download_to_file(
        &client,
        &location.download_url,
        &location.archive_path,
        options.progress,
    )?;

    // Only an executable from this archive may satisfy the lookup below
    remove_stale_executable(&location.executable_path)?;

    log::info!("Extracting {}", location.archive_path.display());
    extract_archive(
        &location.archive_path,
        location.archive_format,
        &location.cache_dir,
    )?;
    let executable = locate_executable(&location.cache_dir, &location.executable_path)?;

    normalize_permissions(&executable).map_err(|e| ProvisionError::Permissions {
        path: executable.clone(),
        source: e,
    })?;

    // Best-effort cleanup; the executable is already in place
    if let Err(e) = fs::remove_file(&location.archive_path) {
        log::debug!(
            "Could not remove archive {}: {}",
            location.archive_path.display(),
            e
        );
    }

    log::info!("Binary installed to {}", executable.display());
    Ok(CachedBinary {
        path: executable,
        version: location.version,
        platform: location.platform,
    })
}

fn remove_stale_executable(path: &Path) -> Result<(), ExtractError> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed previous executable {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ExtractError::Io {
            operation: format!("remove previous executable {}", path.display()),
            source: e,
        }),
    }
}

/// Provisioning error types
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "NETWORK_POLICY_VIOLATION: network access denied by policy (network = 'never'), not downloading {url}"
    )]
    NetworkDisabled { url: Url },

    #[error("Invalid download URL: {0}")]
    Location(#[from] UrlError),

    #[error("Could not create cache directory {}: {source}", path.display())]
    CacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Could not set permissions on {}: {source}", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcshim_core::layout;
    use arcshim_core::platform::resolve;
    use arcshim_testkit::{tar_gz_archive, temp_dir_in_workspace, zip_archive};
    use mockito::{Server, ServerGuard};

    // ============================================================================
    // Test Helpers
    // ============================================================================

    fn options_for(server: &ServerGuard, root: &Path, platform: PlatformArch) -> ProvisionOptions {
        ProvisionOptions {
            version: "1.2.3".to_string(),
            install_root: root.to_path_buf(),
            release: ReleaseSource {
                base_url: Url::parse(&server.url()).unwrap(),
                repository: "RohanAdwankar/arcbranch".to_string(),
            },
            platform,
            network: NetworkPolicy::Auto,
            timeout: Duration::from_secs(10),
            progress: None,
        }
    }

    fn asset_path(platform: &PlatformArch) -> String {
        format!(
            "/RohanAdwankar/arcbranch/releases/download/v1.2.3/{}",
            layout::asset_name(platform)
        )
    }

    #[cfg(unix)]
    fn mode_of(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    // ============================================================================
    // Success Paths
    // ============================================================================

    #[test]
    fn test_provision_tar_gz_on_linux() {
        let mut server = Server::new();
        let platform = resolve("linux", "x64");
        let mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(200)
            .with_body(tar_gz_archive(&[("arcbranch", b"#!/bin/sh\nexit 0\n")]))
            .create();

        let root = temp_dir_in_workspace();
        let cached = provision(&options_for(&server, root.path(), platform.clone())).unwrap();

        mock.assert();
        assert_eq!(
            cached.path,
            layout::executable_path(root.path(), &platform),
            "Installed binary must be where the launcher looks"
        );
        assert!(cached.path.is_file());
        assert_eq!(cached.version, "1.2.3");
        #[cfg(unix)]
        assert_eq!(mode_of(&cached.path), 0o755);
    }

    #[test]
    fn test_provision_zip_on_windows_platform() {
        let mut server = Server::new();
        let platform = resolve("win32", "x64");
        let mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(200)
            .with_body(zip_archive(&[("arcbranch.exe", b"MZ fake")]))
            .create();

        let root = temp_dir_in_workspace();
        let cached = provision(&options_for(&server, root.path(), platform.clone())).unwrap();

        mock.assert();
        assert_eq!(
            cached.path,
            root.path().join("bin").join("win32-x64").join("arcbranch.exe")
        );
        assert_eq!(fs::read(&cached.path).unwrap(), b"MZ fake");
        #[cfg(unix)]
        assert_eq!(mode_of(&cached.path), 0o755);
    }

    #[test]
    fn test_provision_removes_archive_after_extraction() {
        let mut server = Server::new();
        let platform = resolve("darwin", "arm64");
        let _mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(200)
            .with_body(tar_gz_archive(&[("arcbranch", b"bin")]))
            .create();

        let root = temp_dir_in_workspace();
        let options = options_for(&server, root.path(), platform);
        provision(&options).unwrap();

        let location = options.location().unwrap();
        assert!(!location.archive_path.exists());
        assert!(location.executable_path.exists());
    }

    #[test]
    fn test_provision_nested_executable() {
        let mut server = Server::new();
        let platform = resolve("linux", "arm64");
        let _mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(200)
            .with_body(tar_gz_archive(&[
                ("arcbranch_Linux_arm64/README.md", b"docs"),
                ("arcbranch_Linux_arm64/arcbranch", b"nested"),
            ]))
            .create();

        let root = temp_dir_in_workspace();
        let cached = provision(&options_for(&server, root.path(), platform.clone())).unwrap();

        assert_eq!(cached.path, layout::executable_path(root.path(), &platform));
        assert_eq!(fs::read(&cached.path).unwrap(), b"nested");
    }

    #[test]
    fn test_provision_twice_overwrites() {
        let platform = resolve("linux", "x64");
        let root = temp_dir_in_workspace();

        for contents in [&b"first"[..], &b"second"[..]] {
            let mut server = Server::new();
            let _mock = server
                .mock("GET", asset_path(&platform).as_str())
                .with_status(200)
                .with_body(tar_gz_archive(&[("arcbranch", contents)]))
                .create();
            provision(&options_for(&server, root.path(), platform.clone())).unwrap();
        }

        let path = layout::executable_path(root.path(), &platform);
        assert_eq!(fs::read(path).unwrap(), b"second");
    }

    fn provision_archive(root: &Path, platform: &PlatformArch, archive: Vec<u8>) -> Result<CachedBinary, ProvisionError> {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", asset_path(platform).as_str())
            .with_status(200)
            .with_body(archive)
            .create();
        provision(&options_for(&server, root, platform.clone()))
    }

    #[test]
    fn test_reinstall_with_nested_executable_replaces_old_binary() {
        let platform = resolve("linux", "x64");
        let root = temp_dir_in_workspace();

        provision_archive(root.path(), &platform, tar_gz_archive(&[("arcbranch", b"old")])).unwrap();
        let cached = provision_archive(
            root.path(),
            &platform,
            tar_gz_archive(&[("pkg/arcbranch", b"new")]),
        )
        .unwrap();

        assert_eq!(cached.path, layout::executable_path(root.path(), &platform));
        assert_eq!(fs::read(&cached.path).unwrap(), b"new");
    }

    #[test]
    fn test_reinstall_without_executable_fails() {
        let platform = resolve("linux", "x64");
        let root = temp_dir_in_workspace();

        provision_archive(root.path(), &platform, tar_gz_archive(&[("arcbranch", b"old")])).unwrap();
        let err = provision_archive(root.path(), &platform, tar_gz_archive(&[("LICENSE", b"MIT")]))
            .unwrap_err();

        assert!(
            matches!(
                err,
                ProvisionError::Extract(ExtractError::ExecutableMissing { .. })
            ),
            "Archive without executable must not reuse the previous install, got: {:?}",
            err
        );
        assert!(!layout::executable_path(root.path(), &platform).exists());
    }

    // ============================================================================
    // Failure Paths
    // ============================================================================

    #[test]
    fn test_provision_404_reports_status_and_leaves_no_archive() {
        let mut server = Server::new();
        let platform = resolve("linux", "x64");
        let mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(404)
            .create();

        let root = temp_dir_in_workspace();
        let err = provision(&options_for(&server, root.path(), platform.clone())).unwrap_err();

        mock.assert();
        assert!(
            matches!(
                err,
                ProvisionError::Download(DownloadError::HttpStatus { status: 404, .. })
            ),
            "Expected HTTP 404 download error, got: {:?}",
            err
        );
        assert!(err.to_string().contains("404"));

        let cache_dir = layout::cache_dir(root.path(), &platform);
        let leftovers: Vec<_> = fs::read_dir(&cache_dir).unwrap().collect();
        assert!(
            leftovers.is_empty(),
            "Cache directory should be empty after a failed download: {:?}",
            leftovers
        );
    }

    #[test]
    fn test_provision_corrupt_archive() {
        let mut server = Server::new();
        let platform = resolve("linux", "x64");
        let _mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(200)
            .with_body("this is not gzip")
            .create();

        let root = temp_dir_in_workspace();
        let err = provision(&options_for(&server, root.path(), platform)).unwrap_err();

        assert!(
            matches!(err, ProvisionError::Extract(ExtractError::Corrupt { .. })),
            "Expected corrupt archive error, got: {:?}",
            err
        );
    }

    #[test]
    fn test_provision_archive_without_executable() {
        let mut server = Server::new();
        let platform = resolve("darwin", "x64");
        let _mock = server
            .mock("GET", asset_path(&platform).as_str())
            .with_status(200)
            .with_body(tar_gz_archive(&[("LICENSE", b"MIT")]))
            .create();

        let root = temp_dir_in_workspace();
        let err = provision(&options_for(&server, root.path(), platform)).unwrap_err();

        assert!(
            matches!(
                err,
                ProvisionError::Extract(ExtractError::ExecutableMissing { .. })
            ),
            "Expected missing executable error, got: {:?}",
            err
        );
    }

    #[test]
    fn test_provision_network_never_makes_no_request() {
        let mut server = Server::new();
        let platform = resolve("linux", "x64");
        let mock = server
            .mock("GET", asset_path(&platform).as_str())
            .expect(0)
            .create();

        let root = temp_dir_in_workspace();
        let mut options = options_for(&server, root.path(), platform.clone());
        options.network = NetworkPolicy::Never;

        let err = provision(&options).unwrap_err();

        mock.assert();
        assert!(matches!(err, ProvisionError::NetworkDisabled { .. }));
        assert!(!layout::cache_dir(root.path(), &platform).exists());
    }
}
