//! Effective settings for a single run
//!
//! Precedence, first match wins:
//!
//! - install root: explicit > `ARCSHIM_INSTALL_ROOT` > directory of the running executable
//! - version: explicit > `ARCSHIM_VERSION` > arcshim.toml > package.json > [`PACKAGE_VERSION`]
//! - base URL: explicit > `ARCSHIM_GITHUB_BASE_URL` > arcshim.toml > `https://github.com`
//! - network policy: `ARCSHIM_NETWORK` > arcshim.toml
//!
//! Environment access goes through a lookup closure so callers (and tests)
//! decide where variables come from.

use crate::config::consts::{PACKAGE_VERSION, env, release};
use crate::config::model::{Config, NetworkPolicy, PackageManifest};
use crate::error::{ArcshimError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where release archives are published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    pub base_url: Url,
    /// `<owner>/<repo>`
    pub repository: String,
}

impl ReleaseSource {
    /// The public GitHub release host with the default repository
    pub fn github() -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(release::DEFAULT_BASE_URL)?,
            repository: release::DEFAULT_REPOSITORY.to_string(),
        })
    }
}

/// Values given explicitly (e.g. on the command line)
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub install_root: Option<PathBuf>,
    pub version: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub install_root: PathBuf,
    /// Semantic version without a leading `v`
    pub version: String,
    pub release: ReleaseSource,
    pub network: NetworkPolicy,
    pub timeout: Duration,
}

impl Settings {
    /// Resolves settings from the process environment
    pub fn from_env(overrides: SettingsOverrides) -> Result<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve<F>(overrides: SettingsOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let install_root = resolve_install_root(overrides.install_root, &lookup)?;
        let config = Config::load_from_root(&install_root)?;

        let raw_version = match overrides
            .version
            .or_else(|| non_empty(lookup(env::VERSION)))
            .or_else(|| config.release.version.clone())
        {
            Some(version) => version,
            None => PackageManifest::load_from_root(&install_root)?
                .and_then(|manifest| manifest.version)
                .unwrap_or_else(|| PACKAGE_VERSION.to_string()),
        };
        let version = normalize_version(&raw_version)?;

        let base_url = match overrides
            .base_url
            .or_else(|| non_empty(lookup(env::BASE_URL)))
            .or_else(|| config.release.base_url.clone())
        {
            Some(raw) => parse_base_url(&raw)?,
            None => Url::parse(release::DEFAULT_BASE_URL)?,
        };

        let repository = config.release.repository.trim_matches('/').to_string();
        if repository.split('/').filter(|s| !s.is_empty()).count() != 2 {
            return Err(ArcshimError::ConfigInvalidValue {
                field: "release.repository".to_string(),
                reason: format!("expected '<owner>/<repo>', got '{}'", repository),
            });
        }

        let network = match non_empty(lookup(env::NETWORK)) {
            Some(raw) => {
                NetworkPolicy::parse(&raw).ok_or_else(|| ArcshimError::ConfigInvalidValue {
                    field: env::NETWORK.to_string(),
                    reason: format!("expected 'auto' or 'never', got '{}'", raw),
                })?
            }
            None => config.network.policy,
        };

        Ok(Self {
            install_root,
            version,
            release: ReleaseSource {
                base_url,
                repository,
            },
            network,
            timeout: Duration::from_secs(config.download.timeout_secs),
        })
    }
}

/// Resolves only the install root
///
/// This is all the launcher needs; it deliberately reads no config files.
pub fn resolve_install_root<F>(explicit: Option<PathBuf>, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = explicit {
        return Ok(root);
    }
    if let Some(root) = non_empty(lookup(env::INSTALL_ROOT)) {
        return Ok(PathBuf::from(root));
    }

    let exe = std::env::current_exe().map_err(|e| {
        ArcshimError::InstallRootUnknown(format!("cannot locate running executable: {}", e))
    })?;
    exe.parent().map(|dir| dir.to_path_buf()).ok_or_else(|| {
        ArcshimError::InstallRootUnknown(format!(
            "executable {} has no parent directory",
            exe.display()
        ))
    })
}

/// Validates a semantic version and strips an optional leading `v`
///
/// # Examples
///
/// ```
/// use arcshim_core::config::normalize_version;
///
/// assert_eq!(normalize_version("v1.2.3").unwrap(), "1.2.3");
/// assert!(normalize_version("latest").is_err());
/// ```
pub fn normalize_version(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
    semver::Version::parse(stripped)
        .map(|version| version.to_string())
        .map_err(|e| ArcshimError::VersionInvalid {
            version: raw.to_string(),
            reason: e.to_string(),
        })
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ArcshimError::UrlInvalid(format!(
            "'{}' cannot be used as a base URL",
            raw
        )));
    }
    Ok(url)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
