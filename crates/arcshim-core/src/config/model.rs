use crate::config::consts::{CONFIG_FILE_NAME, PACKAGE_MANIFEST_NAME, release};
use crate::error::{ArcshimError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// arcshim.toml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_repository")]
    pub repository: String,
    /// Pinned release version, overrides package.json
    #[serde(default)]
    pub version: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            repository: default_repository(),
            version: None,
        }
    }
}

fn default_repository() -> String {
    release::DEFAULT_REPOSITORY.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub policy: NetworkPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NetworkPolicy {
    #[default]
    Auto,
    Never,
}

impl NetworkPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(NetworkPolicy::Auto),
            "never" => Some(NetworkPolicy::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    release::DEFAULT_TIMEOUT_SECS
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ArcshimError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Loads `<install_root>/arcshim.toml`, falling back to defaults when absent
    pub fn load_from_root(install_root: &Path) -> Result<Self> {
        let path = install_root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        log::debug!("Loading config from {}", path.display());
        Self::load(&path)
    }
}

/// The subset of package.json we care about
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageManifest {
    /// Reads `<install_root>/package.json` if present
    pub fn load_from_root(install_root: &Path) -> Result<Option<Self>> {
        let path = install_root.join(PACKAGE_MANIFEST_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let manifest = serde_json::from_str(&content).map_err(|e| ArcshimError::ConfigParse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(manifest))
    }
}
