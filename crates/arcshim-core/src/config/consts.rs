//! Constants shared by the installer and the launcher

/// Version of the package these binaries were built from
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Optional configuration file in the install root
pub const CONFIG_FILE_NAME: &str = "arcshim.toml";

/// npm manifest in the install root, consulted for the release version
pub const PACKAGE_MANIFEST_NAME: &str = "package.json";

/// Release host defaults
pub mod release {
    pub const DEFAULT_BASE_URL: &str = "https://github.com";

    /// `<owner>/<repo>` on the release host
    pub const DEFAULT_REPOSITORY: &str = "RohanAdwankar/arcbranch";

    /// Download timeout (5 minutes for large binaries)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
}

/// Environment variable names
pub mod env {
    pub const INSTALL_ROOT: &str = "ARCSHIM_INSTALL_ROOT";
    pub const VERSION: &str = "ARCSHIM_VERSION";
    pub const BASE_URL: &str = "ARCSHIM_GITHUB_BASE_URL";
    pub const NETWORK: &str = "ARCSHIM_NETWORK";
    pub const LOG: &str = "ARCSHIM_LOG";
}
